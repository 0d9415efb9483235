//! # Version Template Formatting
//!
//! This module implements the small template dialect used to render a
//! [`GitVersion`](crate::version::GitVersion) into a tag string. It is
//! deliberately minimal - field substitution plus one conditional form -
//! and is not a general-purpose template engine.
//!
//! ## Dialect
//!
//! - `{{.Field}}` substitutes a record field.
//! - `{{if .Field}}...{{end}}` includes the body only when the named
//!   boolean field is true.
//!
//! The five recognized fields are `Branch`, `Commits`, `Hash`, `Dirty` and
//! `User`. `Dirty` is the only boolean; substituting it directly renders
//! `true` or `false`.
//!
//! Parsing and rendering are pure functions of the template string and the
//! version record, so identical inputs always produce identical output.
//! Parse failures (malformed syntax, unknown field) and render failures
//! (conditional over a non-boolean field) are reported as distinct
//! `Error::Template` causes and never terminate the process.

use crate::error::{Error, Result};
use crate::version::GitVersion;

/// The record fields a template may reference.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Field {
    Branch,
    Commits,
    Hash,
    Dirty,
    User,
}

impl Field {
    fn from_name(name: &str) -> Option<Self> {
        match name {
            "Branch" => Some(Field::Branch),
            "Commits" => Some(Field::Commits),
            "Hash" => Some(Field::Hash),
            "Dirty" => Some(Field::Dirty),
            "User" => Some(Field::User),
            _ => None,
        }
    }
}

/// A parsed template node.
#[derive(Debug, Clone, PartialEq, Eq)]
enum Node {
    Literal(String),
    Substitute(Field),
    Conditional { field: Field, body: Vec<Node> },
}

/// A parsed, reusable version template.
#[derive(Debug, Clone)]
pub struct Template {
    nodes: Vec<Node>,
}

impl Template {
    /// Parse a template string into a reusable `Template`.
    pub fn parse(template: &str) -> Result<Self> {
        let mut parser = Parser::new(template);
        let nodes = parser.parse_nodes(false)?;
        Ok(Template { nodes })
    }

    /// Render this template against a version record.
    pub fn render(&self, version: &GitVersion) -> Result<String> {
        let mut out = String::new();
        render_nodes(&self.nodes, version, &mut out)?;
        Ok(out)
    }
}

/// Parse and render in one step.
///
/// Convenience for one-shot callers; repeated renders of the same template
/// should parse once and reuse the [`Template`].
pub fn render(version: &GitVersion, template: &str) -> Result<String> {
    Template::parse(template)?.render(version)
}

fn render_nodes(nodes: &[Node], version: &GitVersion, out: &mut String) -> Result<()> {
    for node in nodes {
        match node {
            Node::Literal(text) => out.push_str(text),
            Node::Substitute(field) => match field {
                Field::Branch => out.push_str(&version.branch),
                Field::Commits => out.push_str(&version.commits),
                Field::Hash => out.push_str(&version.hash),
                Field::User => out.push_str(&version.user),
                Field::Dirty => out.push_str(if version.dirty { "true" } else { "false" }),
            },
            Node::Conditional { field, body } => {
                // Only the boolean field may gate a conditional block
                let condition = match field {
                    Field::Dirty => version.dirty,
                    other => {
                        return Err(Error::Template {
                            message: "conditional requires a boolean field".to_string(),
                            token: Some(format!("{{{{if .{:?}}}}}", other)),
                        })
                    }
                };
                if condition {
                    render_nodes(body, version, out)?;
                }
            }
        }
    }
    Ok(())
}

struct Parser<'a> {
    rest: &'a str,
}

impl<'a> Parser<'a> {
    fn new(template: &'a str) -> Self {
        Parser { rest: template }
    }

    /// Parse nodes until end of input, or until a matching `{{end}}` when
    /// inside a conditional body.
    fn parse_nodes(&mut self, in_conditional: bool) -> Result<Vec<Node>> {
        let mut nodes = Vec::new();

        loop {
            match self.rest.find("{{") {
                None => {
                    if in_conditional {
                        return Err(Error::Template {
                            message: "unterminated conditional, expected {{end}}".to_string(),
                            token: None,
                        });
                    }
                    if !self.rest.is_empty() {
                        nodes.push(Node::Literal(self.rest.to_string()));
                        self.rest = "";
                    }
                    return Ok(nodes);
                }
                Some(start) => {
                    if start > 0 {
                        nodes.push(Node::Literal(self.rest[..start].to_string()));
                    }
                    self.rest = &self.rest[start + 2..];

                    let close = self.rest.find("}}").ok_or_else(|| Error::Template {
                        message: "unclosed directive, expected }}".to_string(),
                        token: None,
                    })?;
                    let directive = self.rest[..close].trim();
                    self.rest = &self.rest[close + 2..];

                    if directive == "end" {
                        if !in_conditional {
                            return Err(Error::Template {
                                message: "{{end}} without matching {{if}}".to_string(),
                                token: None,
                            });
                        }
                        return Ok(nodes);
                    } else if let Some(cond) = directive.strip_prefix("if ") {
                        let field = parse_field_ref(cond.trim())?;
                        let body = self.parse_nodes(true)?;
                        nodes.push(Node::Conditional { field, body });
                    } else {
                        let field = parse_field_ref(directive)?;
                        nodes.push(Node::Substitute(field));
                    }
                }
            }
        }
    }
}

fn parse_field_ref(reference: &str) -> Result<Field> {
    let name = reference.strip_prefix('.').ok_or_else(|| Error::Template {
        message: "expected field reference of the form .Name".to_string(),
        token: Some(reference.to_string()),
    })?;
    Field::from_name(name).ok_or_else(|| Error::Template {
        message: "unknown field".to_string(),
        token: Some(format!(".{}", name)),
    })
}
