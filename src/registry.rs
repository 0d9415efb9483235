//! # Registry Settings
//!
//! Container registry settings attached to a project configuration. The
//! only thing the resolution core consumes from this block is the literal
//! prefix placed in front of an image name to form its fully-qualified
//! form; pushing and registry-side cache checks live outside this crate.

use serde::{Deserialize, Serialize};

/// Container registry settings for a project.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegistryConfig {
    /// Registry host (optionally with a namespace), e.g.
    /// `registry.example.com/team`. Unset means local images only.
    #[serde(default)]
    pub url: Option<String>,
}

impl RegistryConfig {
    /// Literal prefix for fully-qualified image names.
    ///
    /// Ends with `/` when a registry is configured, empty otherwise, so
    /// callers can always concatenate `prefix() + image`.
    pub fn prefix(&self) -> String {
        match self.url.as_deref() {
            Some(url) if !url.is_empty() => {
                if url.ends_with('/') {
                    url.to_string()
                } else {
                    format!("{}/", url)
                }
            }
            _ => String::new(),
        }
    }
}
