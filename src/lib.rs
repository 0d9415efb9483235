//! # tagver Library
//!
//! This library computes deterministic, reproducible build versions for
//! projects inside a multi-project source tree and derives container image
//! tags from them. It is designed to be used by the `tagver` command-line
//! tool but can also be integrated into other build tooling that must tag
//! images consistently across machines, so identical source trees produce
//! identical tags and registry-level build caches can be reused.
//!
//! ## Quick Example
//!
//! ```
//! use tagver::version::{GitVersion, DEFAULT_TEMPLATE};
//!
//! let version = GitVersion {
//!     branch: "main".to_string(),
//!     commits: "5".to_string(),
//!     hash: "abcdef1".to_string(),
//!     dirty: false,
//!     user: "bob".to_string(),
//! };
//!
//! // Clean trees tag as commits.hash
//! assert_eq!(version.default_format().unwrap(), "5.abcdef1");
//!
//! // Custom templates use the same dialect as tagver.yml overrides
//! let tag = version.format("{{.Branch}}-{{.Commits}}").unwrap();
//! assert_eq!(tag, "main-5");
//! # let _ = DEFAULT_TEMPLATE;
//! ```
//!
//! ## Core Concepts
//!
//! - **Version resolution (`version`, `vcs`)**: aggregates version-control
//!   facts (commit depth, head revision, dirtiness) scoped to a project's
//!   path set through the [`vcs::VcsAdapter`] boundary. Two projects
//!   sharing a monorepo get different identifiers when touched by
//!   different commits.
//! - **Identity (`identity`)**: a compute-once cache of the sanitized
//!   operator username, shared by every project resolved in a run.
//! - **Templates (`template`)**: the minimal `{{.Field}}` /
//!   `{{if .Field}}...{{end}}` dialect used to render version records into
//!   tag strings.
//! - **Configuration (`config`, `registry`)**: per-project `tagver.yml`
//!   descriptors with explicit field-by-field default inheritance, plus
//!   the workspace descriptor listing projects and shared defaults.
//! - **Projects (`project`)**: [`project::Project::load`] resolves a
//!   directory into its final buildable identity - repository, tag, and
//!   fully-qualified image name.
//!
//! ## Execution Flow
//!
//! `Project::load` drives everything: descriptor → default merge →
//! buildability gate → path-set computation → version resolution → tag
//! rendering → identity assembly. Projects are independent, so a tool
//! invocation may resolve many of them in parallel; the identity cache is
//! the only shared state.

pub mod config;
pub mod error;
pub mod identity;
pub mod project;
pub mod registry;
pub mod template;
pub mod vcs;
pub mod version;
