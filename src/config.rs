//! # Configuration Schema and Parsing
//!
//! This module defines the data structures for the per-project `tagver.yml`
//! descriptor and the workspace-level descriptor, along with the explicit
//! default-inheritance merge.
//!
//! ## Set vs. unset
//!
//! Every project-level field is represented as an `Option` so that a field
//! deliberately set to an empty value is distinguishable from an unset one.
//! The merge never overwrites an explicitly-set value with a default - this
//! replaces the reflection-based merge of older tooling, whose zero-value
//! semantics were ambiguous.
//!
//! ## Container-typed merge rules
//!
//! - `build_args` merges key-wise (union); project-level keys win.
//! - `depends_on` and `test` are replace-not-merge: a project that sets the
//!   key (even to an empty value) keeps it, only a missing key inherits.
//! - `registry` merges field-by-field.

use std::collections::BTreeMap;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::registry::RegistryConfig;

/// File name of the per-project descriptor (also used at the workspace
/// root for the workspace descriptor).
pub const CONFIG_FILE_NAME: &str = "tagver.yml";

/// Copies test results from the container to the local filesystem.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CopyResults {
    /// Location to copy files from in the container. Example: `/app/build/.`
    #[serde(default)]
    pub src_path: Option<String>,
    /// Destination relative to the project directory. Example: `build`
    #[serde(default)]
    pub dst_path: Option<String>,
}

/// Optional test settings for a project.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TestConfig {
    /// Alternate target in a multi-stage build used for running tests.
    #[serde(default)]
    pub target: Option<String>,
    /// Where to copy test results from and to.
    #[serde(default)]
    pub copy_results: Option<CopyResults>,
}

/// Per-project configuration loaded from `tagver.yml`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectConfig {
    /// Alternative name for this image. Defaults to the project directory's
    /// base name when unset.
    #[serde(default)]
    pub name: Option<String>,

    /// Alternate context directory to build the image from, relative to the
    /// project directory.
    #[serde(default)]
    pub context_dir: Option<String>,

    /// Prefix for the container image name.
    #[serde(default)]
    pub image_prefix: Option<String>,

    /// Prefix prepended to the computed version. Useful for SemVer/CalVer
    /// or for variations of an image in the same registry.
    #[serde(default)]
    pub version_prefix: Option<String>,

    /// Template override for computing the version string.
    #[serde(default)]
    pub version_template: Option<String>,

    /// Paths of other projects this one depends on, relative to the project
    /// directory. Incorporated into the version computation.
    #[serde(default)]
    pub depends_on: Option<Vec<String>>,

    /// Arguments passed to the build command.
    #[serde(default)]
    pub build_args: Option<BTreeMap<String, String>>,

    /// Optional testing settings.
    #[serde(default)]
    pub test: Option<TestConfig>,

    /// Container registry settings.
    #[serde(default)]
    pub registry: Option<RegistryConfig>,
}

impl ProjectConfig {
    /// Parse a project configuration from a YAML string.
    pub fn parse(yaml_content: &str) -> Result<Self> {
        Ok(serde_yaml::from_str(yaml_content)?)
    }

    /// Parse a project configuration from a YAML file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::parse(&content)
    }

    /// Inherit unset fields from `defaults`, field by field.
    ///
    /// Explicit project-level values always win, including values
    /// explicitly set to empty. Merge failures must be surfaced by callers,
    /// never discarded.
    pub fn merge_defaults(&mut self, defaults: &ProjectConfig) -> Result<()> {
        merge_option(&mut self.name, &defaults.name);
        merge_option(&mut self.context_dir, &defaults.context_dir);
        merge_option(&mut self.image_prefix, &defaults.image_prefix);
        merge_option(&mut self.version_prefix, &defaults.version_prefix);
        merge_option(&mut self.version_template, &defaults.version_template);
        merge_option(&mut self.depends_on, &defaults.depends_on);
        merge_option(&mut self.test, &defaults.test);

        // build_args: key-wise union, project keys win
        match (&mut self.build_args, &defaults.build_args) {
            (Some(args), Some(default_args)) => {
                for (key, value) in default_args {
                    args.entry(key.clone()).or_insert_with(|| value.clone());
                }
            }
            (slot @ None, Some(default_args)) => {
                *slot = Some(default_args.clone());
            }
            _ => {}
        }

        // registry: field-by-field
        match (&mut self.registry, &defaults.registry) {
            (Some(registry), Some(default_registry)) => {
                merge_option(&mut registry.url, &default_registry.url);
            }
            (slot @ None, Some(default_registry)) => {
                *slot = Some(default_registry.clone());
            }
            _ => {}
        }

        Ok(())
    }
}

/// Fill an unset option from the default; set values are preserved.
fn merge_option<T: Clone>(field: &mut Option<T>, default: &Option<T>) {
    if field.is_none() {
        field.clone_from(default);
    }
}

/// Workspace-level descriptor: the project list plus shared defaults.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkspaceConfig {
    /// Project directories, relative to the workspace root.
    #[serde(default)]
    pub projects: Vec<String>,

    /// Defaults inherited by every project configuration.
    #[serde(default)]
    pub defaults: ProjectConfig,
}

impl WorkspaceConfig {
    /// Parse a workspace configuration from a YAML string.
    pub fn parse(yaml_content: &str) -> Result<Self> {
        Ok(serde_yaml::from_str(yaml_content)?)
    }

    /// Parse a workspace configuration from a YAML file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::parse(&content)
    }
}
