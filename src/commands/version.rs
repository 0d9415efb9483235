//! Version command implementation
//!
//! Prints the computed version tag for one or more project directories,
//! independent of buildability. Useful for scripting and for inspecting
//! what tag a build would get.

use anyhow::Result;
use clap::Args;
use std::path::PathBuf;

use tagver::config::ProjectConfig;
use tagver::identity::IdentityCache;
use tagver::project::{Project, ResolveContext};
use tagver::vcs::GitCli;
use tagver::version::GitVersion;

/// Arguments for the version command
#[derive(Args, Debug)]
pub struct VersionArgs {
    /// Project directories to version
    #[arg(value_name = "DIR", required = true)]
    pub dirs: Vec<PathBuf>,

    /// Template override applied to every directory
    #[arg(short, long, value_name = "TEMPLATE")]
    pub template: Option<String>,
}

/// Execute the version command
pub fn execute(args: VersionArgs) -> Result<()> {
    let identity = IdentityCache::new();
    let multiple = args.dirs.len() > 1;

    for dir in &args.dirs {
        if !dir.is_dir() {
            anyhow::bail!("Not a directory: {}", dir.display());
        }

        let vcs = GitCli::new(dir);
        let ctx = ResolveContext {
            vcs: &vcs,
            identity: &identity,
        };
        let project = Project::load(dir, &ProjectConfig::default(), &ctx)?;

        // Non-buildable projects skip version resolution during load, so
        // resolve over their path set here
        let version = match &project.version {
            Some(version) => version.clone(),
            None => GitVersion::resolve(&vcs, &identity, &project.versioned_paths())?,
        };

        let template = args
            .template
            .as_deref()
            .or(project.config.version_template.as_deref());
        let mut tag = match template {
            Some(template) => version.format(template)?,
            None => version.default_format()?,
        };
        if let Some(prefix) = project.config.version_prefix.as_deref() {
            tag = format!("{}{}", prefix, tag);
        }

        if multiple {
            println!("{}\t{}", dir.display(), tag);
        } else {
            println!("{}", tag);
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_execute_rejects_missing_directory() {
        let args = VersionArgs {
            dirs: vec![PathBuf::from("/nonexistent/project")],
            template: None,
        };

        let result = execute(args);
        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("Not a directory"));
    }
}
