//! Resolve command implementation
//!
//! Loads the workspace descriptor, resolves every listed project in
//! parallel, and prints one line per buildable project with its
//! repository, tag, and fully-qualified image name. Failures abort only
//! the failing project; already-resolved projects are still reported.

use anyhow::Result;
use clap::Args;
use rayon::prelude::*;
use std::path::PathBuf;

use tagver::config::{WorkspaceConfig, CONFIG_FILE_NAME};
use tagver::identity::IdentityCache;
use tagver::project::{Project, ResolveContext};
use tagver::vcs::GitCli;

/// Arguments for the resolve command
#[derive(Args, Debug)]
pub struct ResolveArgs {
    /// Path to the workspace descriptor
    #[arg(short, long, value_name = "PATH", env = "TAGVER_CONFIG")]
    pub config: Option<PathBuf>,

    /// Also list projects without a build recipe
    #[arg(short, long)]
    pub all: bool,

    /// Suppress all output except errors
    #[arg(short, long)]
    pub quiet: bool,
}

/// Execute the resolve command
pub fn execute(args: ResolveArgs) -> Result<()> {
    let config_path = args
        .config
        .unwrap_or_else(|| PathBuf::from(CONFIG_FILE_NAME));

    if !config_path.exists() {
        anyhow::bail!(
            "Workspace descriptor not found: {}",
            config_path.display()
        );
    }

    let workspace = WorkspaceConfig::from_file(&config_path)?;
    let root = match config_path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
        _ => PathBuf::from("."),
    };

    let vcs = GitCli::new(&root);
    let identity = IdentityCache::new();

    // Projects are independent; resolve them in parallel to hide git
    // subprocess latency. Collect preserves descriptor order.
    let results: Vec<_> = workspace
        .projects
        .par_iter()
        .map(|relative| {
            let dir = root.join(relative);
            let ctx = ResolveContext {
                vcs: &vcs,
                identity: &identity,
            };
            let loaded = Project::load(&dir, &workspace.defaults, &ctx);
            (dir, loaded)
        })
        .collect();

    let mut failures = 0usize;
    for (dir, result) in results {
        match result {
            Ok(project) if project.can_build => {
                if !args.quiet {
                    println!(
                        "{}\t{}\t{}",
                        project.repository, project.tag, project.image_with_registry
                    );
                }
            }
            Ok(project) => {
                if args.all && !args.quiet {
                    println!("{}\t(not buildable)", project.dir.display());
                }
            }
            Err(error) => {
                failures += 1;
                log::error!("failed to resolve {}: {}", dir.display(), error);
            }
        }
    }

    if failures > 0 {
        anyhow::bail!("{} project(s) failed to resolve", failures);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_execute_missing_config() {
        let args = ResolveArgs {
            config: Some(PathBuf::from("/nonexistent/tagver.yml")),
            all: false,
            quiet: true,
        };

        let result = execute(args);
        assert!(result.is_err());
        assert!(result
            .unwrap_err()
            .to_string()
            .contains("Workspace descriptor not found"));
    }

    #[test]
    fn test_execute_empty_workspace() {
        let temp = TempDir::new().unwrap();
        let config_path = temp.path().join(CONFIG_FILE_NAME);
        fs::write(&config_path, "projects: []\n").unwrap();

        let args = ResolveArgs {
            config: Some(config_path),
            all: false,
            quiet: true,
        };

        assert!(execute(args).is_ok());
    }

    #[test]
    fn test_execute_non_buildable_projects_only() {
        let temp = TempDir::new().unwrap();
        fs::create_dir_all(temp.path().join("api")).unwrap();
        let config_path = temp.path().join(CONFIG_FILE_NAME);
        fs::write(&config_path, "projects: [api]\n").unwrap();

        // No Dockerfile anywhere, so no VCS work happens and the run
        // succeeds even outside a git repository
        let args = ResolveArgs {
            config: Some(config_path),
            all: true,
            quiet: true,
        };

        assert!(execute(args).is_ok());
    }
}
