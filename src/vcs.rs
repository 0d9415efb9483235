//! # Version Control Adapter
//!
//! This module defines the [`VcsAdapter`] trait - the boundary through which
//! the version resolver observes repository state - and [`GitCli`], the
//! production implementation that shells out to the system `git` binary.
//!
//! Using the system git command automatically handles whatever repository
//! layout, hooks and configuration the user already has; no re-implementation
//! of git internals is attempted.
//!
//! ## Path scoping
//!
//! Every query that takes a path set is scoped to those paths: commit depth
//! counts only commits whose diff touches at least one path (each commit
//! counted once, merge commits included), the head revision is the newest
//! such commit, and dirtiness ignores modifications outside the set.
//!
//! ## Timeouts
//!
//! Each git invocation runs under a bounded timeout (default 30s). A hung
//! subprocess fails that one resolution instead of stalling the whole run,
//! which matters when many projects resolve concurrently.

use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};
use std::time::{Duration, Instant};

use crate::error::{Error, Result};

/// Default bound on a single git subprocess.
pub const DEFAULT_GIT_TIMEOUT: Duration = Duration::from_secs(30);

/// Version-control facts consumed by the version resolver.
///
/// All path sets are interpreted within a single working tree.
pub trait VcsAdapter: Send + Sync {
    /// Current branch name, or a detached-head indicator.
    fn current_branch(&self) -> Result<String>;

    /// Count of commits touching any of the given paths, as reported by
    /// the VCS (kept as a string; it is only ever embedded in tags).
    fn commit_depth(&self, paths: &[PathBuf]) -> Result<String>;

    /// Full identifier of the most recent commit touching the given paths.
    fn head_revision(&self, paths: &[PathBuf]) -> Result<String>;

    /// Abbreviated form of a revision identifier.
    fn abbreviate(&self, revision: &str) -> Result<String>;

    /// Whether any of the given paths has uncommitted modifications.
    fn is_dirty(&self, paths: &[PathBuf]) -> Result<bool>;

    /// Resolve project-relative paths to absolute, deduplicated paths
    /// within the working tree.
    fn resolve_paths(&self, paths: &[PathBuf]) -> Result<Vec<PathBuf>>;
}

/// `VcsAdapter` implementation backed by the system `git` command.
#[derive(Debug, Clone)]
pub struct GitCli {
    work_dir: PathBuf,
    timeout: Duration,
}

impl GitCli {
    /// Create an adapter running git commands from `work_dir`.
    pub fn new(work_dir: impl Into<PathBuf>) -> Self {
        GitCli {
            work_dir: work_dir.into(),
            timeout: DEFAULT_GIT_TIMEOUT,
        }
    }

    /// Override the per-command timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Run a git command, enforcing the timeout, and return trimmed stdout.
    fn run(&self, args: &[&str]) -> Result<String> {
        let rendered = args.join(" ");

        let mut child = Command::new("git")
            .args(args)
            .current_dir(&self.work_dir)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(|e| Error::vcs(rendered.as_str(), e.to_string()))?;

        let deadline = Instant::now() + self.timeout;
        loop {
            match child
                .try_wait()
                .map_err(|e| Error::vcs(rendered.as_str(), e.to_string()))?
            {
                Some(_) => break,
                None if Instant::now() >= deadline => {
                    let _ = child.kill();
                    let _ = child.wait();
                    return Err(Error::vcs(
                        rendered.as_str(),
                        format!("timed out after {:?}", self.timeout),
                    ));
                }
                None => std::thread::sleep(Duration::from_millis(10)),
            }
        }

        let output = child
            .wait_with_output()
            .map_err(|e| Error::vcs(rendered.as_str(), e.to_string()))?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(Error::vcs(rendered.as_str(), stderr.trim().to_string()));
        }

        Ok(String::from_utf8_lossy(&output.stdout).trim().to_string())
    }

    /// Run a path-scoped git command: `git <args> -- <paths>`.
    fn run_scoped(&self, args: &[&str], paths: &[PathBuf]) -> Result<String> {
        let mut full: Vec<String> = args.iter().map(|s| s.to_string()).collect();
        full.push("--".to_string());
        for path in paths {
            full.push(path.to_string_lossy().into_owned());
        }
        let refs: Vec<&str> = full.iter().map(String::as_str).collect();
        self.run(&refs)
    }
}

impl VcsAdapter for GitCli {
    fn current_branch(&self) -> Result<String> {
        self.run(&["rev-parse", "--abbrev-ref", "HEAD"])
    }

    fn commit_depth(&self, paths: &[PathBuf]) -> Result<String> {
        self.run_scoped(&["rev-list", "--count", "HEAD"], paths)
    }

    fn head_revision(&self, paths: &[PathBuf]) -> Result<String> {
        let revision = self.run_scoped(&["rev-list", "-1", "HEAD"], paths)?;
        if revision.is_empty() {
            return Err(Error::vcs(
                "rev-list -1 HEAD",
                "no commits touch the given paths",
            ));
        }
        Ok(revision)
    }

    fn abbreviate(&self, revision: &str) -> Result<String> {
        self.run(&["rev-parse", "--short", revision])
    }

    fn is_dirty(&self, paths: &[PathBuf]) -> Result<bool> {
        let status = self.run_scoped(&["status", "--porcelain"], paths)?;
        Ok(!status.is_empty())
    }

    fn resolve_paths(&self, paths: &[PathBuf]) -> Result<Vec<PathBuf>> {
        let mut resolved: Vec<PathBuf> = Vec::with_capacity(paths.len());
        for path in paths {
            let absolute = if path.is_absolute() {
                path.clone()
            } else {
                self.work_dir.join(path)
            };
            // Canonicalize so symlinked or differently-spelled duplicates
            // collapse to one entry
            let canonical = absolute.canonicalize().map_err(|e| {
                Error::vcs(
                    "resolve-paths",
                    format!("{}: {}", absolute.display(), e),
                )
            })?;
            if !resolved.contains(&canonical) {
                resolved.push(canonical);
            }
        }
        Ok(resolved)
    }
}

/// Deduplicate a path list, preserving first-occurrence order.
pub fn dedup_paths(paths: &[PathBuf]) -> Vec<PathBuf> {
    let mut unique: Vec<PathBuf> = Vec::with_capacity(paths.len());
    for path in paths {
        if !unique.contains(path) {
            unique.push(path.clone());
        }
    }
    unique
}
