//! Shared test utilities for integration and E2E tests.
//!
//! Helpers for building throwaway git repositories. Tests that exercise a
//! real repository call [`git_available`] first and return early when the
//! git binary is missing, so the suite degrades gracefully on minimal
//! environments.

#![allow(dead_code)]

use std::fs;
use std::path::Path;
use std::process::{Command, Stdio};

/// Whether the system git binary is usable.
pub fn git_available() -> bool {
    Command::new("git")
        .arg("--version")
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .status()
        .map(|status| status.success())
        .unwrap_or(false)
}

/// Run a git command in `dir`, panicking on failure.
pub fn run_git(dir: &Path, args: &[&str]) {
    let status = Command::new("git")
        .args(args)
        .current_dir(dir)
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .status()
        .expect("git invocation");
    assert!(status.success(), "git {:?} failed in {}", args, dir.display());
}

/// Initialize a repository with commit identity configured.
pub fn init_repo(dir: &Path) {
    run_git(dir, &["init", "-q", "-b", "main"]);
    run_git(dir, &["config", "user.email", "test@example.com"]);
    run_git(dir, &["config", "user.name", "Test"]);
    run_git(dir, &["config", "commit.gpgsign", "false"]);
}

/// Write a file and commit it.
pub fn commit_file(dir: &Path, relative: &str, content: &str) {
    let path = dir.join(relative);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).unwrap();
    }
    fs::write(&path, content).unwrap();
    run_git(dir, &["add", relative]);
    run_git(dir, &["commit", "-q", "-m", &format!("update {}", relative)]);
}
