//! End-to-end tests for the `resolve` command
//!
//! These tests invoke the actual CLI binary and validate its behavior
//! from a user's perspective.

mod common;

use assert_cmd::Command;
use assert_fs::prelude::*;
use predicates::prelude::*;

use common::{commit_file, git_available, init_repo, run_git};

fn tagver() -> Command {
    let mut cmd = Command::cargo_bin("tagver").expect("binary built");
    // Deterministic identity for tag assertions
    cmd.env("USER", "testbot");
    cmd
}

/// Test that --help flag shows help information
#[test]
#[cfg_attr(not(feature = "integration-tests"), ignore)]
fn test_resolve_help() {
    tagver()
        .arg("resolve")
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Resolve every workspace project"));
}

/// Test that a missing workspace descriptor produces an error
#[test]
#[cfg_attr(not(feature = "integration-tests"), ignore)]
fn test_resolve_missing_config() {
    tagver()
        .arg("resolve")
        .arg("--config")
        .arg("/nonexistent/tagver.yml")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Workspace descriptor not found"));
}

/// Test that an empty workspace resolves successfully with no output
#[test]
#[cfg_attr(not(feature = "integration-tests"), ignore)]
fn test_resolve_empty_workspace() {
    let temp = assert_fs::TempDir::new().unwrap();
    let config = temp.child("tagver.yml");
    config.write_str("projects: []\n").unwrap();

    tagver()
        .arg("resolve")
        .arg("--config")
        .arg(config.path())
        .assert()
        .success()
        .stdout(predicate::str::is_empty());
}

/// Test resolving a buildable project inside a real repository
#[test]
#[cfg_attr(not(feature = "integration-tests"), ignore)]
fn test_resolve_buildable_project() {
    if !git_available() {
        eprintln!("git not available, skipping");
        return;
    }
    let temp = assert_fs::TempDir::new().unwrap();
    init_repo(temp.path());
    commit_file(temp.path(), "api/main.rs", "fn main() {}");

    temp.child("api/Dockerfile").write_str("FROM scratch\n").unwrap();
    temp.child("api/tagver.yml")
        .write_str("image_prefix: team/\nregistry:\n  url: registry.example.com\n")
        .unwrap();
    temp.child("tagver.yml")
        .write_str("projects: [api]\n")
        .unwrap();
    run_git(temp.path(), &["add", "."]);
    run_git(temp.path(), &["commit", "-q", "-m", "add build metadata"]);

    tagver()
        .arg("resolve")
        .arg("--config")
        .arg(temp.path().join("tagver.yml"))
        .assert()
        .success()
        .stdout(
            predicate::str::contains("team/api")
                .and(predicate::str::contains("registry.example.com/team/api:")),
        );
}

/// Test that non-buildable projects only appear with --all
#[test]
#[cfg_attr(not(feature = "integration-tests"), ignore)]
fn test_resolve_non_buildable_listed_with_all() {
    let temp = assert_fs::TempDir::new().unwrap();
    temp.child("docs/readme.txt").write_str("docs").unwrap();
    temp.child("tagver.yml")
        .write_str("projects: [docs]\n")
        .unwrap();

    tagver()
        .arg("resolve")
        .arg("--config")
        .arg(temp.path().join("tagver.yml"))
        .assert()
        .success()
        .stdout(predicate::str::is_empty());

    tagver()
        .arg("resolve")
        .arg("--all")
        .arg("--config")
        .arg(temp.path().join("tagver.yml"))
        .assert()
        .success()
        .stdout(predicate::str::contains("(not buildable)"));
}

/// Test that a VCS failure aborts only the failing project
#[test]
#[cfg_attr(not(feature = "integration-tests"), ignore)]
fn test_resolve_reports_vcs_failure() {
    if !git_available() {
        eprintln!("git not available, skipping");
        return;
    }
    // Buildable project outside any repository: version resolution fails
    let temp = assert_fs::TempDir::new().unwrap();
    temp.child("api/Dockerfile").write_str("FROM scratch\n").unwrap();
    temp.child("tagver.yml")
        .write_str("projects: [api]\n")
        .unwrap();

    tagver()
        .arg("resolve")
        .arg("--config")
        .arg(temp.path().join("tagver.yml"))
        .assert()
        .failure()
        .stderr(predicate::str::contains("failed to resolve"));
}
