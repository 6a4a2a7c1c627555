//! # Canon CLI Integration Test Common Helpers
//!
//! File: cli/tests/common.rs
//!
//! ## Overview
//!
//! Shared helpers for the integration tests in `cli/tests/`. Each test file
//! declares `mod common;` and builds its synthetic project trees with these.
//!

// Allow potentially unused code in this common module, as different test files might use different helpers.
#![allow(dead_code)]

pub use assert_cmd::Command;
use std::fs;
use std::path::Path;
use tempfile::TempDir;

/// # Get Canon Command (`canon_cmd`)
///
/// An `assert_cmd::Command` for the compiled `canon` binary. The user
/// configuration is pointed at a file that never exists so a developer's own
/// `~/.config/canon/config.toml` cannot change test outcomes.
///
/// ## Panics
/// Panics if the `canon` binary cannot be found via `Command::cargo_bin`.
pub fn canon_cmd() -> Command {
    let mut cmd = Command::cargo_bin("canon").expect("Failed to find canon binary for testing");
    cmd.env("CANON_USER_CONFIG", "/nonexistent/canon/config.toml");
    cmd.env_remove("RUST_LOG");
    cmd
}

/// `canon_cmd()` with `--root` set to `root`.
pub fn canon_in(root: &Path) -> Command {
    let mut cmd = canon_cmd();
    cmd.arg("--root").arg(root);
    cmd
}

/// A temporary project root holding `dirs` and empty `files`.
///
/// A `.git` directory is always created so the `.canon.toml` search stops
/// at the temporary root.
pub fn project(dirs: &[&str], files: &[&str]) -> TempDir {
    let temp = tempfile::tempdir().expect("Failed to create temp project");
    fs::create_dir_all(temp.path().join(".git")).unwrap();
    for dir in dirs {
        fs::create_dir_all(temp.path().join(dir)).unwrap();
    }
    for file in files {
        let path = temp.path().join(file);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, "").unwrap();
    }
    temp
}
