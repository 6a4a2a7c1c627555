//! # Canon CLI Discover Integration Tests
//!
//! File: cli/tests/discover.rs
//!
//! Integration tests for `canon discover` against synthetic project trees.
//!

mod common;
use common::*;
use predicates::prelude::*;
use std::fs;

#[test]
fn test_discover_reports_duplicates() {
    let temp = project(
        &["src/components", "components", "lib/components"],
        &["src/components/Button.tsx", "src/components/Card.tsx"],
    );

    canon_in(temp.path())
        .args(["discover", "--no-context"])
        .assert()
        .success()
        .stdout(
            predicate::str::contains("components   src/components")
                .and(predicate::str::contains("! duplicate: components"))
                .and(predicate::str::contains("! duplicate: lib/components"))
                .and(predicate::str::contains("PascalCase (2/2 files)"))
                .and(predicate::str::contains("Forbidden locations present:")),
        );

    assert!(!temp.path().join(".canon").exists());
}

#[test]
fn test_discover_writes_context_file() {
    let temp = project(&["src/components", "docs"], &["package.json"]);

    canon_in(temp.path())
        .arg("discover")
        .assert()
        .success()
        .stdout(predicate::str::contains("Context written to .canon/CONTEXT.md"));

    let context = fs::read_to_string(temp.path().join(".canon/CONTEXT.md")).unwrap();
    assert!(context.starts_with("# Project Context"));
    assert!(context.contains("- **Language:** JavaScript"));
    assert!(context.contains("| components | `src/components` | yes | none |"));
}

#[test]
fn test_discover_search_term() {
    let temp = project(&["src/utils", "packages/web/utils"], &[]);

    canon_in(temp.path())
        .args(["discover", "utils", "--no-context"])
        .assert()
        .success()
        .stdout(
            predicate::str::contains("Directories named 'utils' (2 found):")
                .and(predicate::str::contains("canonical: packages/web/utils"))
                .and(predicate::str::contains("! duplicate: src/utils")),
        );
}

#[test]
fn test_discover_honours_project_config() {
    let temp = project(&["app/ui", "src/components"], &[]);
    fs::write(
        temp.path().join(".canon.toml"),
        "[roles]\ncomponents = \"app/ui\"\n\n[rules]\nforbidden = [\"src/components\"]\n",
    )
    .unwrap();

    canon_in(temp.path())
        .args(["discover", "--no-context"])
        .assert()
        .success()
        .stdout(
            predicate::str::contains("components   app/ui\n")
                .and(predicate::str::contains("Forbidden locations present:\n  src/components")),
        );
}
