//! # Canon Discover Command
//!
//! File: cli/src/commands/discover.rs
//!
//! ## Overview
//!
//! Implements `canon discover`: scans the project, prints the canonical
//! location and violations for every role, the naming convention observed in
//! each canonical directory, the forbidden locations that exist, and, when a
//! search term is given, every directory carrying that name. Unless
//! `--no-context` is passed, the same report is written to the context file.
//!
//! ## Examples
//!
//! ```bash
//! canon discover
//! canon --root ../web discover utils --no-context
//! ```
//!
//! Example output:
//!
//! ```text
//! Project: TypeScript (Next.js), pnpm
//! Root: /home/user/web
//!
//! Canonical locations:
//!   api          src/api (missing)
//!   components   src/components
//!                ! duplicate: components
//!                ! duplicate: lib/components
//!
//! Naming conventions:
//!   components   PascalCase (12/12 files)
//!
//! Forbidden locations present:
//!   components
//!   lib/components
//! ```
//!
use crate::commands::Workspace;
use crate::common::context::write_context;
use crate::common::conventions::report::{build_report, DiscoveryReport};
use crate::common::fs::scan::relative_path;
use crate::core::error::Result;
use clap::Parser;
use std::fmt::{self, Write};
use tracing::info;

/// Arguments for `canon discover`.
#[derive(Parser, Debug)]
pub struct DiscoverArgs {
    /// Also report every directory with this name and its canonical pick.
    pub search_term: Option<String>,

    /// Do not write the context file.
    #[arg(long)]
    pub no_context: bool,
}

pub fn handle_discover(args: DiscoverArgs, workspace: &Workspace) -> Result<()> {
    info!("Handling discover command...");
    let (root, cfg) = workspace.load()?;
    let report = build_report(&root, &cfg, args.search_term.as_deref())?;

    print!("{}", format_report(&report)?);

    if args.no_context {
        info!("Skipping context file (--no-context).");
    } else {
        let path = write_context(&report, &cfg)?;
        println!("\nContext written to {}", relative_path(&path, &report.root));
    }
    Ok(())
}

/// Human-readable report, as printed by `canon discover`.
pub fn format_report(report: &DiscoveryReport) -> std::result::Result<String, fmt::Error> {
    let root = &report.root;
    let mut out = String::new();

    let project = &report.project;
    match &project.framework {
        Some(framework) => writeln!(
            out,
            "Project: {} ({}), {}",
            project.language, framework, project.build_system
        )?,
        None => writeln!(out, "Project: {}, {}", project.language, project.build_system)?,
    }
    writeln!(out, "Root: {}", root.display())?;

    writeln!(out, "\nCanonical locations:")?;
    for role in &report.roles {
        let canonical = relative_path(&role.canonical, root);
        let configured = role.preferred.trim_start_matches("./").trim_end_matches('/');
        let note = if !role.found {
            " (missing)".to_string()
        } else if canonical != configured {
            format!(" (configured: {})", configured)
        } else {
            String::new()
        };
        writeln!(out, "  {:<12} {}{}", role.role, canonical, note)?;
        for violation in &role.violations {
            writeln!(out, "  {:<12} ! duplicate: {}", "", relative_path(violation, root))?;
        }
    }

    writeln!(out, "\nNaming conventions:")?;
    if report.conventions.is_empty() {
        writeln!(out, "  (no canonical directories exist yet)")?;
    }
    for finding in &report.conventions {
        let inference = &finding.inference;
        let observed = if inference.defaulted {
            format!("{} (default, no classifiable files)", inference.convention)
        } else {
            format!(
                "{} ({}/{} files)",
                inference.convention,
                inference.winning_count(),
                inference.total
            )
        };
        let expected = if finding.is_mismatch() {
            format!(", expected {}", finding.expected)
        } else {
            String::new()
        };
        writeln!(out, "  {:<12} {}{}", finding.role, observed, expected)?;
    }

    if !report.forbidden.is_empty() {
        writeln!(out, "\nForbidden locations present:")?;
        for path in &report.forbidden {
            writeln!(out, "  {}", relative_path(path, root))?;
        }
    }

    if let Some(search) = &report.search {
        writeln!(
            out,
            "\nDirectories named '{}' ({} found):",
            search.term,
            search.matches.len()
        )?;
        match &search.canonical {
            Some(canonical) => {
                writeln!(out, "  canonical: {}", relative_path(canonical, root))?;
                for violation in &search.violations {
                    writeln!(out, "  ! duplicate: {}", relative_path(violation, root))?;
                }
            }
            None => writeln!(out, "  none found")?,
        }
    }

    let count = report.violation_count();
    if count > 0 {
        writeln!(out, "\n{} duplicate location(s) found.", count)?;
    }
    Ok(out)
}
