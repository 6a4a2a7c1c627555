//! # Canon Context Writer
//!
//! File: cli/src/common/context.rs
//!
//! ## Overview
//!
//! Renders a `DiscoveryReport` into the Markdown context file (by default
//! `.canon/CONTEXT.md`) so editors and assistants can read the project's
//! canonical layout without re-running discovery. The file is replaced
//! wholesale on every run.
//!
//! The layout comes from `cli/templates/context.md.tera`, which can be
//! overridden with a `context.md.tera` in the configured template directory.
//!
use crate::common::conventions::report::DiscoveryReport;
use crate::common::fs::io::write_string_to_file;
use crate::common::fs::scan::relative_path;
use crate::core::config::Config;
use crate::core::error::Result;
use crate::core::templating::{render_str, resolve_template};
use serde::Serialize;
use std::path::PathBuf;
use tracing::info;

const CONTEXT_TEMPLATE_NAME: &str = "context.md.tera";
const CONTEXT_TEMPLATE: &str = include_str!("../../templates/context.md.tera");

#[derive(Serialize)]
struct RoleRow {
    role: String,
    canonical: String,
    found: bool,
    violations: Vec<String>,
}

#[derive(Serialize)]
struct ConventionRow {
    role: String,
    directory: String,
    expected: String,
    observed: String,
    matching: usize,
    total: usize,
    mismatch: bool,
}

/// Renders the context document for `report`, stamped with `generated_at`.
pub fn render_context(
    report: &DiscoveryReport,
    config: &Config,
    generated_at: &str,
) -> Result<String> {
    let root = &report.root;
    let roles: Vec<RoleRow> = report
        .roles
        .iter()
        .map(|r| RoleRow {
            role: r.role.clone(),
            canonical: relative_path(&r.canonical, root),
            found: r.found,
            violations: r.violations.iter().map(|v| relative_path(v, root)).collect(),
        })
        .collect();
    let conventions: Vec<ConventionRow> = report
        .conventions
        .iter()
        .map(|c| ConventionRow {
            role: c.role.clone(),
            directory: relative_path(&c.directory, root),
            expected: c.expected.to_string(),
            observed: c.inference.convention.to_string(),
            matching: c.inference.winning_count(),
            total: c.inference.total,
            mismatch: c.is_mismatch(),
        })
        .collect();
    let forbidden: Vec<String> = report
        .forbidden
        .iter()
        .map(|p| relative_path(p, root))
        .collect();

    let mut context = tera::Context::new();
    context.insert("generated_at", generated_at);
    context.insert("root", &root.display().to_string());
    context.insert("language", &report.project.language);
    context.insert("framework", &report.project.framework);
    context.insert("build_system", &report.project.build_system);
    context.insert("roles", &roles);
    context.insert("conventions", &conventions);
    context.insert("forbidden", &forbidden);

    let template = resolve_template(
        config.templates.directory.as_deref(),
        CONTEXT_TEMPLATE_NAME,
        CONTEXT_TEMPLATE,
    )?;
    render_str(CONTEXT_TEMPLATE_NAME, &template, &context)
}

/// Writes the context file under the report's root and returns its path.
pub fn write_context(report: &DiscoveryReport, config: &Config) -> Result<PathBuf> {
    let generated_at = chrono::Local::now().format("%Y-%m-%d %H:%M:%S %Z").to_string();
    let content = render_context(report, config, &generated_at)?;
    let path = report.root.join(&config.context.file);
    write_string_to_file(&path, &content)?;
    info!("Context written to {}", path.display());
    Ok(path)
}
