//! # Canon Discovery Report
//!
//! File: cli/src/common/conventions/report.rs
//!
//! ## Overview
//!
//! Runs one full discovery pass over a project and gathers the results into a
//! `DiscoveryReport`: project type, the canonical directory and violations for
//! every role, the naming convention observed in each canonical directory, the
//! forbidden locations present, and optionally the matches for an extra
//! search term.
//!
//! The report is recomputed from scratch on every run and is consumed by
//! `canon discover` (printing), `canon validate` (issues) and the context
//! writer.
//!
use crate::common::conventions::detector::{detect_project, ProjectInfo};
use crate::common::conventions::duplicates::{
    detect_duplicates, role_basenames, select_canonical, RoleReport,
};
use crate::common::conventions::forbidden::find_forbidden;
use crate::common::conventions::naming::{
    infer_convention, is_inference_candidate, Convention, Inference,
};
use crate::common::fs::scan::{list_files, resolve_root, scan_directories, scan_matching};
use crate::core::config::{basename_of, Config};
use crate::core::error::Result;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Naming observed in a role's canonical directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConventionFinding {
    pub role: String,
    pub directory: PathBuf,
    pub expected: Convention,
    pub inference: Inference,
}

impl ConventionFinding {
    /// A vote that disagrees with the configuration. Defaulted results never do.
    pub fn is_mismatch(&self) -> bool {
        !self.inference.defaulted && self.inference.convention != self.expected
    }
}

/// Every directory matching a user-supplied name or glob.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchReport {
    pub term: String,
    pub matches: Vec<PathBuf>,
    /// Canonical pick among `matches`, preferring a role path that ends in `term`.
    pub canonical: Option<PathBuf>,
    pub violations: Vec<PathBuf>,
}

/// Result of one discovery pass.
#[derive(Debug, Clone)]
pub struct DiscoveryReport {
    pub root: PathBuf,
    pub project: ProjectInfo,
    pub roles: Vec<RoleReport>,
    pub conventions: Vec<ConventionFinding>,
    pub forbidden: Vec<PathBuf>,
    pub search: Option<SearchReport>,
}

impl DiscoveryReport {
    pub fn violation_count(&self) -> usize {
        self.roles.iter().map(|r| r.violations.len()).sum()
    }
}

/// Scans `root` and builds the full report.
pub fn build_report(root: &Path, config: &Config, search: Option<&str>) -> Result<DiscoveryReport> {
    let root = resolve_root(root)?;
    info!("Discovering project structure under {}", root.display());

    let project = detect_project(&root);
    debug!("Project info: {:?}", project);

    let scan = scan_directories(&root, &role_basenames(config), &config.scan.ignore)?;
    let roles = detect_duplicates(&scan, config, &root);

    let mut conventions = Vec::new();
    for report in roles.iter().filter(|r| r.found) {
        conventions.push(infer_role_convention(report, config, &root)?);
    }

    let forbidden = find_forbidden(&root, &config.rules.forbidden, &config.scan.ignore)?;

    let search = search
        .map(|term| search_term(&root, config, term))
        .transpose()?;

    info!(
        "Discovery finished: {} role(s), {} violation(s), {} forbidden location(s)",
        roles.len(),
        roles.iter().map(|r| r.violations.len()).sum::<usize>(),
        forbidden.len()
    );

    Ok(DiscoveryReport {
        root,
        project,
        roles,
        conventions,
        forbidden,
        search,
    })
}

/// Every directory whose name matches `term` (a name or glob) and its canonical pick.
fn search_term(root: &Path, config: &Config, term: &str) -> Result<SearchReport> {
    let matches = scan_matching(root, term, &config.scan.ignore)?;
    let preferred = config
        .roles
        .values()
        .find(|p| basename_of(p) == Some(term))
        .map(String::as_str)
        .unwrap_or(term);
    let (canonical, violations) = match select_canonical(&matches, root, preferred) {
        Some((c, v)) => (Some(c), v),
        None => (None, Vec::new()),
    };
    Ok(SearchReport {
        term: term.to_string(),
        matches,
        canonical,
        violations,
    })
}

/// Majority convention of the files in a role's canonical directory.
pub fn infer_role_convention(
    report: &RoleReport,
    config: &Config,
    root: &Path,
) -> Result<ConventionFinding> {
    let files = list_files(&report.canonical, root, &config.scan.ignore, None)?;
    let names: Vec<String> = files
        .iter()
        .filter_map(|p| p.file_name().map(|n| n.to_string_lossy().into_owned()))
        .filter(|n| is_inference_candidate(n))
        .collect();
    let inference = infer_convention(&names, config.naming.default);
    debug!(
        "Role '{}': {} candidate file(s), inferred {}",
        report.role,
        names.len(),
        inference.convention
    );
    Ok(ConventionFinding {
        role: report.role.clone(),
        directory: report.canonical.clone(),
        expected: config.convention_for(&report.role),
        inference,
    })
}
