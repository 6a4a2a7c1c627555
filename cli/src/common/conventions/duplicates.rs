//! # Canon Duplicate Detector
//!
//! File: cli/src/common/conventions/duplicates.rs
//!
//! ## Overview
//!
//! Given every directory that shares a role's basename, picks the one that is
//! canonical for the role and reports the others as violations. Pure and
//! read-only: the scan is done beforehand by `common::fs::scan`.
//!
//! ## Selection rule
//!
//! Candidates are compared by their root-relative, `/`-separated form:
//!
//! 1. a candidate equal to the configured path wins;
//! 2. otherwise the lexicographically first candidate containing the configured path;
//! 3. otherwise the lexicographically first candidate.
//!
//! When no directory exists for a role, the configured path under the root is
//! reported as canonical with `found == false`.
//!
use crate::common::fs::scan::{relative_path, ScanResult};
use crate::core::config::Config;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Canonical location and violations for one role.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoleReport {
    pub role: String,
    /// Configured relative path, also the preferred substring.
    pub preferred: String,
    /// The chosen path, or `root/preferred` when nothing was found.
    pub canonical: PathBuf,
    /// False when `canonical` is the configured default and does not exist.
    pub found: bool,
    pub violations: Vec<PathBuf>,
}

impl RoleReport {
    pub fn has_violations(&self) -> bool {
        !self.violations.is_empty()
    }
}

fn normalize(preferred: &str) -> &str {
    preferred.trim_start_matches("./").trim_end_matches('/')
}

/// Splits `paths` into the canonical path and the violations.
///
/// Returns `None` when `paths` is empty.
pub fn select_canonical(
    paths: &[PathBuf],
    root: &Path,
    preferred: &str,
) -> Option<(PathBuf, Vec<PathBuf>)> {
    let preferred = normalize(preferred);
    let mut ranked: Vec<(String, &PathBuf)> = paths
        .iter()
        .map(|p| (relative_path(p, root), p))
        .collect();
    ranked.sort_by(|a, b| a.0.cmp(&b.0));
    ranked.dedup_by(|a, b| a.0 == b.0);

    let chosen = ranked
        .iter()
        .position(|(rel, _)| rel == preferred)
        .or_else(|| {
            ranked
                .iter()
                .position(|(rel, _)| !preferred.is_empty() && rel.contains(preferred))
        })
        .or_else(|| (!ranked.is_empty()).then_some(0))?;

    let canonical = ranked[chosen].1.clone();
    let violations = ranked
        .iter()
        .enumerate()
        .filter(|(i, _)| *i != chosen)
        .map(|(_, (_, p))| (*p).clone())
        .collect();
    debug!(
        "Canonical for '{}' is '{}'",
        preferred,
        canonical.display()
    );
    Some((canonical, violations))
}

/// Builds the report for one role from the paths found for its basename.
pub fn detect_role(role: &str, preferred: &str, paths: &[PathBuf], root: &Path) -> RoleReport {
    match select_canonical(paths, root, preferred) {
        Some((canonical, violations)) => RoleReport {
            role: role.to_string(),
            preferred: preferred.to_string(),
            canonical,
            found: true,
            violations,
        },
        None => RoleReport {
            role: role.to_string(),
            preferred: preferred.to_string(),
            canonical: root.join(normalize(preferred)),
            found: false,
            violations: Vec::new(),
        },
    }
}

/// Reports every configured role, in role-name order.
pub fn detect_duplicates(scan: &ScanResult, config: &Config, root: &Path) -> Vec<RoleReport> {
    config
        .roles
        .iter()
        .map(|(role, preferred)| {
            let paths = config
                .role_basename(role)
                .and_then(|b| scan.get(b))
                .map(Vec::as_slice)
                .unwrap_or(&[]);
            detect_role(role, preferred, paths, root)
        })
        .collect()
}

/// Basenames the scanner has to look for to cover every configured role.
pub fn role_basenames(config: &Config) -> Vec<&str> {
    let mut names: Vec<&str> = config
        .roles
        .keys()
        .filter_map(|role| config.role_basename(role))
        .collect();
    names.sort_unstable();
    names.dedup();
    names
}

// --- Unit Tests ---
#[cfg(test)]
mod tests {
    use super::*;

    fn paths(root: &Path, rels: &[&str]) -> Vec<PathBuf> {
        rels.iter().map(|r| root.join(r)).collect()
    }

    #[test]
    fn test_preferred_path_wins() {
        let root = Path::new("/project");
        let found = paths(root, &["components", "lib/components", "src/components"]);

        let (canonical, violations) = select_canonical(&found, root, "src/components").unwrap();
        assert_eq!(canonical, root.join("src/components"));
        assert_eq!(
            violations,
            vec![root.join("components"), root.join("lib/components")]
        );
    }

    #[test]
    fn test_exact_match_beats_earlier_substring_match() {
        let root = Path::new("/project");
        let found = paths(root, &["apps/src/components", "src/components"]);

        let (canonical, _) = select_canonical(&found, root, "src/components").unwrap();
        assert_eq!(canonical, root.join("src/components"));
    }

    #[test]
    fn test_substring_then_lexicographic_fallback() {
        let root = Path::new("/project");
        let found = paths(root, &["web/src/components", "app/src/components", "components"]);
        let (canonical, _) = select_canonical(&found, root, "src/components").unwrap();
        assert_eq!(canonical, root.join("app/src/components"));

        let found = paths(root, &["z/components", "b/components"]);
        let (canonical, violations) = select_canonical(&found, root, "src/components").unwrap();
        assert_eq!(canonical, root.join("b/components"));
        assert_eq!(violations, vec![root.join("z/components")]);
    }

    #[test]
    fn test_selection_is_deterministic() {
        let root = Path::new("/project");
        let found = paths(root, &["lib/components", "components", "src/components"]);
        let mut shuffled = found.clone();
        shuffled.reverse();

        let first = select_canonical(&found, root, "src/components");
        let second = select_canonical(&found, root, "src/components");
        let reversed = select_canonical(&shuffled, root, "src/components");
        assert_eq!(first, second);
        assert_eq!(first, reversed);
    }

    #[test]
    fn test_missing_role_uses_configured_default() {
        let root = Path::new("/project");
        let report = detect_role("hooks", "src/hooks", &[], root);
        assert!(!report.found);
        assert_eq!(report.canonical, root.join("src/hooks"));
        assert!(!report.has_violations());
    }

    #[test]
    fn test_detect_duplicates_covers_every_role() {
        let root = Path::new("/project");
        let mut scan = ScanResult::new();
        scan.insert(
            "components".into(),
            paths(root, &["components", "lib/components", "src/components"]),
        );
        scan.insert("docs".into(), paths(root, &["docs"]));

        let config = Config::default();
        let reports = detect_duplicates(&scan, &config, root);
        assert_eq!(reports.len(), config.roles.len());

        let components = reports.iter().find(|r| r.role == "components").unwrap();
        assert_eq!(components.canonical, root.join("src/components"));
        assert_eq!(components.violations.len(), 2);

        let docs = reports.iter().find(|r| r.role == "docs").unwrap();
        assert!(docs.found);
        assert!(!docs.has_violations());
    }

    #[test]
    fn test_role_basenames_deduplicated() {
        let config = Config::default();
        let basenames = role_basenames(&config);
        assert_eq!(
            basenames,
            vec!["api", "components", "docs", "hooks", "lib", "tests"]
        );
    }
}
