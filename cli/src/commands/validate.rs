//! # Canon Validate Command
//!
//! File: cli/src/commands/validate.rs
//!
//! ## Overview
//!
//! Implements `canon validate <feature_name>`, the check to run before
//! creating a feature. It reports:
//!
//! - duplicate directories for any role,
//! - forbidden locations that exist,
//! - existing files whose stem is the feature name modulo case and separators
//!   (`LoginForm`, `login-form` and `login_form` all collide),
//! - with `--kind`, a feature name that does not follow the naming configured
//!   for that kind's role.
//!
//! Any issue fails the command with `ValidationFailed` (exit 1); `--force`
//! downgrades them to warnings.
//!
//! ## Examples
//!
//! ```bash
//! canon validate LoginForm --kind component
//! canon validate formatDate --force
//! ```
//!
use crate::commands::Workspace;
use crate::common::conventions::naming::{file_stem, Convention};
use crate::common::conventions::report::{build_report, DiscoveryReport};
use crate::common::fs::scan::{list_files, relative_path};
use crate::common::scaffold::kinds::FeatureKind;
use crate::core::config::Config;
use crate::core::error::{CanonError, Result};
use clap::Parser;
use heck::ToSnakeCase;
use std::fmt;
use tracing::{info, warn};

/// Arguments for `canon validate`.
#[derive(Parser, Debug)]
pub struct ValidateArgs {
    /// Name of the feature you are about to create.
    pub feature_name: String,

    /// Kind of feature (component, utility, api, hook); enables the naming check.
    #[arg(long)]
    pub kind: Option<String>,

    /// Report issues as warnings and exit successfully.
    #[arg(long)]
    pub force: bool,
}

/// One problem found by `canon validate`. Paths are root-relative.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Issue {
    Duplicate {
        role: String,
        canonical: String,
        path: String,
    },
    Forbidden {
        path: String,
    },
    Conflict {
        path: String,
    },
    Naming {
        name: String,
        kind: FeatureKind,
        expected: Convention,
    },
}

impl fmt::Display for Issue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Issue::Duplicate {
                role,
                canonical,
                path,
            } => write!(
                f,
                "duplicate '{}' directory at {} (canonical: {})",
                role, path, canonical
            ),
            Issue::Forbidden { path } => write!(f, "forbidden location exists: {}", path),
            Issue::Conflict { path } => write!(f, "a file with this name already exists: {}", path),
            Issue::Naming {
                name,
                kind,
                expected,
            } => write!(
                f,
                "'{}' does not follow {} naming expected for a {} (try '{}')",
                name,
                expected,
                kind,
                expected.apply(name)
            ),
        }
    }
}

fn normalized(name: &str) -> String {
    name.to_snake_case()
}

pub fn handle_validate(args: ValidateArgs, workspace: &Workspace) -> Result<()> {
    info!("Validating feature name '{}'", args.feature_name);
    let kind = args
        .kind
        .as_deref()
        .map(str::parse::<FeatureKind>)
        .transpose()?;
    let (root, cfg) = workspace.load()?;
    let report = build_report(&root, &cfg, None)?;
    let issues = collect_issues(&args.feature_name, kind, &report, &cfg)?;

    if issues.is_empty() {
        println!("No issues found for '{}'.", args.feature_name);
        return Ok(());
    }

    if args.force {
        for issue in &issues {
            warn!("{}", issue);
            println!("warning: {}", issue);
        }
        println!(
            "{} issue(s) ignored for '{}' (--force).",
            issues.len(),
            args.feature_name
        );
        return Ok(());
    }

    println!("Issues for '{}':", args.feature_name);
    for issue in &issues {
        println!("  - {}", issue);
    }
    anyhow::bail!(CanonError::ValidationFailed {
        count: issues.len()
    })
}

/// Every issue that creating `name` would run into, in a stable order.
pub fn collect_issues(
    name: &str,
    kind: Option<FeatureKind>,
    report: &DiscoveryReport,
    config: &Config,
) -> Result<Vec<Issue>> {
    let root = &report.root;
    let mut issues = Vec::new();

    for role in report.roles.iter().filter(|r| r.has_violations()) {
        let canonical = relative_path(&role.canonical, root);
        for violation in &role.violations {
            issues.push(Issue::Duplicate {
                role: role.role.clone(),
                canonical: canonical.clone(),
                path: relative_path(violation, root),
            });
        }
    }

    for path in &report.forbidden {
        issues.push(Issue::Forbidden {
            path: relative_path(path, root),
        });
    }

    let wanted = normalized(name);
    if !wanted.is_empty() {
        for file in list_files(root, root, &config.scan.ignore, None)? {
            let Some(file_name) = file.file_name().map(|n| n.to_string_lossy()) else {
                continue;
            };
            if normalized(file_stem(&file_name)) == wanted {
                issues.push(Issue::Conflict {
                    path: relative_path(&file, root),
                });
            }
        }
    }

    if let Some(kind) = kind {
        let template = kind.template();
        let expected = config.convention_for(template.role);
        let stem = name.trim();
        if !expected.matches(stem) {
            issues.push(Issue::Naming {
                name: stem.to_string(),
                kind,
                expected,
            });
        }
    }

    Ok(issues)
}
