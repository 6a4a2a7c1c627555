//! # Canon Naming Convention Inferencer
//!
//! File: cli/src/common/conventions/naming.rs
//!
//! ## Overview
//!
//! Classifies file names against a fixed set of conventions and picks the one
//! most of them follow. The result tells `discover` how an existing directory
//! names its files, and tells `generate` how to name new ones.
//!
//! ## Architecture
//!
//! - `Convention`: the tagged enum of supported styles, each with a regex.
//! - `infer_convention`: a pure majority vote over a list of names.
//! - `file_stem`: strips every extension (`Button.test.tsx` -> `Button`).
//!
//! Ties are broken by the declaration order of `Convention::ALL`
//! (PascalCase, then camelCase, then kebab-case). A name may satisfy more than
//! one convention (`button` is both camelCase and kebab-case); it then counts
//! for each of them.
//!
use heck::{ToKebabCase, ToLowerCamelCase, ToPascalCase};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::LazyLock;

static PASCAL_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Z][A-Za-z0-9]*$").expect("valid PascalCase regex"));
static CAMEL_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[a-z][A-Za-z0-9]*$").expect("valid camelCase regex"));
static KEBAB_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[a-z][a-z0-9]*(-[a-z0-9]+)*$").expect("valid kebab-case regex")
});

/// A file naming style.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Convention {
    #[serde(rename = "PascalCase")]
    PascalCase,
    #[serde(rename = "camelCase")]
    CamelCase,
    #[serde(rename = "kebab-case")]
    KebabCase,
}

impl Convention {
    /// Every convention, in tie-break priority order.
    pub const ALL: [Convention; 3] = [
        Convention::PascalCase,
        Convention::CamelCase,
        Convention::KebabCase,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Convention::PascalCase => "PascalCase",
            Convention::CamelCase => "camelCase",
            Convention::KebabCase => "kebab-case",
        }
    }

    fn pattern(self) -> &'static Regex {
        match self {
            Convention::PascalCase => &PASCAL_PATTERN,
            Convention::CamelCase => &CAMEL_PATTERN,
            Convention::KebabCase => &KEBAB_PATTERN,
        }
    }

    /// Whether `name` (already stripped of extensions) follows this convention.
    pub fn matches(self, name: &str) -> bool {
        self.pattern().is_match(name)
    }

    /// Rewrites `name` into this convention.
    pub fn apply(self, name: &str) -> String {
        match self {
            Convention::PascalCase => name.to_pascal_case(),
            Convention::CamelCase => name.to_lower_camel_case(),
            Convention::KebabCase => name.to_kebab_case(),
        }
    }
}

impl fmt::Display for Convention {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Outcome of a majority vote.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Inference {
    /// The winning convention, or the default when nothing was classified.
    pub convention: Convention,
    /// Match count per convention, in `Convention::ALL` order.
    pub counts: Vec<(Convention, usize)>,
    /// Number of names considered.
    pub total: usize,
    /// True when the result is the configured default rather than a vote.
    pub defaulted: bool,
}

impl Inference {
    /// Number of names matching the winning convention.
    pub fn winning_count(&self) -> usize {
        self.counts
            .iter()
            .find(|(c, _)| *c == self.convention)
            .map_or(0, |(_, n)| *n)
    }
}

/// Strips the directory part and every extension of a file name.
pub fn file_stem(name: &str) -> &str {
    let base = name.rsplit(['/', '\\']).next().unwrap_or(name);
    match base.find('.') {
        Some(0) | None => base,
        Some(idx) => &base[..idx],
    }
}

/// Test and barrel files say nothing about how a directory names its modules.
pub fn is_inference_candidate(file_name: &str) -> bool {
    let lower = file_name.to_lowercase();
    let stem = file_stem(&lower);
    !(stem.is_empty()
        || stem == "index"
        || lower.starts_with('.')
        || lower.contains(".test.")
        || lower.contains(".spec."))
}

/// Majority vote over `names`; extensions are stripped before matching.
///
/// Returns `default` when `names` is empty or no name matches any convention.
pub fn infer_convention<S: AsRef<str>>(names: &[S], default: Convention) -> Inference {
    let mut counts: Vec<(Convention, usize)> =
        Convention::ALL.iter().map(|c| (*c, 0usize)).collect();
    for name in names {
        let stem = file_stem(name.as_ref());
        for (convention, count) in counts.iter_mut() {
            if convention.matches(stem) {
                *count += 1;
            }
        }
    }

    // Strictly-greater keeps the earliest convention on ties.
    let mut best: Option<(Convention, usize)> = None;
    for (convention, count) in &counts {
        if *count > best.map_or(0, |(_, n)| n) {
            best = Some((*convention, *count));
        }
    }

    match best {
        Some((convention, _)) => Inference {
            convention,
            counts,
            total: names.len(),
            defaulted: false,
        },
        None => Inference {
            convention: default,
            counts,
            total: names.len(),
            defaulted: true,
        },
    }
}

// --- Unit Tests ---
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_infer_pascal() {
        let inference =
            infer_convention(&["Foo.tsx", "Bar.tsx", "Baz.tsx"], Convention::KebabCase);
        assert_eq!(inference.convention, Convention::PascalCase);
        assert_eq!(inference.winning_count(), 3);
        assert!(!inference.defaulted);
    }

    #[test]
    fn test_infer_camel() {
        let inference = infer_convention(&["foo.ts", "barBaz.ts"], Convention::PascalCase);
        assert_eq!(inference.convention, Convention::CamelCase);
        assert_eq!(inference.winning_count(), 2);
    }

    #[test]
    fn test_infer_kebab() {
        let inference = infer_convention(
            &["user-profile.ts", "auth-service.ts", "index"],
            Convention::PascalCase,
        );
        assert_eq!(inference.convention, Convention::KebabCase);
    }

    #[test]
    fn test_empty_input_returns_default() {
        let names: [&str; 0] = [];
        let inference = infer_convention(&names, Convention::KebabCase);
        assert_eq!(inference.convention, Convention::KebabCase);
        assert!(inference.defaulted);
        assert_eq!(inference.total, 0);
    }

    #[test]
    fn test_no_matches_returns_default() {
        let inference = infer_convention(&["snake_case.py", "_private.ts"], Convention::CamelCase);
        assert_eq!(inference.convention, Convention::CamelCase);
        assert!(inference.defaulted);
    }

    #[test]
    fn test_tie_prefers_priority_order() {
        // "footer2" counts for camelCase and kebab-case: every convention scores 1.
        let inference = infer_convention(&["Header.tsx", "footer2.tsx"], Convention::KebabCase);
        assert_eq!(inference.convention, Convention::PascalCase);

        // A single lowercase word matches camel and kebab equally: camel wins.
        let inference = infer_convention(&["button.ts"], Convention::PascalCase);
        assert_eq!(inference.convention, Convention::CamelCase);
    }

    #[test]
    fn test_file_stem() {
        assert_eq!(file_stem("Button.test.tsx"), "Button");
        assert_eq!(file_stem("src/components/Card.tsx"), "Card");
        assert_eq!(file_stem("Makefile"), "Makefile");
        assert_eq!(file_stem(".eslintrc.json"), ".eslintrc.json");
    }

    #[test]
    fn test_inference_candidates() {
        assert!(is_inference_candidate("Button.tsx"));
        assert!(!is_inference_candidate("Button.test.tsx"));
        assert!(!is_inference_candidate("api.spec.ts"));
        assert!(!is_inference_candidate("index.ts"));
        assert!(!is_inference_candidate(".DS_Store"));
    }

    #[test]
    fn test_apply_conventions() {
        assert_eq!(Convention::PascalCase.apply("login-form"), "LoginForm");
        assert_eq!(Convention::CamelCase.apply("LoginForm"), "loginForm");
        assert_eq!(Convention::KebabCase.apply("LoginForm"), "login-form");
        assert!(Convention::PascalCase.matches("LoginForm"));
        assert!(!Convention::PascalCase.matches("login-form"));
    }

    #[test]
    fn test_serde_spelling() {
        #[derive(Deserialize)]
        struct Wrapper {
            c: Convention,
        }
        let w: Wrapper = toml::from_str("c = \"kebab-case\"").unwrap();
        assert_eq!(w.c, Convention::KebabCase);
        assert!(toml::from_str::<Wrapper>("c = \"snake_case\"").is_err());
    }
}
