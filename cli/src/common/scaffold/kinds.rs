//! # Canon Feature Kinds
//!
//! File: cli/src/common/scaffold/kinds.rs
//!
//! ## Overview
//!
//! The kinds of feature `canon generate` knows how to scaffold, and the table
//! that maps each kind to its role directory, file naming, extension and
//! built-in templates. Adding a kind means adding a variant and a table row;
//! the emitter itself has no per-kind branches.
//!
//! | kind      | role       | file stem          | ext   |
//! |-----------|------------|--------------------|-------|
//! | component | components | PascalCase         | `tsx` |
//! | utility   | lib        | camelCase          | `ts`  |
//! | api       | api        | kebab-case         | `ts`  |
//! | hook      | hooks      | `use` + PascalCase | `ts`  |
//!
use crate::common::conventions::naming::Convention;
use crate::core::error::CanonError;
use heck::ToPascalCase;
use std::fmt;
use std::str::FromStr;

/// A kind of feature that can be scaffolded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FeatureKind {
    Component,
    Utility,
    Api,
    Hook,
}

/// Everything the emitter needs to know about one kind.
#[derive(Debug)]
pub struct KindTemplate {
    pub kind: FeatureKind,
    pub name: &'static str,
    /// Role whose configured directory receives the implementation file.
    pub role: &'static str,
    /// Naming applied to the feature name to get the file stem.
    pub convention: Convention,
    /// Prepended to the converted stem (`use` for hooks).
    pub prefix: &'static str,
    pub extension: &'static str,
    pub test_template: &'static str,
    pub impl_template: &'static str,
}

/// Rows are in `FeatureKind` declaration order.
static KIND_TABLE: [KindTemplate; 4] = [
    KindTemplate {
        kind: FeatureKind::Component,
        name: "component",
        role: "components",
        convention: Convention::PascalCase,
        prefix: "",
        extension: "tsx",
        test_template: include_str!("../../../templates/component.test.tera"),
        impl_template: include_str!("../../../templates/component.impl.tera"),
    },
    KindTemplate {
        kind: FeatureKind::Utility,
        name: "utility",
        role: "lib",
        convention: Convention::CamelCase,
        prefix: "",
        extension: "ts",
        test_template: include_str!("../../../templates/module.test.tera"),
        impl_template: include_str!("../../../templates/utility.impl.tera"),
    },
    KindTemplate {
        kind: FeatureKind::Api,
        name: "api",
        role: "api",
        convention: Convention::KebabCase,
        prefix: "",
        extension: "ts",
        test_template: include_str!("../../../templates/api.test.tera"),
        impl_template: include_str!("../../../templates/api.impl.tera"),
    },
    KindTemplate {
        kind: FeatureKind::Hook,
        name: "hook",
        role: "hooks",
        convention: Convention::PascalCase,
        prefix: "use",
        extension: "ts",
        test_template: include_str!("../../../templates/hook.test.tera"),
        impl_template: include_str!("../../../templates/hook.impl.tera"),
    },
];

impl FeatureKind {
    pub const ALL: [FeatureKind; 4] = [
        FeatureKind::Component,
        FeatureKind::Utility,
        FeatureKind::Api,
        FeatureKind::Hook,
    ];

    pub fn template(self) -> &'static KindTemplate {
        &KIND_TABLE[self as usize]
    }

    pub fn as_str(self) -> &'static str {
        self.template().name
    }

    /// Comma-separated list of every kind name, for error messages.
    pub fn expected_list() -> String {
        FeatureKind::ALL
            .iter()
            .map(|k| k.as_str())
            .collect::<Vec<_>>()
            .join(", ")
    }
}

impl fmt::Display for FeatureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FeatureKind {
    type Err = CanonError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_lowercase();
        KIND_TABLE
            .iter()
            .find(|t| t.name == wanted)
            .map(|t| t.kind)
            .ok_or_else(|| CanonError::UnsupportedKind {
                kind: s.to_string(),
                expected: FeatureKind::expected_list(),
            })
    }
}

impl KindTemplate {
    /// File stem for a feature called `name`, e.g. `useAuth` for hook `auth`.
    pub fn file_stem(&self, name: &str) -> String {
        if self.prefix.is_empty() {
            return self.convention.apply(name);
        }
        let converted = self.convention.apply(name);
        let prefix_pascal = self.prefix.to_pascal_case();
        // `useAuth` and `auth` both become `useAuth`, `user` stays `useUser`.
        let body = match converted.strip_prefix(&prefix_pascal) {
            Some(rest) if rest.starts_with(|c: char| c.is_ascii_uppercase()) => rest,
            _ => converted.as_str(),
        };
        format!("{}{}", self.prefix, body)
    }

    /// Name of the exported symbol in the generated implementation.
    pub fn symbol(&self, name: &str) -> String {
        match self.convention {
            Convention::KebabCase => Convention::CamelCase.apply(name),
            _ => self.file_stem(name),
        }
    }

    /// Override file names looked up in the configured template directory.
    pub fn override_names(&self) -> (String, String) {
        (
            format!("{}.test.tera", self.name),
            format!("{}.impl.tera", self.name),
        )
    }
}
