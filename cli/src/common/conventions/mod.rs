//! # Canon Convention Analysis (`common::conventions`)
//!
//! File: cli/src/common/conventions/mod.rs
//!
//! ## Overview
//!
//! Everything canon knows about a project's layout and naming rules. These
//! modules are pure functions over a scan of the tree (see `common::fs::scan`)
//! and the loaded `Config`; none of them write to disk.
//!
//! ## Architecture
//!
//! - `detector`: language / framework / build system from marker files.
//! - `duplicates`: canonical directory per role, everything else a violation.
//! - `forbidden`: configured locations that must not exist.
//! - `naming`: the `Convention` enum and the majority-vote inferencer.
//! - `report`: one discovery pass combining all of the above.
//!
//! ```rust
//! use crate::common::conventions::report;
//!
//! let report = report::build_report(&root, &cfg, None)?;
//! for role in &report.roles {
//!     println!("{} -> {}", role.role, role.canonical.display());
//! }
//! ```
//!

/// Project type detection from marker files.
pub mod detector;
/// Canonical directory selection and violation reporting.
pub mod duplicates;
/// Forbidden location lookup.
pub mod forbidden;
/// Naming convention classification and inference.
pub mod naming;
/// Full discovery pass.
pub mod report;
