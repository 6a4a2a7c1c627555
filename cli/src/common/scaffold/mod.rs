//! # Canon Scaffolding
//!
//! File: cli/src/common/scaffold/mod.rs
//!
//! Test-first feature scaffolding used by `canon generate`:
//!
//! - `kinds`: the feature kinds and their data table (role, naming, templates).
//! - `emitter`: renders and writes the test and implementation skeletons.
//!
pub mod emitter;
pub mod kinds;
