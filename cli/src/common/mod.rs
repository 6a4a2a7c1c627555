//! # Canon Common Modules (`common`)
//!
//! File: cli/src/common/mod.rs
//!
//! ## Overview
//!
//! Shared functionality used by the command handlers, kept apart from
//! command-specific logic (`commands::`) and core infrastructure (`core::`).
//!
//! - **`conventions`**: discovery. Duplicate detection, naming inference,
//!   forbidden locations, project detection and the combined report.
//! - **`context`**: renders the discovery report into the Markdown context file.
//! - **`fs`**: directory scanning and guarded file writes.
//! - **`scaffold`**: feature kinds and the test/implementation template emitter.
//!
pub mod context;
pub mod conventions;
pub mod fs;
pub mod scaffold;
