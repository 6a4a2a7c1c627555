//! # Canon Filesystem Utilities (`common::fs`)
//!
//! File: cli/src/common/fs/mod.rs
//!
//! ## Overview
//!
//! Groups every filesystem touchpoint of canon: walking the project tree to
//! locate directories and files, and the few guarded writes the commands
//! perform.
//!
//! ## Architecture
//!
//! - **`scan`**: Read-only tree walks (`scan_directories`, `list_files`) with
//!   ignore globs, symlink-loop protection and skip-and-warn on unreadable
//!   subtrees. Used by `discover` and `validate`.
//! - **`io`**: Directory creation, reads, and writes with collision checks
//!   (`ensure_writable`). Used by `generate`, `init` and the context writer.
//!
//! Import from the specific submodule, e.g. `crate::common::fs::scan::list_files`.
//!

/// Basic file I/O with collision checks (e.g., `write_new_file`, `ensure_writable`).
pub mod io;
/// Directory tree scanning (e.g., `scan_directories`, `list_files`).
pub mod scan;
