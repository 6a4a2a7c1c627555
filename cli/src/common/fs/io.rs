//! # Canon Filesystem I/O Operations
//!
//! File: cli/src/common/fs/io.rs
//!
//! ## Overview
//!
//! Thin wrappers around `std::fs` used wherever canon writes to disk: the
//! generated skeletons, the context file and `canon init`'s configuration.
//! Each wrapper adds path context to I/O errors.
//!
//! ## Architecture
//!
//! - **`ensure_dir_exists`**: `mkdir -p`, failing if the path is a file.
//! - **`read_file_to_string`**: `fs::read_to_string` with context.
//! - **`write_string_to_file`**: creates parent directories, then writes (replacing any file).
//! - **`ensure_writable`**: the collision check; an existing target is
//!   `CanonError::AlreadyExists` unless `overwrite` is set.
//! - **`write_new_file`**: `ensure_writable` followed by `write_string_to_file`.
//! - **`hint_if_exists`**: attaches a hint to `AlreadyExists` errors only.
//!
//! ```rust
//! io::ensure_writable(&test_path, args.overwrite)?;
//! io::ensure_writable(&impl_path, args.overwrite)?;
//! io::write_string_to_file(&test_path, &rendered.test)?;
//! ```
//!
use crate::core::error::{CanonError, Result};
use anyhow::Context;
use std::fs;
use std::path::Path;
use tracing::{debug, info, warn};

/// Creates `path` and its parents if missing.
///
/// # Errors
///
/// Returns `CanonError::FileSystem` if the path exists but is not a directory,
/// or the I/O error if creation fails.
pub fn ensure_dir_exists(path: &Path) -> Result<()> {
    if !path.exists() {
        fs::create_dir_all(path)
            .with_context(|| format!("Failed to create directory {:?}", path))?;
        info!("Created directory: {:?}", path);
    } else if !path.is_dir() {
        anyhow::bail!(CanonError::FileSystem(format!(
            "Path exists but is not a directory: {:?}",
            path
        )));
    } else {
        debug!("Directory already exists: {:?}", path);
    }
    Ok(())
}

/// Reads the entire content of a file into a string.
pub fn read_file_to_string(path: &Path) -> Result<String> {
    fs::read_to_string(path).with_context(|| format!("Failed to read file {:?}", path))
}

/// Writes `content` to `path`, creating parent directories and replacing any existing file.
pub fn write_string_to_file(path: &Path, content: &str) -> Result<()> {
    if let Some(parent) = path.parent() {
        ensure_dir_exists(parent)?;
    }
    fs::write(path, content).with_context(|| format!("Failed to write to file {:?}", path))?;
    info!("Wrote content to file: {:?}", path);
    Ok(())
}

/// Refuses to clobber an existing path unless `overwrite` is set.
///
/// # Errors
///
/// `CanonError::AlreadyExists` when `path` exists and `overwrite` is false;
/// `CanonError::FileSystem` when `path` is a directory (never overwritten).
pub fn ensure_writable(path: &Path, overwrite: bool) -> Result<()> {
    if !path.exists() {
        return Ok(());
    }
    if path.is_dir() {
        anyhow::bail!(CanonError::FileSystem(format!(
            "Target {:?} is a directory, refusing to replace it with a file",
            path
        )));
    }
    if !overwrite {
        anyhow::bail!(CanonError::AlreadyExists {
            path: path.to_path_buf()
        });
    }
    warn!("Overwriting existing file {:?}", path);
    Ok(())
}

/// Writes `content` to a path that must not exist yet (unless `overwrite`).
pub fn write_new_file(path: &Path, content: &str, overwrite: bool) -> Result<()> {
    ensure_writable(path, overwrite)?;
    write_string_to_file(path, content)
}

/// Adds `hint` as context when `err` is a `CanonError::AlreadyExists`.
/// Any other error is returned unchanged.
pub fn hint_if_exists(err: anyhow::Error, hint: &'static str) -> anyhow::Error {
    if matches!(
        err.downcast_ref::<CanonError>(),
        Some(CanonError::AlreadyExists { .. })
    ) {
        err.context(hint)
    } else {
        err
    }
}
