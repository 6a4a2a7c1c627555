//! # Canon Error Types
//!
//! File: cli/src/core/error.rs
//!
//! ## Overview
//!
//! This module defines the error types used throughout canon. Domain failures
//! that the user must be able to tell apart (a missing root, a target that
//! already exists, an unknown feature kind) get their own `CanonError`
//! variant; everything else is propagated as `anyhow::Error` with context.
//!
//! ## Architecture
//!
//! - `CanonError`: A custom error enum using `thiserror` for specific error types
//! - `Result<T>`: A type alias for `anyhow::Result<T>` for flexible error handling
//!
//! Every error ends up in `main`, which prints it and exits with status 1.
//! `PermissionDenied` is the exception: the scanner logs it as a warning and
//! keeps walking, so it only surfaces when the root itself is unreadable.
//!
//! ## Examples
//!
//! ```rust
//! if !root.exists() {
//!     return Err(CanonError::NotFound { path: root.to_path_buf() })?;
//! }
//!
//! // Checking for a specific failure after propagation
//! let exists = err
//!     .downcast_ref::<CanonError>()
//!     .map_or(false, |e| matches!(e, CanonError::AlreadyExists { .. }));
//! ```
//!
use std::path::PathBuf;
use thiserror::Error;

/// Custom error type for canon.
#[derive(Error, Debug)]
pub enum CanonError {
    #[error("Path '{}' not found or is not a directory.", path.display())]
    NotFound { path: PathBuf },

    #[error("Permission denied: '{}'", path.display())]
    PermissionDenied { path: PathBuf },

    #[error("'{}' already exists.", path.display())]
    AlreadyExists { path: PathBuf },

    #[error("Unsupported feature kind '{kind}'. Expected one of: {expected}.")]
    UnsupportedKind { kind: String, expected: String },

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Filesystem error: {0}")]
    FileSystem(String),

    #[error("Template rendering error: {source}")]
    Template {
        #[from]
        source: tera::Error,
    },

    #[error("Argument parsing error: {0}")]
    ArgumentParsing(String),

    #[error("Validation found {count} issue(s). Use --force to proceed anyway.")]
    ValidationFailed { count: usize },
}

/// Type alias for Result using anyhow::Error for broad compatibility.
pub type Result<T> = anyhow::Result<T>;

// --- Unit Tests ---
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let config_err = CanonError::Config("Unknown convention 'snake'".to_string());
        assert_eq!(
            config_err.to_string(),
            "Configuration error: Unknown convention 'snake'"
        );

        let not_found = CanonError::NotFound {
            path: PathBuf::from("/no/such/root"),
        };
        assert_eq!(
            not_found.to_string(),
            "Path '/no/such/root' not found or is not a directory."
        );

        let unsupported = CanonError::UnsupportedKind {
            kind: "widget".into(),
            expected: "component, utility, api, hook".into(),
        };
        assert_eq!(
            unsupported.to_string(),
            "Unsupported feature kind 'widget'. Expected one of: component, utility, api, hook."
        );
    }

    #[test]
    fn test_downcast_from_anyhow() {
        let err: anyhow::Error = CanonError::AlreadyExists {
            path: PathBuf::from("src/components/Button.tsx"),
        }
        .into();
        let err = err.context("Failed to write skeletons");
        assert!(matches!(
            err.downcast_ref::<CanonError>(),
            Some(CanonError::AlreadyExists { .. })
        ));
    }
}
