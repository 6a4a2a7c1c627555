//! # Canon Command Modules
//!
//! File: cli/src/commands/mod.rs
//!
//! ## Overview
//!
//! This module aggregates the subcommands of the canon CLI and the
//! `Workspace` they all receive: the resolved scan root plus the configuration
//! file locations given on the command line.
//!
//! ## Command Groups
//!
//! - `discover`: report canonical locations, conventions and violations
//! - `validate`: check a proposed feature name before creating it
//! - `generate`: scaffold a test file and an implementation file
//! - `init`: write a default `.canon.toml`
//!
//! Each module defines its own arguments structure and a `handle_*` function.
//!
use crate::common::fs::scan::resolve_root;
use crate::core::config::{self, Config};
use crate::core::error::Result;
use std::path::{Path, PathBuf};

/// Scan the project and write the context file.
pub mod discover;
/// Scaffold a feature's test and implementation skeletons.
pub mod generate;
/// Write the default project configuration.
pub mod init;
/// Check a feature name against the project's conventions.
pub mod validate;

/// Root and configuration sources for one invocation.
#[derive(Debug, Clone)]
pub struct Workspace {
    pub root: PathBuf,
    pub config_file: Option<PathBuf>,
    pub user_config: Option<PathBuf>,
}

impl Workspace {
    pub fn new(root: &Path, config_file: Option<PathBuf>, user_config: Option<PathBuf>) -> Self {
        Workspace {
            root: root.to_path_buf(),
            config_file,
            user_config,
        }
    }

    /// Canonical root directory; fails with `NotFound` if it is not a directory.
    pub fn resolved_root(&self) -> Result<PathBuf> {
        resolve_root(&self.root)
    }

    /// Resolves the root and loads the configuration that applies to it.
    pub fn load(&self) -> Result<(PathBuf, Config)> {
        let root = self.resolved_root()?;
        let cfg = config::load_config(
            &root,
            self.config_file.as_deref(),
            self.user_config.as_deref(),
        )?;
        Ok((root, cfg))
    }
}
