//! # Canon Init Command
//!
//! File: cli/src/commands/init.rs
//!
//! Implements `canon init`: writes the default configuration to
//! `<root>/.canon.toml` as a starting point for customisation. An existing
//! file is only replaced with `--force`.
//!
use crate::commands::Workspace;
use crate::common::fs::io::{hint_if_exists, write_new_file};
use crate::core::config::{default_config_toml, PROJECT_CONFIG_FILENAME};
use crate::core::error::Result;
use clap::Parser;
use tracing::info;

/// Arguments for `canon init`.
#[derive(Parser, Debug)]
pub struct InitArgs {
    /// Replace an existing configuration file.
    #[arg(long)]
    pub force: bool,
}

pub fn handle_init(args: InitArgs, workspace: &Workspace) -> Result<()> {
    let root = workspace.resolved_root()?;
    let path = root.join(PROJECT_CONFIG_FILENAME);
    info!("Writing default configuration to {}", path.display());

    let content = default_config_toml()?;
    write_new_file(&path, &content, args.force).map_err(|e| {
        hint_if_exists(e, "Configuration not written (pass --force to replace it)")
    })?;

    println!("Wrote {}", path.display());
    Ok(())
}

// --- Unit Tests ---
#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::config::{load_config, Config};
    use crate::core::error::CanonError;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn test_init_writes_loadable_defaults() {
        let temp = tempdir().unwrap();
        let workspace = Workspace::new(temp.path(), None, Some(temp.path().join("no-user.toml")));

        handle_init(InitArgs { force: false }, &workspace).unwrap();

        let written = temp.path().join(PROJECT_CONFIG_FILENAME);
        assert!(written.is_file());
        let cfg = load_config(
            temp.path(),
            Some(written.as_path()),
            workspace.user_config.as_deref(),
        )
        .unwrap();
        assert_eq!(cfg, Config::default());
    }

    #[test]
    fn test_init_refuses_existing_without_force() {
        let temp = tempdir().unwrap();
        let path = temp.path().join(PROJECT_CONFIG_FILENAME);
        fs::write(&path, "[roles]\n").unwrap();
        let workspace = Workspace::new(temp.path(), None, None);

        let err = handle_init(InitArgs { force: false }, &workspace).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<CanonError>(),
            Some(CanonError::AlreadyExists { .. })
        ));
        assert_eq!(fs::read_to_string(&path).unwrap(), "[roles]\n");

        handle_init(InitArgs { force: true }, &workspace).unwrap();
        assert_ne!(fs::read_to_string(&path).unwrap(), "[roles]\n");
    }
}
