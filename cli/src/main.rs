//! # Canon Main Entry Point
//!
//! File: cli/src/main.rs
//!
//! ## Overview
//!
//! This file serves as the main entry point for the canon CLI. It handles:
//! - Command-line argument parsing using Clap
//! - Setting up the logging system based on verbosity flags
//! - Routing execution to the command handlers
//!
//! ## Architecture
//!
//! - Each subcommand (`discover`, `validate`, `generate`, `init`) is a variant of `Commands`
//! - Global options (`--root`, `--config`, `-v`) are collected into a `Workspace`
//! - All errors are propagated to this level, logged, printed and turned into exit code 1
//!
//! ## Examples
//!
//! ```bash
//! # Where do things live in this project?
//! canon discover
//!
//! # Is the name free and well-formed?
//! canon -v validate LoginForm --kind component
//!
//! # Scaffold the test and the implementation
//! canon generate LoginForm component --input email --input password
//! ```
//!
use clap::Parser;
use std::path::PathBuf;
use tracing_subscriber::{fmt, EnvFilter};

mod commands; // Subcommand handlers (discover, validate, generate, init)
mod common; // Discovery, scaffolding and filesystem helpers
mod core; // Core infrastructure (errors, config, templating)

use commands::Workspace;

/// Defines the top-level command-line arguments structure using Clap's derive macros.
#[derive(Parser, Debug)]
#[command(
    name = "canon",
    about = "Find where things belong in a project and scaffold features there",
    long_about = "Discovers the canonical directory for each role (components, lib, tests, ...),\n\
                  reports duplicated or forbidden locations, infers naming conventions,\n\
                  and generates test-first feature skeletons in the right places.",
    propagate_version = true,
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Project root to scan.
    #[arg(long, global = true, default_value = ".", value_name = "PATH")]
    root: PathBuf,

    /// Project configuration file (skips the search for .canon.toml).
    #[arg(long, global = true, value_name = "PATH")]
    config: Option<PathBuf>,

    /// User configuration file (defaults to the platform config directory).
    #[arg(long, global = true, env = "CANON_USER_CONFIG", value_name = "PATH", hide = true)]
    user_config: Option<PathBuf>,

    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,
}

/// Enum defining all available top-level commands.
#[derive(Parser, Debug)]
enum Commands {
    /// Report canonical locations, duplicates, conventions and forbidden paths.
    #[command(alias = "d")]
    Discover(commands::discover::DiscoverArgs),
    /// Check a feature name before creating it.
    #[command(alias = "v")]
    Validate(commands::validate::ValidateArgs),
    /// Create test and implementation skeletons for a feature.
    #[command(alias = "g")]
    Generate(commands::generate::GenerateArgs),
    /// Write a default .canon.toml to the project root.
    Init(commands::init::InitArgs),
}

fn main() {
    let cli = Cli::parse();

    let log_level = match cli.verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(log_level));
    fmt::Subscriber::builder()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .compact()
        .init();

    tracing::debug!("Parsed CLI arguments: {:?}", cli);

    let workspace = Workspace::new(&cli.root, cli.config, cli.user_config);
    let command_result = match cli.command {
        Commands::Discover(args) => commands::discover::handle_discover(args, &workspace),
        Commands::Validate(args) => commands::validate::handle_validate(args, &workspace),
        Commands::Generate(args) => commands::generate::handle_generate(args, &workspace),
        Commands::Init(args) => commands::init::handle_init(args, &workspace),
    };

    if let Err(e) = command_result {
        tracing::error!("Command execution failed: {:?}", e);
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
}

// --- Basic Integration Tests ---
#[cfg(test)]
mod tests {
    use super::*;
    use assert_cmd::Command;
    use clap::CommandFactory;
    use predicates::prelude::*;

    fn canon_cmd() -> Command {
        Command::cargo_bin("canon").expect("Failed to find canon binary for testing")
    }

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_global_options_after_subcommand() {
        let cli = Cli::try_parse_from(["canon", "discover", "--root", "web", "-vv"]).unwrap();
        assert_eq!(cli.root, PathBuf::from("web"));
        assert_eq!(cli.verbose, 2);
        assert!(matches!(cli.command, Commands::Discover(_)));
    }

    #[test]
    fn test_main_help_flag() {
        canon_cmd().arg("--help").assert().success();
    }

    #[test]
    fn test_main_version_flag() {
        canon_cmd()
            .arg("--version")
            .assert()
            .success()
            .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")));
    }
}
