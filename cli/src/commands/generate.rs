//! # Canon Generate Command
//!
//! File: cli/src/commands/generate.rs
//!
//! ## Overview
//!
//! Implements `canon generate <feature_name> <kind>`. Renders a test skeleton
//! into the `tests` role directory and an implementation skeleton into the
//! kind's role directory, test first. Existing files are left alone unless
//! `--overwrite` is given; both targets are checked before either is written.
//!
//! ## Examples
//!
//! ```bash
//! canon generate LoginForm component --input email --input password --output session
//! canon generate format-date utility --error "invalid date"
//! canon generate auth hook --overwrite
//! ```
//!
use crate::commands::Workspace;
use crate::common::fs::io::hint_if_exists;
use crate::common::fs::scan::relative_path;
use crate::common::scaffold::emitter::{render_feature, write_feature, FeatureSpec};
use crate::common::scaffold::kinds::FeatureKind;
use crate::core::error::Result;
use clap::Parser;
use tracing::info;

/// Arguments for `canon generate`.
#[derive(Parser, Debug)]
pub struct GenerateArgs {
    /// Feature name; converted to the naming of the kind's directory.
    pub feature_name: String,

    /// Feature kind: component, utility, api or hook.
    pub kind: String,

    /// Named input (prop, parameter or request field). Repeatable.
    #[arg(long = "input", value_name = "NAME")]
    pub inputs: Vec<String>,

    /// Named output (result or response field). Repeatable.
    #[arg(long = "output", value_name = "NAME")]
    pub outputs: Vec<String>,

    /// Error case to cover in the test skeleton. Repeatable.
    #[arg(long = "error", value_name = "NAME")]
    pub errors: Vec<String>,

    /// Replace files that already exist.
    #[arg(long)]
    pub overwrite: bool,
}

pub fn handle_generate(args: GenerateArgs, workspace: &Workspace) -> Result<()> {
    let kind: FeatureKind = args.kind.parse()?;
    info!("Generating {} '{}'", kind, args.feature_name);

    let mut spec = FeatureSpec::new(&args.feature_name, kind)?;
    spec.inputs = args.inputs;
    spec.outputs = args.outputs;
    spec.errors = args.errors;

    let (root, cfg) = workspace.load()?;
    let rendered = render_feature(&spec, &cfg, &root)?;
    write_feature(&rendered, args.overwrite).map_err(|e| {
        hint_if_exists(
            e,
            "Refusing to overwrite existing files (pass --overwrite to replace them)",
        )
    })?;

    println!("Created {}", relative_path(&rendered.test_path, &root));
    println!("Created {}", relative_path(&rendered.impl_path, &root));
    Ok(())
}

// --- Unit Tests ---
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generate_args_parsing() {
        let args = GenerateArgs::try_parse_from([
            "generate",
            "LoginForm",
            "component",
            "--input",
            "email",
            "--input",
            "password",
            "--error",
            "bad credentials",
            "--overwrite",
        ])
        .unwrap();
        assert_eq!(args.feature_name, "LoginForm");
        assert_eq!(args.kind, "component");
        assert_eq!(args.inputs, vec!["email", "password"]);
        assert!(args.outputs.is_empty());
        assert_eq!(args.errors, vec!["bad credentials"]);
        assert!(args.overwrite);
    }

    #[test]
    fn test_generate_requires_kind() {
        assert!(GenerateArgs::try_parse_from(["generate", "LoginForm"]).is_err());
    }
}
