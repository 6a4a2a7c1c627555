//! # Canon Template System
//!
//! File: cli/src/core/templating.rs
//!
//! ## Overview
//!
//! Renders text templates with the Tera engine. canon ships its templates
//! inside the binary (`cli/templates/*.tera`, pulled in with `include_str!`);
//! a user can shadow any of them by dropping a file with the same name into
//! the directory configured under `[templates]`.
//!
//! ## Architecture
//!
//! - `render_str`: one-off render of a template string against a `tera::Context`.
//!   Autoescaping is off: the output is source code and Markdown, not HTML.
//! - `resolve_template`: picks the user override when one exists, else the built-in text.
//!
//! ## Examples
//!
//! ```rust
//! let mut context = tera::Context::new();
//! context.insert("pascal", "LoginForm");
//! context.insert("inputs", &vec!["email", "password"]);
//!
//! let source = templating::resolve_template(cfg.templates.directory.as_deref(), "component.impl.tera", BUILTIN)?;
//! let rendered = templating::render_str("component.impl.tera", &source, &context)?;
//! ```
//!
use crate::common::fs::io::read_file_to_string;
use crate::core::error::{CanonError, Result};
use anyhow::anyhow;
use std::path::Path;
use tera::Tera;
use tracing::debug;

/// Renders `template` (identified by `name` in error messages) with `context`.
pub fn render_str(name: &str, template: &str, context: &tera::Context) -> Result<String> {
    Tera::one_off(template, context, false).map_err(|e| {
        anyhow!(CanonError::Template { source: e })
            .context(format!("Tera rendering failed for template '{}'", name))
    })
}

/// Returns the override `<dir>/<file_name>` if present, else `builtin`.
pub fn resolve_template(dir: Option<&str>, file_name: &str, builtin: &str) -> Result<String> {
    if let Some(dir) = dir {
        let candidate = Path::new(dir).join(file_name);
        if candidate.is_file() {
            debug!("Using template override {}", candidate.display());
            return read_file_to_string(&candidate);
        }
    }
    Ok(builtin.to_string())
}
