//! # Canon Template Emitter
//!
//! File: cli/src/common/scaffold/emitter.rs
//!
//! ## Overview
//!
//! Turns a `FeatureSpec` into a test skeleton and an implementation skeleton.
//! Rendering is pure and deterministic; `write_feature` is the only step that
//! touches the disk and it checks both targets before writing either.
//!
//! ## Template variables
//!
//! | variable      | example (`login form`, component)  |
//! |---------------|------------------------------------|
//! | `name`        | `login form`                       |
//! | `kind`        | `component`                        |
//! | `pascal`      | `LoginForm`                        |
//! | `camel`       | `loginForm`                        |
//! | `kebab`       | `login-form`                       |
//! | `snake`       | `login_form`                       |
//! | `stem`        | `LoginForm`                        |
//! | `symbol`      | `LoginForm`                        |
//! | `import_path` | `../src/components/LoginForm`      |
//! | `inputs`, `outputs`, `errors` | lists of strings   |
//!
use crate::common::fs::io::{ensure_writable, write_string_to_file};
use crate::common::scaffold::kinds::FeatureKind;
use crate::core::config::Config;
use crate::core::error::{CanonError, Result};
use crate::core::templating::{render_str, resolve_template};
use heck::{ToKebabCase, ToLowerCamelCase, ToPascalCase, ToSnakeCase};
use std::path::{Component, Path, PathBuf};
use tracing::{debug, info};

/// What the user asked `canon generate` for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeatureSpec {
    pub name: String,
    pub kind: FeatureKind,
    pub inputs: Vec<String>,
    pub outputs: Vec<String>,
    pub errors: Vec<String>,
}

impl FeatureSpec {
    /// A spec with no inputs, outputs or error cases.
    ///
    /// # Errors
    ///
    /// `CanonError::ArgumentParsing` when `name` has no letters or digits.
    pub fn new(name: &str, kind: FeatureKind) -> Result<Self> {
        let name = name.trim();
        if !name.chars().any(char::is_alphanumeric) {
            anyhow::bail!(CanonError::ArgumentParsing(
                "Feature name must contain at least one letter or digit.".to_string()
            ));
        }
        Ok(FeatureSpec {
            name: name.to_string(),
            kind,
            inputs: Vec::new(),
            outputs: Vec::new(),
            errors: Vec::new(),
        })
    }
}

/// Rendered files, not yet written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedFeature {
    pub test_path: PathBuf,
    pub test: String,
    pub impl_path: PathBuf,
    pub implementation: String,
}

fn role_dir(config: &Config, root: &Path, role: &str, kind: FeatureKind) -> Result<PathBuf> {
    config
        .role_path(role)
        .map(|p| root.join(p.trim_start_matches("./").trim_end_matches('/')))
        .ok_or_else(|| {
            anyhow::anyhow!(CanonError::Config(format!(
                "No '{}' role is configured, needed to generate a {}.",
                role, kind
            )))
        })
}

/// `/`-separated relative import from `from_dir` to `target`, always starting with `.`.
fn import_path(target: &Path, from_dir: &Path) -> String {
    let relative = pathdiff::diff_paths(target, from_dir).unwrap_or_else(|| target.to_path_buf());
    let parts: Vec<String> = relative
        .components()
        .map(|c| match c {
            Component::ParentDir => "..".to_string(),
            Component::CurDir => ".".to_string(),
            other => other.as_os_str().to_string_lossy().into_owned(),
        })
        .collect();
    let joined = parts.join("/");
    if joined.starts_with('.') {
        joined
    } else {
        format!("./{}", joined)
    }
}

/// Renders both skeletons for `spec` under `root`.
pub fn render_feature(spec: &FeatureSpec, config: &Config, root: &Path) -> Result<RenderedFeature> {
    let template = spec.kind.template();
    let impl_dir = role_dir(config, root, template.role, spec.kind)?;
    let tests_dir = role_dir(config, root, "tests", spec.kind)?;

    let stem = template.file_stem(&spec.name);
    let impl_path = impl_dir.join(format!("{}.{}", stem, template.extension));
    let test_path = tests_dir.join(format!("{}.test.{}", stem, template.extension));
    debug!(
        "Planned {} '{}': {} and {}",
        spec.kind,
        spec.name,
        test_path.display(),
        impl_path.display()
    );

    let mut context = tera::Context::new();
    context.insert("name", &spec.name);
    context.insert("kind", spec.kind.as_str());
    context.insert("pascal", &spec.name.to_pascal_case());
    context.insert("camel", &spec.name.to_lower_camel_case());
    context.insert("kebab", &spec.name.to_kebab_case());
    context.insert("snake", &spec.name.to_snake_case());
    context.insert("stem", &stem);
    context.insert("symbol", &template.symbol(&spec.name));
    context.insert("import_path", &import_path(&impl_dir.join(&stem), &tests_dir));
    context.insert("inputs", &spec.inputs);
    context.insert("outputs", &spec.outputs);
    context.insert("errors", &spec.errors);

    let override_dir = config.templates.directory.as_deref();
    let (test_name, impl_name) = template.override_names();
    let test_source = resolve_template(override_dir, &test_name, template.test_template)?;
    let impl_source = resolve_template(override_dir, &impl_name, template.impl_template)?;

    Ok(RenderedFeature {
        test: render_str(&test_name, &test_source, &context)?,
        implementation: render_str(&impl_name, &impl_source, &context)?,
        test_path,
        impl_path,
    })
}

/// Writes the test file, then the implementation.
///
/// # Errors
///
/// `CanonError::AlreadyExists` if either target exists and `overwrite` is
/// false. Nothing is written in that case.
pub fn write_feature(feature: &RenderedFeature, overwrite: bool) -> Result<()> {
    ensure_writable(&feature.test_path, overwrite)?;
    ensure_writable(&feature.impl_path, overwrite)?;

    write_string_to_file(&feature.test_path, &feature.test)?;
    write_string_to_file(&feature.impl_path, &feature.implementation)?;
    info!(
        "Generated {} and {}",
        feature.test_path.display(),
        feature.impl_path.display()
    );
    Ok(())
}
