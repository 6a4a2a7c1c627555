//! # Canon Configuration System
//!
//! File: cli/src/core/config.rs
//!
//! ## Overview
//!
//! This module implements loading, merging and validation of the canon
//! configuration. The configuration is read once at startup and never changes
//! during a run.
//!
//! ## Architecture
//!
//! Configuration sources (in order of precedence):
//! 1. Project-specific `.canon.toml` (given with `--config`, or found by searching
//!    from the scan root upward, stopping at a directory that contains `.git`)
//! 2. User-specific `config.toml` in the platform config directory
//!    (`CANON_USER_CONFIG` overrides its location)
//! 3. Default values defined in the code
//!
//! Each file is read as a `ConfigLayer` whose fields are all optional, so a
//! key that is present always wins over lower layers, even when its value
//! equals the built-in default. Map-valued sections (`[roles]`,
//! `[naming.roles]`) merge entry by entry, so a project file that only moves
//! `components` keeps every other default role.
//!
//! ## Examples
//!
//! ```rust
//! let cfg = config::load_config(&root, None, None)?;
//!
//! let components = cfg.role_path("components"); // Some("src/components")
//! let ignore = &cfg.scan.ignore;
//! ```
//!
use crate::common::conventions::naming::Convention;
use crate::core::error::{CanonError, Result};
use anyhow::{anyhow, Context};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::{
    fs,
    path::{Component, Path, PathBuf},
};
use tracing::{debug, info, warn};

/// File name of the project configuration.
pub const PROJECT_CONFIG_FILENAME: &str = ".canon.toml";

/// Represents the main configuration structure, loaded from TOML files.
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Logical role -> canonical path relative to the project root.
    #[serde(default)]
    pub roles: BTreeMap<String, String>,
    #[serde(default)]
    pub scan: ScanConfig,
    #[serde(default)]
    pub rules: RulesConfig,
    #[serde(default)]
    pub naming: NamingConfig,
    #[serde(default)]
    pub templates: TemplatesConfig,
    #[serde(default)]
    pub context: ContextConfig,
}

/// Settings for the directory scanner.
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct ScanConfig {
    /// Glob patterns matched against an entry's name and its root-relative path.
    #[serde(default = "default_ignore")]
    pub ignore: Vec<String>,
}

/// Structural rules checked by `discover` and `validate`.
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct RulesConfig {
    /// Root-relative locations (globs allowed) that must not exist.
    #[serde(default = "default_forbidden")]
    pub forbidden: Vec<String>,
}

/// Naming convention per file category.
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct NamingConfig {
    /// Returned by inference when there is nothing to vote on.
    #[serde(default = "default_convention")]
    pub default: Convention,
    /// Role -> expected convention for files in that role's directory.
    #[serde(default)]
    pub roles: BTreeMap<String, Convention>,
}

/// Optional user templates overriding the built-in skeletons.
#[derive(Deserialize, Serialize, Debug, Clone, Default, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct TemplatesConfig {
    /// Directory holding `<kind>.test.tera` / `<kind>.impl.tera` (can use ~).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub directory: Option<String>,
}

/// Where `discover` writes its Markdown summary.
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct ContextConfig {
    /// Path relative to the project root.
    #[serde(default = "default_context_file")]
    pub file: String,
}

/// One configuration file as written. Absent keys leave lower layers untouched.
#[derive(Deserialize, Debug, Default)]
#[serde(deny_unknown_fields)]
struct ConfigLayer {
    roles: Option<BTreeMap<String, String>>,
    scan: Option<ScanLayer>,
    rules: Option<RulesLayer>,
    naming: Option<NamingLayer>,
    templates: Option<TemplatesLayer>,
    context: Option<ContextLayer>,
}

#[derive(Deserialize, Debug, Default)]
#[serde(deny_unknown_fields)]
struct ScanLayer {
    ignore: Option<Vec<String>>,
}

#[derive(Deserialize, Debug, Default)]
#[serde(deny_unknown_fields)]
struct RulesLayer {
    forbidden: Option<Vec<String>>,
}

#[derive(Deserialize, Debug, Default)]
#[serde(deny_unknown_fields)]
struct NamingLayer {
    default: Option<Convention>,
    roles: Option<BTreeMap<String, Convention>>,
}

#[derive(Deserialize, Debug, Default)]
#[serde(deny_unknown_fields)]
struct TemplatesLayer {
    directory: Option<String>,
}

#[derive(Deserialize, Debug, Default)]
#[serde(deny_unknown_fields)]
struct ContextLayer {
    file: Option<String>,
}

impl ConfigLayer {
    /// Writes every key present in this layer over `config`.
    fn apply_to(self, config: &mut Config) {
        if let Some(roles) = self.roles {
            config.roles.extend(roles);
        }
        if let Some(ignore) = self.scan.and_then(|s| s.ignore) {
            config.scan.ignore = ignore;
        }
        if let Some(forbidden) = self.rules.and_then(|r| r.forbidden) {
            config.rules.forbidden = forbidden;
        }
        if let Some(naming) = self.naming {
            if let Some(default) = naming.default {
                config.naming.default = default;
            }
            if let Some(roles) = naming.roles {
                config.naming.roles.extend(roles);
            }
        }
        if let Some(directory) = self.templates.and_then(|t| t.directory) {
            config.templates.directory = Some(directory);
        }
        if let Some(file) = self.context.and_then(|c| c.file) {
            config.context.file = file;
        }
    }
}

impl Default for ScanConfig {
    fn default() -> Self {
        ScanConfig {
            ignore: default_ignore(),
        }
    }
}

impl Default for RulesConfig {
    fn default() -> Self {
        RulesConfig {
            forbidden: default_forbidden(),
        }
    }
}

impl Default for NamingConfig {
    fn default() -> Self {
        NamingConfig {
            default: default_convention(),
            roles: default_naming_roles(),
        }
    }
}

impl Default for ContextConfig {
    fn default() -> Self {
        ContextConfig {
            file: default_context_file(),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Config {
            roles: default_roles(),
            scan: ScanConfig::default(),
            rules: RulesConfig::default(),
            naming: NamingConfig::default(),
            templates: TemplatesConfig::default(),
            context: ContextConfig::default(),
        }
    }
}

impl Config {
    /// The configured canonical path for `role`, relative to the root.
    pub fn role_path(&self, role: &str) -> Option<&str> {
        self.roles.get(role).map(String::as_str)
    }

    /// The directory basename the scanner looks for when locating `role`.
    pub fn role_basename(&self, role: &str) -> Option<&str> {
        self.role_path(role).and_then(basename_of)
    }

    /// Expected convention for files under `role`, falling back to the default.
    pub fn convention_for(&self, role: &str) -> Convention {
        self.naming
            .roles
            .get(role)
            .copied()
            .unwrap_or(self.naming.default)
    }
}

/// Last `/`-separated segment of a configured relative path.
pub fn basename_of(path: &str) -> Option<&str> {
    path.trim_end_matches('/')
        .rsplit('/')
        .next()
        .filter(|s| !s.is_empty())
}

fn default_roles() -> BTreeMap<String, String> {
    [
        ("components", "src/components"),
        ("docs", "docs"),
        ("lib", "src/lib"),
        ("tests", "tests"),
        ("hooks", "src/hooks"),
        ("api", "src/api"),
    ]
    .into_iter()
    .map(|(k, v)| (k.to_string(), v.to_string()))
    .collect()
}

fn default_naming_roles() -> BTreeMap<String, Convention> {
    [
        ("components", Convention::PascalCase),
        ("hooks", Convention::CamelCase),
        ("lib", Convention::CamelCase),
        ("api", Convention::KebabCase),
    ]
    .into_iter()
    .map(|(k, v)| (k.to_string(), v))
    .collect()
}

fn default_ignore() -> Vec<String> {
    [
        ".git",
        "node_modules",
        "target",
        "dist",
        "build",
        "coverage",
        ".next",
        ".canon",
    ]
    .into_iter()
    .map(String::from)
    .collect()
}

fn default_forbidden() -> Vec<String> {
    vec!["components".to_string(), "lib/components".to_string()]
}

fn default_convention() -> Convention {
    Convention::PascalCase
}

fn default_context_file() -> String {
    ".canon/CONTEXT.md".to_string()
}

/// Loads, merges, expands and validates the configuration for a run rooted at `root`.
///
/// `project_file` bypasses the upward search; `user_file` replaces the platform
/// location of the user configuration.
pub fn load_config(
    root: &Path,
    project_file: Option<&Path>,
    user_file: Option<&Path>,
) -> Result<Config> {
    let user_config = load_user_config(user_file)?;
    let project_config = match project_file {
        Some(path) => {
            info!("Loading project configuration from: {}", path.display());
            Some(load_config_from_path(path)?)
        }
        None => load_project_config(root)?,
    };
    let mut merged = merge_configs(user_config, project_config);
    expand_config_paths(&mut merged).context("Failed to expand paths in configuration")?;
    validate_config(&merged).context("Configuration validation failed")?;
    debug!("Final loaded configuration: {:?}", merged);
    Ok(merged)
}

fn load_user_config(user_file: Option<&Path>) -> Result<Option<ConfigLayer>> {
    let config_path = match user_file {
        Some(path) => path.to_path_buf(),
        None => match ProjectDirs::from("com", "Canon", "canon") {
            Some(proj_dirs) => proj_dirs.config_dir().join("config.toml"),
            None => {
                warn!("Could not determine user config directory.");
                return Ok(None);
            }
        },
    };
    if config_path.is_file() {
        info!("Loading user configuration from: {}", config_path.display());
        load_config_from_path(&config_path).map(Some)
    } else {
        debug!(
            "User configuration file not found at {}",
            config_path.display()
        );
        Ok(None)
    }
}

fn load_project_config(root: &Path) -> Result<Option<ConfigLayer>> {
    match find_project_config_path(root) {
        Some(path) => {
            info!("Loading project configuration from: {}", path.display());
            load_config_from_path(&path).map(Some)
        }
        None => {
            debug!(
                "No {} found in {} or its ancestors.",
                PROJECT_CONFIG_FILENAME,
                root.display()
            );
            Ok(None)
        }
    }
}

fn find_project_config_path(start: &Path) -> Option<PathBuf> {
    let mut path: &Path = start;
    loop {
        let project_config = path.join(PROJECT_CONFIG_FILENAME);
        if project_config.is_file() {
            return Some(project_config);
        }
        if path.join(".git").is_dir() {
            debug!(
                "Found .git directory at {}, stopping project config search.",
                path.display()
            );
            return None;
        }
        match path.parent() {
            Some(parent) => path = parent,
            None => return None,
        }
    }
}

fn load_config_from_path(path: &Path) -> Result<ConfigLayer> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read configuration file: {}", path.display()))?;
    toml::from_str(&content)
        .with_context(|| format!("Failed to parse TOML from file: {}", path.display()))
}

/// Layers defaults, then the user file, then the project file.
fn merge_configs(user: Option<ConfigLayer>, project: Option<ConfigLayer>) -> Config {
    let mut merged = Config::default();
    for layer in [user, project].into_iter().flatten() {
        layer.apply_to(&mut merged);
    }
    merged
}

fn expand_config_paths(config: &mut Config) -> Result<()> {
    if let Some(dir) = config.templates.directory.as_mut() {
        *dir = shellexpand::tilde(dir.as_str()).into_owned();
        debug!("Expanded template directory: {}", dir);
    }
    Ok(())
}

/// A configured path must stay inside the project root.
fn is_plain_relative(path: &str) -> bool {
    let p = Path::new(path);
    !path.trim().is_empty()
        && p.components()
            .all(|c| matches!(c, Component::Normal(_) | Component::CurDir))
}

fn validate_config(config: &Config) -> Result<()> {
    debug!("Validating final configuration...");
    for (role, path) in &config.roles {
        if !is_plain_relative(path) {
            return Err(anyhow!(CanonError::Config(format!(
                "Role '{}' must map to a relative path inside the project, got '{}'.",
                role, path
            ))));
        }
    }
    if !config.roles.contains_key("tests") {
        return Err(anyhow!(CanonError::Config(
            "The 'tests' role must be configured.".to_string()
        )));
    }
    if config.scan.ignore.iter().any(|p| p.trim().is_empty()) {
        return Err(anyhow!(CanonError::Config(
            "Ignore patterns cannot be empty.".to_string()
        )));
    }
    if !is_plain_relative(&config.context.file) {
        return Err(anyhow!(CanonError::Config(format!(
            "Context file must be a relative path inside the project, got '{}'.",
            config.context.file
        ))));
    }
    if let Some(dir) = &config.templates.directory {
        let dir = PathBuf::from(dir);
        if dir.exists() && !dir.is_dir() {
            return Err(anyhow!(CanonError::Config(format!(
                "Configured template path '{}' exists but is not a directory.",
                dir.display()
            ))));
        }
        if !dir.exists() {
            warn!(
                "Configured template directory '{}' does not exist; using built-in templates.",
                dir.display()
            );
        }
    }
    for role in config.naming.roles.keys() {
        if !config.roles.contains_key(role) {
            warn!("Naming convention set for unknown role '{}'.", role);
        }
    }
    Ok(())
}

/// Serialized form of the defaults, written by `canon init`.
pub fn default_config_toml() -> Result<String> {
    toml::to_string_pretty(&Config::default()).context("Failed to serialize default configuration")
}

// --- Unit Tests ---
#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_deserialize_partial_toml() {
        let toml_content = r#"
            [roles]
            components = "app/components"

            [naming]
            default = "kebab-case"

            [naming.roles]
            components = "camelCase"
        "#;

        let config: Config = toml::from_str(toml_content).expect("Failed to parse TOML");

        assert_eq!(config.roles.len(), 1);
        assert_eq!(config.role_path("components"), Some("app/components"));
        assert_eq!(config.naming.default, Convention::KebabCase);
        assert_eq!(config.scan.ignore, default_ignore()); // Default
        assert_eq!(config.context.file, ".canon/CONTEXT.md"); // Default
    }

    #[test]
    fn test_unknown_fields_rejected() {
        let result: std::result::Result<Config, _> = toml::from_str("[roles]\n[bogus]\nx = 1\n");
        assert!(result.is_err());
    }

    #[test]
    fn test_merge_keeps_default_roles() {
        let project: ConfigLayer =
            toml::from_str("[roles]\ncomponents = \"app/components\"\n").unwrap();
        let merged = merge_configs(None, Some(project));

        assert_eq!(merged.role_path("components"), Some("app/components"));
        assert_eq!(merged.role_path("tests"), Some("tests"));
        assert_eq!(merged.role_path("docs"), Some("docs"));
        assert_eq!(merged.convention_for("components"), Convention::PascalCase);
    }

    #[test]
    fn test_merge_project_over_user() {
        let user: ConfigLayer = toml::from_str(
            "[context]\nfile = \"user.md\"\n[scan]\nignore = [\"vendor\"]\n",
        )
        .unwrap();
        let project: ConfigLayer =
            toml::from_str("[context]\nfile = \"project.md\"\n").unwrap();
        let merged = merge_configs(Some(user), Some(project));

        assert_eq!(merged.context.file, "project.md");
        assert_eq!(merged.scan.ignore, vec!["vendor".to_string()]);
    }

    #[test]
    fn test_project_restores_builtin_values() {
        let user: ConfigLayer = toml::from_str(
            "[naming]\ndefault = \"kebab-case\"\n\
             [scan]\nignore = [\"vendor\"]\n\
             [context]\nfile = \"notes/user.md\"\n",
        )
        .unwrap();
        let project: ConfigLayer = toml::from_str(
            "[naming]\ndefault = \"PascalCase\"\n\
             [context]\nfile = \".canon/CONTEXT.md\"\n",
        )
        .unwrap();
        let merged = merge_configs(Some(user), Some(project));

        assert_eq!(merged.naming.default, Convention::PascalCase);
        assert_eq!(merged.context.file, ".canon/CONTEXT.md");
        // Not mentioned by the project file, so the user value stays.
        assert_eq!(merged.scan.ignore, vec!["vendor".to_string()]);
    }

    #[test]
    fn test_project_file_restores_default_through_load_config() {
        let temp_dir = tempdir().unwrap();
        let user = temp_dir.path().join("user.toml");
        fs::write(&user, "[rules]\nforbidden = []\n").unwrap();
        let project = temp_dir.path().join(PROJECT_CONFIG_FILENAME);
        fs::write(
            &project,
            "[rules]\nforbidden = [\"components\", \"lib/components\"]\n",
        )
        .unwrap();

        let config = load_config(temp_dir.path(), Some(&project), Some(&user)).unwrap();
        assert_eq!(config.rules.forbidden, default_forbidden());
    }

    #[test]
    fn test_layer_rejects_unknown_fields() {
        let result: std::result::Result<ConfigLayer, _> =
            toml::from_str("[naming]\ndefualt = \"camelCase\"\n");
        assert!(result.is_err());
    }

    #[test]
    fn test_role_basename() {
        let config = Config::default();
        assert_eq!(config.role_basename("components"), Some("components"));
        assert_eq!(config.role_basename("lib"), Some("lib"));
        assert_eq!(config.role_basename("missing"), None);
        assert_eq!(basename_of("src/components/"), Some("components"));
    }

    #[test]
    fn test_validate_rejects_escaping_role() {
        let mut config = Config::default();
        config
            .roles
            .insert("components".into(), "../elsewhere".into());
        assert!(validate_config(&config)
            .unwrap_err()
            .to_string()
            .contains("relative path inside the project"));
    }

    #[test]
    fn test_validate_template_path_is_file() {
        let temp_dir = tempdir().unwrap();
        let file_path = temp_dir.path().join("not_a_dir");
        fs::write(&file_path, "").unwrap();

        let config = Config {
            templates: TemplatesConfig {
                directory: Some(file_path.to_string_lossy().to_string()),
            },
            ..Default::default()
        };
        let result = validate_config(&config);
        assert!(result.is_err());
        assert!(result
            .unwrap_err()
            .to_string()
            .contains("is not a directory"));
    }

    #[test]
    fn test_load_config_finds_project_file_in_ancestor() {
        let temp_dir = tempdir().unwrap();
        fs::write(
            temp_dir.path().join(PROJECT_CONFIG_FILENAME),
            "[roles]\ndocs = \"documentation\"\n",
        )
        .unwrap();
        let nested = temp_dir.path().join("packages/web");
        fs::create_dir_all(&nested).unwrap();
        let no_user = temp_dir.path().join("no-user-config.toml");

        let config = load_config(&nested, None, Some(&no_user)).unwrap();
        assert_eq!(config.role_path("docs"), Some("documentation"));
    }

    #[test]
    fn test_project_search_stops_at_git() {
        let temp_dir = tempdir().unwrap();
        fs::write(
            temp_dir.path().join(PROJECT_CONFIG_FILENAME),
            "[roles]\ndocs = \"documentation\"\n",
        )
        .unwrap();
        let repo = temp_dir.path().join("repo");
        fs::create_dir_all(repo.join(".git")).unwrap();

        assert_eq!(find_project_config_path(&repo), None);
    }

    #[test]
    fn test_default_config_round_trips() {
        let rendered = default_config_toml().unwrap();
        assert!(rendered.contains("[roles]"));
        let parsed: Config = toml::from_str(&rendered).unwrap();
        assert_eq!(parsed, Config::default());
    }
}
