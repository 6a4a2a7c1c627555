//! # Canon Project Type Detector
//!
//! File: cli/src/common/conventions/detector.rs
//!
//! ## Overview
//!
//! Inspects the project root for marker files (`Cargo.toml`, `package.json`,
//! `go.mod`, ...) to report the language, the framework when one can be
//! identified, and the build system or package manager.
//!
//! ## Architecture
//!
//! The detection follows a priority-based approach:
//!
//! 1. Walk the `MARKERS` table in order; the first marker present decides.
//! 2. `package.json` gets a closer look: dependencies name the framework,
//!    `tsconfig.json` or a `typescript` dependency upgrades the language to
//!    TypeScript, and lock files name the package manager.
//! 3. Without markers, the first recognised source extension in the root
//!    directory names the language.
//! 4. Otherwise everything is "Unknown".
//!
//! ```rust
//! let info = detector::detect_project(&root);
//! println!("{} ({})", info.language, info.build_system);
//! ```
//!
use serde_json::Value;
use std::{fs, path::Path};
use tracing::debug;

/// What the root of a project says about it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectInfo {
    /// Primary language (e.g., "Rust", "TypeScript"), "Unknown" if undetermined.
    pub language: String,
    /// Framework, when the manifest names one (e.g., "Next.js", "React").
    pub framework: Option<String>,
    /// Build system or package manager (e.g., "Cargo", "pnpm").
    pub build_system: String,
}

impl Default for ProjectInfo {
    fn default() -> Self {
        ProjectInfo {
            language: "Unknown".to_string(),
            framework: None,
            build_system: "Unknown".to_string(),
        }
    }
}

impl ProjectInfo {
    fn simple(language: &str, build_system: &str) -> Self {
        ProjectInfo {
            language: language.to_string(),
            framework: None,
            build_system: build_system.to_string(),
        }
    }
}

/// Marker file -> (language, build system). `package.json` is handled separately.
const MARKERS: &[(&str, &str, &str)] = &[
    ("Cargo.toml", "Rust", "Cargo"),
    ("go.mod", "Go", "Go Modules"),
    ("package.json", "JavaScript", "npm"),
    ("pyproject.toml", "Python", "pyproject/pip"),
    ("setup.py", "Python", "setuptools/pip"),
    ("requirements.txt", "Python", "pip"),
    ("pom.xml", "Java", "Maven"),
    ("build.gradle", "Java/Kotlin", "Gradle"),
    ("build.gradle.kts", "Java/Kotlin", "Gradle"),
    ("composer.json", "PHP", "Composer"),
    ("Gemfile", "Ruby", "Bundler"),
];

/// Dependency name -> framework, in priority order (Next.js ships React).
const JS_FRAMEWORKS: &[(&str, &str)] = &[
    ("next", "Next.js"),
    ("react", "React"),
    ("vue", "Vue"),
    ("svelte", "Svelte"),
    ("@angular/core", "Angular"),
];

/// Lock file -> package manager.
const JS_LOCKFILES: &[(&str, &str)] = &[
    ("pnpm-lock.yaml", "pnpm"),
    ("yarn.lock", "yarn"),
    ("bun.lockb", "bun"),
];

/// Detects language, framework and build system from the files in `root`.
pub fn detect_project(root: &Path) -> ProjectInfo {
    debug!("Detecting project type in: {}", root.display());

    for (marker, language, build_system) in MARKERS {
        if !root.join(marker).is_file() {
            continue;
        }
        if *marker == "package.json" {
            return inspect_package_json(root);
        }
        debug!("Found marker '{}'", marker);
        return ProjectInfo::simple(language, build_system);
    }

    if let Some(language) = check_extensions(root) {
        debug!("Detected language '{}' from file extensions.", language);
        return ProjectInfo::simple(language, "Unknown (by extension)");
    }

    debug!("Could not determine project type.");
    ProjectInfo::default()
}

fn inspect_package_json(root: &Path) -> ProjectInfo {
    let manifest: Value = fs::read_to_string(root.join("package.json"))
        .ok()
        .and_then(|content| serde_json::from_str(&content).ok())
        .unwrap_or(Value::Null);
    if manifest.is_null() {
        debug!("package.json is unreadable or not valid JSON; treating it as empty.");
    }

    let has_dependency = |name: &str| {
        ["dependencies", "devDependencies", "peerDependencies"]
            .iter()
            .any(|section| manifest.get(section).and_then(|deps| deps.get(name)).is_some())
    };

    let framework = JS_FRAMEWORKS
        .iter()
        .find(|(dep, _)| has_dependency(dep))
        .map(|(_, name)| name.to_string());

    let language = if root.join("tsconfig.json").is_file() || has_dependency("typescript") {
        "TypeScript"
    } else {
        "JavaScript"
    };

    let build_system = JS_LOCKFILES
        .iter()
        .find(|(lock, _)| root.join(lock).is_file())
        .map_or("npm", |(_, manager)| *manager);

    ProjectInfo {
        language: language.to_string(),
        framework,
        build_system: build_system.to_string(),
    }
}

/// First recognised source extension among the files directly in `root`.
fn check_extensions(root: &Path) -> Option<&'static str> {
    let entries = match fs::read_dir(root) {
        Ok(iter) => iter,
        Err(e) => {
            debug!(
                "Could not read directory {} for extension check: {}",
                root.display(),
                e
            );
            return None;
        }
    };

    let mut names: Vec<_> = entries
        .filter_map(|entry| entry.ok().map(|e| e.path()))
        .filter(|p| p.is_file())
        .collect();
    names.sort();

    names.iter().find_map(|path| {
        match path.extension().and_then(|os| os.to_str())? {
            "rs" => Some("Rust"),
            "go" => Some("Go"),
            "py" => Some("Python"),
            "js" | "jsx" | "mjs" | "cjs" => Some("JavaScript"),
            "ts" | "tsx" => Some("TypeScript"),
            "java" => Some("Java"),
            "kt" | "kts" => Some("Kotlin"),
            "rb" => Some("Ruby"),
            "php" => Some("PHP"),
            _ => None,
        }
    })
}
