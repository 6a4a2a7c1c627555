//! # Canon Forbidden Locations
//!
//! File: cli/src/common/conventions/forbidden.rs
//!
//! Finds configured forbidden locations that exist in the tree. Plain entries
//! (`lib/components`) are checked directly; entries containing glob syntax
//! (`packages/*/components`) are matched against every scanned directory.
//! A plain entry that is only a symlink to another directory inside the tree
//! is not reported, matching how the scanner treats such links.
//!
use crate::common::fs::scan::{list_directories, relative_path};
use crate::core::error::Result;
use glob_match::glob_match;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

fn is_glob(pattern: &str) -> bool {
    pattern.contains(['*', '?', '[', '{'])
}

/// Whether `path` reaches a directory of the tree through a symlink.
fn links_into_tree(path: &Path, root: &Path) -> bool {
    let (Ok(real), Ok(real_root)) = (fs::canonicalize(path), fs::canonicalize(root)) else {
        return false;
    };
    let physical = real_root.join(path.strip_prefix(root).unwrap_or(path));
    real != physical && real.starts_with(&real_root)
}

/// Existing directories under `root` that match a forbidden entry, sorted and unique.
pub fn find_forbidden(root: &Path, forbidden: &[String], ignore: &[String]) -> Result<Vec<PathBuf>> {
    let (globs, plain): (Vec<&String>, Vec<&String>) =
        forbidden.iter().partition(|p| is_glob(p));

    let mut hits: Vec<PathBuf> = plain
        .iter()
        .map(|p| root.join(p.trim_end_matches('/')))
        .filter(|p| p.is_dir())
        .filter(|p| {
            let alias = links_into_tree(p, root);
            if alias {
                debug!("'{}' links into the tree, not reporting it", p.display());
            }
            !alias
        })
        .collect();

    if !globs.is_empty() {
        for dir in list_directories(root, root, ignore, None)? {
            let rel = relative_path(&dir, root);
            if globs.iter().any(|g| glob_match(g, &rel)) {
                hits.push(dir);
            }
        }
    }

    hits.sort();
    hits.dedup();
    Ok(hits)
}

// --- Unit Tests ---
#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn test_plain_and_glob_entries() {
        let temp = tempdir().unwrap();
        let root = temp.path();
        for d in ["components", "src/components", "packages/ui/components", "packages/ui/src"] {
            fs::create_dir_all(root.join(d)).unwrap();
        }
        fs::write(root.join("lib"), "not a directory").unwrap();

        let forbidden = vec![
            "components".to_string(),
            "lib".to_string(),
            "packages/*/components".to_string(),
        ];
        let hits = find_forbidden(root, &forbidden, &[]).unwrap();
        assert_eq!(
            hits,
            vec![root.join("components"), root.join("packages/ui/components")]
        );
    }

    #[cfg(unix)]
    #[test]
    fn test_link_to_tree_directory_not_reported() {
        let temp = tempdir().unwrap();
        let root = temp.path();
        fs::create_dir_all(root.join("src/components")).unwrap();
        std::os::unix::fs::symlink(root.join("src/components"), root.join("components")).unwrap();

        let forbidden = vec!["components".to_string()];
        assert!(find_forbidden(root, &forbidden, &[]).unwrap().is_empty());
    }

    #[test]
    fn test_nothing_forbidden_present() {
        let temp = tempdir().unwrap();
        fs::create_dir_all(temp.path().join("src/components")).unwrap();
        let forbidden = vec!["components".to_string(), "lib/components".to_string()];
        assert!(find_forbidden(temp.path(), &forbidden, &[])
            .unwrap()
            .is_empty());
    }
}
