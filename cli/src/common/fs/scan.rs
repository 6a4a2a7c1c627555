//! # Canon Directory Scanner
//!
//! File: cli/src/common/fs/scan.rs
//!
//! ## Overview
//!
//! Walks a project tree and collects the directories whose basename matches a
//! role (e.g. every `components` directory), or the regular files beneath a
//! directory. Subtrees matching the configured ignore globs are never entered.
//!
//! ## Architecture
//!
//! - `resolve_root`: checks the scan root and returns its canonical path.
//! - `scan_directories`: one walk collecting several basenames at once, giving a `ScanResult`.
//! - `scan_matching`: directories whose basename matches a name or glob (`discover <term>`).
//! - `list_files`: regular files under a directory, for naming inference and conflict checks.
//! - `list_directories`: every directory under a directory, for forbidden-location globs.
//!
//! Walks follow directory symlinks, but a symlinked directory is only entered
//! once the physical tree has been walked. A visited set of canonical paths
//! then drops any link resolving to a directory already seen, so a real
//! `src/components` is reported instead of a `components` link pointing at
//! it, and link cycles terminate. Unreadable directories are logged with
//! `warn!` and skipped.
//!
//! Entries are visited sorted by file name, so results are deterministic.
//!
use crate::core::error::{CanonError, Result};
use glob_match::glob_match;
use std::collections::{BTreeMap, HashSet, VecDeque};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};
use walkdir::{DirEntry, WalkDir};

/// Directory basename -> every path where a directory of that name occurs.
pub type ScanResult = BTreeMap<String, Vec<PathBuf>>;

/// Validates `root` and returns its canonical absolute path.
pub fn resolve_root(root: &Path) -> Result<PathBuf> {
    if !root.is_dir() {
        return Err(CanonError::NotFound {
            path: root.to_path_buf(),
        }
        .into());
    }
    fs::canonicalize(root).map_err(|e| {
        let path = root.to_path_buf();
        let err = match e.kind() {
            io::ErrorKind::PermissionDenied => CanonError::PermissionDenied { path },
            _ => CanonError::NotFound { path },
        };
        anyhow::Error::from(err)
    })
}

/// `path` relative to `root`, `/`-separated, `.` for the root itself.
pub fn relative_path(path: &Path, root: &Path) -> String {
    let rel = match path.strip_prefix(root) {
        Ok(p) => p.to_path_buf(),
        Err(_) => pathdiff::diff_paths(path, root).unwrap_or_else(|| path.to_path_buf()),
    };
    let rel = rel.to_string_lossy().replace('\\', "/");
    if rel.is_empty() {
        ".".to_string()
    } else {
        rel
    }
}

/// Whether a `/`-separated relative path or its basename matches any pattern.
pub fn is_ignored(relative: &str, name: &str, patterns: &[String]) -> bool {
    patterns
        .iter()
        .any(|pattern| glob_match(pattern, name) || glob_match(pattern, relative))
}

/// Collects every directory under `root` whose basename is one of `basenames`.
///
/// `root` itself never matches. Basenames with no match are left out of the result.
pub fn scan_directories(root: &Path, basenames: &[&str], ignore: &[String]) -> Result<ScanResult> {
    let root = resolve_root(root)?;
    let wanted: HashSet<&str> = basenames.iter().copied().collect();
    let mut result = ScanResult::new();

    walk(&root, &root, ignore, None, |entry| {
        if !entry.file_type().is_dir() {
            return;
        }
        let name = entry.file_name().to_string_lossy();
        if wanted.contains(name.as_ref()) {
            debug!("Matched directory '{}'", entry.path().display());
            result
                .entry(name.into_owned())
                .or_default()
                .push(entry.path().to_path_buf());
        }
    })?;

    Ok(result)
}

/// Every directory under `root` whose basename matches `pattern`, a plain name or a glob.
pub fn scan_matching(root: &Path, pattern: &str, ignore: &[String]) -> Result<Vec<PathBuf>> {
    let root = resolve_root(root)?;
    let mut found = Vec::new();
    walk(&root, &root, ignore, None, |entry| {
        if entry.file_type().is_dir() && glob_match(pattern, &entry.file_name().to_string_lossy()) {
            debug!("Matched directory '{}'", entry.path().display());
            found.push(entry.path().to_path_buf());
        }
    })?;
    Ok(found)
}

/// Regular files under `dir`, which must lie inside `root`.
///
/// A missing `dir` yields an empty list. `max_depth` of 1 lists only direct children.
pub fn list_files(
    dir: &Path,
    root: &Path,
    ignore: &[String],
    max_depth: Option<usize>,
) -> Result<Vec<PathBuf>> {
    if !dir.is_dir() {
        debug!("No files to list, '{}' is not a directory", dir.display());
        return Ok(Vec::new());
    }
    let mut files = Vec::new();
    walk(dir, root, ignore, max_depth, |entry| {
        if entry.file_type().is_file() {
            files.push(entry.path().to_path_buf());
        }
    })?;
    Ok(files)
}

/// Directories under `dir` (not `dir` itself), which must lie inside `root`.
pub fn list_directories(
    dir: &Path,
    root: &Path,
    ignore: &[String],
    max_depth: Option<usize>,
) -> Result<Vec<PathBuf>> {
    if !dir.is_dir() {
        return Ok(Vec::new());
    }
    let mut dirs = Vec::new();
    walk(dir, root, ignore, max_depth, |entry| {
        if entry.file_type().is_dir() {
            dirs.push(entry.path().to_path_buf());
        }
    })?;
    Ok(dirs)
}

fn walk<F>(
    start: &Path,
    root: &Path,
    ignore: &[String],
    max_depth: Option<usize>,
    mut visit: F,
) -> Result<()>
where
    F: FnMut(&DirEntry),
{
    let mut state = WalkState {
        root,
        ignore,
        max_depth,
        visited: HashSet::new(),
        deferred: VecDeque::new(),
    };
    state.visited.insert(canonical(start));
    state.walk_tree(start, 0, &mut visit);

    // Symlinked directories are entered only after the physical tree, so a
    // real directory always wins over a link that resolves to it.
    while let Some((link, depth)) = state.deferred.pop_front() {
        if !state.visited.insert(canonical(&link)) {
            debug!(
                "'{}' resolves to an already scanned directory, skipping",
                link.display()
            );
            continue;
        }
        state.walk_tree(&link, depth, &mut visit);
    }
    Ok(())
}

struct WalkState<'a> {
    root: &'a Path,
    ignore: &'a [String],
    max_depth: Option<usize>,
    /// Canonical paths of directories already entered.
    visited: HashSet<PathBuf>,
    /// Symlinked directories and their depth below the walk start.
    deferred: VecDeque<(PathBuf, usize)>,
}

impl WalkState<'_> {
    /// Walks `start`, found `base` levels below the walk start. A `base` of
    /// zero is the walk start itself, which is not visited; a deferred link is.
    fn walk_tree<F>(&mut self, start: &Path, base: usize, visit: &mut F)
    where
        F: FnMut(&DirEntry),
    {
        let mut builder = WalkDir::new(start)
            .follow_links(true)
            .sort_by_file_name()
            .min_depth(if base == 0 { 1 } else { 0 });
        if let Some(depth) = self.max_depth {
            builder = builder.max_depth(depth.saturating_sub(base));
        }
        let (root, ignore) = (self.root, self.ignore);
        let mut walker = builder.into_iter().filter_entry(|entry| {
            let name = entry.file_name().to_string_lossy();
            let rel = relative_path(entry.path(), root);
            let skip = is_ignored(&rel, &name, ignore);
            if skip {
                debug!("Ignoring '{}'", rel);
            }
            !skip
        });

        loop {
            let entry = match walker.next() {
                None => break,
                Some(Ok(entry)) => entry,
                Some(Err(err)) => {
                    report_walk_error(&err);
                    continue;
                }
            };
            if entry.file_type().is_dir() && entry.depth() > 0 {
                if entry.path_is_symlink() {
                    debug!("Deferring symlinked directory '{}'", entry.path().display());
                    self.deferred
                        .push_back((entry.path().to_path_buf(), base + entry.depth()));
                    walker.skip_current_dir();
                    continue;
                }
                if !self.visited.insert(canonical(entry.path())) {
                    debug!(
                        "Already visited '{}' through another path, skipping",
                        entry.path().display()
                    );
                    walker.skip_current_dir();
                    continue;
                }
            }
            visit(&entry);
        }
    }
}

fn canonical(path: &Path) -> PathBuf {
    fs::canonicalize(path).unwrap_or_else(|_| path.to_path_buf())
}

fn report_walk_error(err: &walkdir::Error) {
    let path = err
        .path()
        .map(|p| p.display().to_string())
        .unwrap_or_else(|| "<unknown>".to_string());
    if let Some(ancestor) = err.loop_ancestor() {
        warn!(
            "Skipping symlink loop at '{}' (points back to '{}')",
            path,
            ancestor.display()
        );
    } else if err.io_error().map(io::Error::kind) == Some(io::ErrorKind::PermissionDenied) {
        warn!("Permission denied, skipping '{}'", path);
    } else {
        warn!("Failed to access '{}' during scan: {}", path, err);
    }
}
