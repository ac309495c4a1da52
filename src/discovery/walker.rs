use std::ffi::OsStr;
use std::path::{Path, PathBuf};

use tracing::{debug, trace};
use walkdir::WalkDir;

use crate::error::IoError;

pub const GIT_DIR: &str = ".git";

/// Directory names that are never descended into.
pub const SKIPPED_DIRS: &[&str] = &["node_modules", "vendor", ".git", "__pycache__", ".bundle"];

/// Returns true if `dir` directly contains a `.git` directory.
pub fn is_repo_root(dir: &Path) -> bool {
    dir.join(GIT_DIR).is_dir()
}

/// Walks `root` depth-first and returns every repository root beneath it.
///
/// Hidden and denylisted directories are pruned (the root itself is exempt),
/// and the walk never descends into a repository once found, so no returned
/// path is nested inside another. Unreadable entries are skipped silently.
/// Only a missing or non-directory `root` is an error.
pub fn find_repos(root: &Path) -> Result<Vec<PathBuf>, IoError> {
    let root = root
        .canonicalize()
        .map_err(|_| IoError::directory_not_found(root))?;
    if !root.is_dir() {
        return Err(IoError::not_a_directory(root));
    }

    let mut repos: Vec<PathBuf> = Vec::new();
    let mut walker = WalkDir::new(&root)
        .follow_links(false)
        .sort_by_file_name()
        .into_iter();

    while let Some(next) = walker.next() {
        let entry = match next {
            Ok(entry) => entry,
            Err(err) => {
                trace!(error = %err, "skipping unreadable entry");
                continue;
            }
        };

        if !entry.file_type().is_dir() {
            continue;
        }

        if entry.depth() > 0 && is_pruned_name(entry.file_name()) {
            walker.skip_current_dir();
            continue;
        }

        let path = entry.path();
        if repos.iter().any(|repo| path != repo && path.starts_with(repo)) {
            walker.skip_current_dir();
            continue;
        }

        if is_repo_root(path) {
            debug!(repo = %path.display(), "found repository");
            repos.push(path.to_path_buf());
            walker.skip_current_dir();
        }
    }

    Ok(repos)
}

fn is_pruned_name(name: &OsStr) -> bool {
    let name = name.to_string_lossy();
    name.starts_with('.') || SKIPPED_DIRS.contains(&name.as_ref())
}
