use std::fs;
use std::path::{Path, PathBuf};

use super::{Detector, Signals};
use crate::discovery::is_repo_root;
use crate::error::DetectError;

/// Immediate child directories that are repositories themselves.
///
/// Only one level deep; hidden children are ignored. The tree walker never
/// reports these, so this is the only place they are recorded.
pub struct NestedRepoDetector;

impl Detector for NestedRepoDetector {
    fn name(&self) -> &'static str {
        "nested-repos"
    }

    fn detect(&self, root: &Path, signals: &mut Signals) -> Result<(), DetectError> {
        signals.nested_repos = find_nested_repos(root)?;
        Ok(())
    }
}

pub fn find_nested_repos(root: &Path) -> Result<Vec<PathBuf>, DetectError> {
    let entries = fs::read_dir(root).map_err(|e| DetectError::read(root, e))?;

    let mut nested: Vec<PathBuf> = entries
        .flatten()
        .filter(|entry| !entry.file_name().to_string_lossy().starts_with('.'))
        .map(|entry| entry.path())
        .filter(|path| path.is_dir() && is_repo_root(path))
        .collect();
    nested.sort();
    Ok(nested)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_finds_only_immediate_children() {
        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path();
        fs::create_dir_all(root.join(".git")).unwrap();
        fs::create_dir_all(root.join("plugin/.git")).unwrap();
        fs::create_dir_all(root.join("libs/deep/.git")).unwrap();
        fs::create_dir_all(root.join("src")).unwrap();
        fs::create_dir_all(root.join(".cache/.git")).unwrap();

        let nested = find_nested_repos(root).unwrap();

        assert_eq!(nested, vec![root.join("plugin")]);
    }

    #[test]
    fn test_no_nested_repos() {
        let temp_dir = TempDir::new().unwrap();
        assert!(find_nested_repos(temp_dir.path()).unwrap().is_empty());
    }
}
