use std::path::Path;

use serde::{Deserialize, Serialize};

use super::utils::{file_exists, list_dir};
use super::{Detector, Signals};
use crate::error::DetectError;

pub const ROOT_REFERENCE_FILES: &[&str] = &[
    "README.md",
    "CLAUDE.md",
    "AGENT.md",
    "CHANGELOG.md",
    "TODO.md",
    "CONTRIBUTING.md",
    "LICENSE",
];

/// Inventory of documentation-like files in a repository.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReferenceFiles {
    #[serde(default)]
    pub root: Vec<String>,
    #[serde(default)]
    pub ai: Vec<String>,
    #[serde(default)]
    pub cursor: Vec<String>,
    #[serde(default)]
    pub docs: Vec<String>,
    #[serde(default)]
    pub tasks: Vec<String>,
}

impl ReferenceFiles {
    pub fn is_empty(&self) -> bool {
        self.root.is_empty()
            && self.ai.is_empty()
            && self.cursor.is_empty()
            && self.docs.is_empty()
            && self.tasks.is_empty()
    }
}

pub struct ReferenceDetector;

impl Detector for ReferenceDetector {
    fn name(&self) -> &'static str {
        "references"
    }

    fn detect(&self, root: &Path, signals: &mut Signals) -> Result<(), DetectError> {
        signals.references = find_references(root)?;
        Ok(())
    }
}

pub fn find_references(root: &Path) -> Result<ReferenceFiles, DetectError> {
    Ok(ReferenceFiles {
        root: ROOT_REFERENCE_FILES
            .iter()
            .filter(|name| file_exists(root, name))
            .map(|name| name.to_string())
            .collect(),
        ai: list_dir(&root.join(".ai"), false)?,
        cursor: list_dir(&root.join(".cursor"), false)?,
        docs: list_dir(&root.join("docs"), false)?,
        tasks: list_dir(&root.join("tasks"), false)?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_find_references() {
        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path();
        fs::write(root.join("README.md"), "").unwrap();
        fs::write(root.join("LICENSE"), "").unwrap();
        fs::write(root.join("NOTES.md"), "").unwrap();
        fs::create_dir_all(root.join(".ai")).unwrap();
        fs::write(root.join(".ai/PROJECT_STATUS.md"), "").unwrap();
        fs::write(root.join(".ai/.DS_Store"), "").unwrap();
        fs::create_dir_all(root.join("docs/api")).unwrap();
        fs::write(root.join("docs/setup.md"), "").unwrap();
        fs::write(root.join("docs/api/deep.md"), "").unwrap();
        fs::create_dir_all(root.join("tasks")).unwrap();
        fs::write(root.join("tasks/02-b.md"), "").unwrap();
        fs::write(root.join("tasks/01-a.md"), "").unwrap();

        let refs = find_references(root).unwrap();

        assert_eq!(
            refs,
            ReferenceFiles {
                root: vec!["README.md".to_string(), "LICENSE".to_string()],
                ai: vec!["PROJECT_STATUS.md".to_string()],
                cursor: vec![],
                docs: vec!["api".to_string(), "setup.md".to_string()],
                tasks: vec!["01-a.md".to_string(), "02-b.md".to_string()],
            }
        );
    }

    #[test]
    fn test_empty_repository() {
        let temp_dir = TempDir::new().unwrap();
        assert!(find_references(temp_dir.path()).unwrap().is_empty());
    }
}
