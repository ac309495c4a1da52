//! Marker detectors: independent probes over a repository's file tree.
//!
//! Each [`Detector`] reads files under the repository root and fills its own
//! part of [`Signals`]. The [`DetectorRegistry`] runs them in registration
//! order and isolates failures: a detector that errors leaves its fields at
//! their defaults and contributes one warning string.

pub mod deployment;
pub mod description;
pub mod fork;
pub mod manifest;
pub mod nested;
pub mod project_type;
pub mod references;
pub mod tech_stack;
pub mod todo;
pub mod utils;

pub use deployment::DeploymentDetector;
pub use description::DescriptionDetector;
pub use fork::{github_owner, is_fork};
pub use nested::NestedRepoDetector;
pub use project_type::ProjectTypeDetector;
pub use references::{ReferenceDetector, ReferenceFiles};
pub use tech_stack::TechStackDetector;
pub use todo::{TodoCount, TodoDetector};

use std::path::{Path, PathBuf};

use tracing::warn;

use crate::error::DetectError;

/// Everything the file-tree probes learn about one repository.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Signals {
    pub tech_stack: Vec<String>,
    pub inferred_type: String,
    pub deployment: Vec<String>,
    pub references: ReferenceFiles,
    pub description: String,
    pub claude_description: Option<String>,
    pub todo: TodoCount,
    pub nested_repos: Vec<PathBuf>,
}

pub trait Detector: Send + Sync {
    /// Short tag used to prefix warnings, e.g. `tech-stack`.
    fn name(&self) -> &'static str;

    fn detect(&self, root: &Path, signals: &mut Signals) -> Result<(), DetectError>;
}

pub struct DetectorRegistry {
    detectors: Vec<Box<dyn Detector>>,
}

impl DetectorRegistry {
    /// The built-in detectors. Type inference reads the tech stack, so it is
    /// registered after it.
    pub fn new() -> Self {
        let mut registry = Self::empty();

        registry.register(Box::new(TechStackDetector));
        registry.register(Box::new(ProjectTypeDetector));
        registry.register(Box::new(ReferenceDetector));
        registry.register(Box::new(DescriptionDetector));
        registry.register(Box::new(TodoDetector));
        registry.register(Box::new(DeploymentDetector));
        registry.register(Box::new(NestedRepoDetector));
        registry
    }

    pub fn empty() -> Self {
        Self {
            detectors: Vec::new(),
        }
    }

    pub fn register(&mut self, detector: Box<dyn Detector>) {
        self.detectors.push(detector);
    }

    pub fn all_detectors(&self) -> &[Box<dyn Detector>] {
        &self.detectors
    }

    /// Runs every detector against `root`. Returns the collected signals and
    /// one `"<name>: <error>"` warning per failed detector.
    pub fn run(&self, root: &Path) -> (Signals, Vec<String>) {
        let mut signals = Signals::default();
        let mut errors = Vec::new();

        for detector in &self.detectors {
            if let Err(err) = detector.detect(root, &mut signals) {
                warn!(repo = %root.display(), detector = detector.name(), error = %err, "detector failed");
                errors.push(format!("{}: {err}", detector.name()));
            }
        }

        (signals, errors)
    }
}

impl Default for DetectorRegistry {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    struct FailingDetector;

    impl Detector for FailingDetector {
        fn name(&self) -> &'static str {
            "always-fails"
        }

        fn detect(&self, root: &Path, _signals: &mut Signals) -> Result<(), DetectError> {
            Err(DetectError::read(
                root.join("x"),
                std::io::Error::from(std::io::ErrorKind::PermissionDenied),
            ))
        }
    }

    #[test]
    fn test_registry_creation() {
        let registry = DetectorRegistry::new();
        let names: Vec<&str> = registry.all_detectors().iter().map(|d| d.name()).collect();
        assert_eq!(
            names,
            vec![
                "tech-stack",
                "type",
                "references",
                "description",
                "todo",
                "deployment",
                "nested-repos"
            ]
        );
    }

    #[test]
    fn test_failed_detector_becomes_warning() {
        let temp_dir = TempDir::new().unwrap();
        fs::write(temp_dir.path().join("go.mod"), "module x").unwrap();

        let mut registry = DetectorRegistry::empty();
        registry.register(Box::new(FailingDetector));
        registry.register(Box::new(TechStackDetector));

        let (signals, errors) = registry.run(temp_dir.path());

        assert_eq!(errors.len(), 1);
        assert!(errors[0].starts_with("always-fails: failed to read"));
        assert_eq!(signals.tech_stack, vec!["go"]);
    }

    #[test]
    fn test_empty_repository_gets_defaults() {
        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path().join("bare-project");
        fs::create_dir_all(&root).unwrap();

        let (signals, errors) = DetectorRegistry::new().run(&root);

        assert!(errors.is_empty());
        assert!(signals.tech_stack.is_empty());
        assert_eq!(signals.inferred_type, "unknown");
        assert_eq!(signals.description, "bare-project");
        assert_eq!(signals.claude_description, None);
        assert_eq!(signals.todo, TodoCount::default());
        assert!(signals.deployment.is_empty());
        assert!(signals.nested_repos.is_empty());
    }
}
