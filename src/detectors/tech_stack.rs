use std::path::Path;

use super::manifest::PackageManifest;
use super::utils::{contains_ci, file_exists, has_extension, list_dir, read_optional};
use super::{Detector, Signals};
use crate::error::DetectError;

pub const GEMFILE: &str = "Gemfile";
pub const PYTHON_MANIFESTS: &[&str] = &["requirements.txt", "pyproject.toml", "setup.py"];
pub const NODE_FRAMEWORKS: &[&str] = &["react", "next", "vue", "typescript"];

/// Maps ecosystem manifests to technology tags, in a fixed order.
pub struct TechStackDetector;

impl Detector for TechStackDetector {
    fn name(&self) -> &'static str {
        "tech-stack"
    }

    fn detect(&self, root: &Path, signals: &mut Signals) -> Result<(), DetectError> {
        signals.tech_stack = detect_tech_stack(root)?;
        Ok(())
    }
}

pub fn detect_tech_stack(root: &Path) -> Result<Vec<String>, DetectError> {
    let mut stack: Vec<&str> = Vec::new();

    if let Some(gemfile) = read_optional(&root.join(GEMFILE))? {
        stack.push("ruby");
        if contains_ci(&gemfile, "rails") {
            stack.push("rails");
        }
    }

    if let Some(manifest) = PackageManifest::load(root)? {
        stack.push("node");
        for &framework in NODE_FRAMEWORKS {
            if manifest.depends_on(framework) {
                stack.push(framework);
            }
        }
    }

    if PYTHON_MANIFESTS.iter().any(|name| file_exists(root, name)) {
        stack.push("python");
    }

    if file_exists(root, "go.mod") {
        stack.push("go");
    }

    if file_exists(root, "Package.swift") || has_xcode_project(root)? {
        stack.push("swift");
    }

    if file_exists(root, "Cargo.toml") {
        stack.push("rust");
    }

    Ok(stack.into_iter().map(str::to_string).collect())
}

fn has_xcode_project(root: &Path) -> Result<bool, DetectError> {
    Ok(list_dir(root, false)?
        .iter()
        .any(|name| has_extension(name, "xcodeproj")))
}
