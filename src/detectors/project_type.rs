use std::path::Path;

use super::utils::{file_exists, has_extension, list_dir};
use super::{Detector, Signals};
use crate::error::DetectError;

pub const UNKNOWN_TYPE: &str = "unknown";

/// Classifies the project from its tech stack, falling back to the shape of
/// the root directory.
pub struct ProjectTypeDetector;

impl Detector for ProjectTypeDetector {
    fn name(&self) -> &'static str {
        "type"
    }

    fn detect(&self, root: &Path, signals: &mut Signals) -> Result<(), DetectError> {
        // Leave a usable value behind even if the directory listing fails.
        signals.inferred_type = UNKNOWN_TYPE.to_string();
        signals.inferred_type = infer_type(root, &signals.tech_stack)?;
        Ok(())
    }
}

fn framework_type(tag: &str) -> Option<&'static str> {
    match tag {
        "rails" => Some("rails-app"),
        "next" => Some("next-app"),
        "react" => Some("react-app"),
        "vue" => Some("vue-app"),
        _ => None,
    }
}

fn language_type(tag: &str) -> Option<&'static str> {
    match tag {
        "node" => Some("node-app"),
        "python" => Some("python-app"),
        "go" => Some("go-app"),
        "swift" => Some("swift-app"),
        "rust" => Some("rust-app"),
        "ruby" => Some("ruby-app"),
        _ => None,
    }
}

/// Priority: framework tags, then language tags (each in stack order), then
/// docs-only, then loose scripts, then `unknown`.
pub fn infer_type(root: &Path, stack: &[String]) -> Result<String, DetectError> {
    if let Some(kind) = stack.iter().find_map(|tag| framework_type(tag)) {
        return Ok(kind.to_string());
    }
    if let Some(kind) = stack.iter().find_map(|tag| language_type(tag)) {
        return Ok(kind.to_string());
    }

    let entries = list_dir(root, false)?;

    if is_docs_dir(root, &entries) {
        return Ok("docs".to_string());
    }

    if entries
        .iter()
        .any(|name| has_extension(name, "sh") || has_extension(name, "py"))
    {
        return Ok("script".to_string());
    }

    Ok(UNKNOWN_TYPE.to_string())
}

/// More than half of the visible root entries are markdown files.
fn is_docs_dir(root: &Path, entries: &[String]) -> bool {
    if file_exists(root, "main.go") || file_exists(root, "index.js") {
        return false;
    }
    let markdown = entries.iter().filter(|n| has_extension(n, "md")).count();
    markdown > 0 && markdown * 2 > entries.len()
}
