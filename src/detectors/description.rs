use std::path::Path;

use tracing::debug;

use super::utils::read_optional;
use super::{Detector, Signals};
use crate::error::DetectError;
use crate::utils::string::truncate_with_ellipsis;

pub const CLAUDE_FILE: &str = "CLAUDE.md";

/// Candidate files in priority order.
pub const DESCRIPTION_SOURCES: &[&str] = &[".ai/PROJECT_STATUS.md", CLAUDE_FILE, "README.md"];

pub const MAX_DESCRIPTION_CHARS: usize = 200;
const MAX_PARAGRAPH_LINES: usize = 3;

pub struct DescriptionDetector;

impl Detector for DescriptionDetector {
    fn name(&self) -> &'static str {
        "description"
    }

    fn detect(&self, root: &Path, signals: &mut Signals) -> Result<(), DetectError> {
        signals.description = fallback_name(root);
        let (description, claude_description) = extract_description(root)?;
        signals.description = description;
        signals.claude_description = claude_description;
        Ok(())
    }
}

/// Returns `(description, claude_description)`.
///
/// The description comes from the first candidate yielding text, else the
/// directory name. The second value is whatever `CLAUDE.md` yields, whether
/// or not it won. Candidates after the winner are not read, except
/// `CLAUDE.md`, whose read errors are then ignored.
pub fn extract_description(root: &Path) -> Result<(String, Option<String>), DetectError> {
    let mut description = None;
    let mut claude_description = None;

    for source in DESCRIPTION_SOURCES {
        let found = description.is_some();
        if found && *source != CLAUDE_FILE {
            break;
        }

        let content = match read_optional(&root.join(source)) {
            Ok(content) => content,
            Err(err) if found => {
                debug!(error = %err, "ignoring unreadable {source}");
                None
            }
            Err(err) => return Err(err),
        };
        let text = content
            .map(|content| extract_from_markdown(&content))
            .filter(|text| !text.is_empty());

        if *source == CLAUDE_FILE {
            claude_description = text.clone();
        }
        if description.is_none() {
            description = text;
        }
    }

    let description = description.unwrap_or_else(|| fallback_name(root));
    Ok((description, claude_description))
}

/// Pulls the first paragraph after the first heading.
///
/// Leading blank lines and badge/image lines are skipped. Up to three
/// non-blank lines are joined with spaces; collection stops at the first
/// blank line after text or at the next heading. Empty when there is no
/// heading.
pub fn extract_from_markdown(content: &str) -> String {
    let mut lines: Vec<&str> = Vec::new();
    let mut found_heading = false;
    let mut past_heading = false;

    for line in content.lines() {
        let trimmed = line.trim();

        if lines.is_empty() && trimmed.is_empty() {
            continue;
        }
        if trimmed.starts_with("![") || trimmed.starts_with("<img") {
            continue;
        }

        if trimmed.starts_with('#') {
            if found_heading && past_heading {
                break;
            }
            found_heading = true;
            continue;
        }

        if !found_heading {
            continue;
        }

        if trimmed.is_empty() {
            if past_heading {
                break;
            }
            continue;
        }

        past_heading = true;
        lines.push(trimmed);
        if lines.len() >= MAX_PARAGRAPH_LINES {
            break;
        }
    }

    truncate_with_ellipsis(&lines.join(" "), MAX_DESCRIPTION_CHARS)
}

fn fallback_name(root: &Path) -> String {
    root.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_default()
}
