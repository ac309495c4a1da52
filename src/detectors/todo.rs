use std::path::Path;

use super::utils::read_optional;
use super::{Detector, Signals};
use crate::error::DetectError;

pub const TODO_FILE: &str = "TODO.md";

const OPEN_MARKERS: &[&str] = &["- [ ]", "* [ ]"];
const CLOSED_MARKERS: &[&str] = &["- [x]", "- [X]", "* [x]", "* [X]"];

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TodoCount {
    pub open: u32,
    pub closed: u32,
}

pub struct TodoDetector;

impl Detector for TodoDetector {
    fn name(&self) -> &'static str {
        "todo"
    }

    fn detect(&self, root: &Path, signals: &mut Signals) -> Result<(), DetectError> {
        signals.todo = read_optional(&root.join(TODO_FILE))?
            .map(|content| count_todos(&content))
            .unwrap_or_default();
        Ok(())
    }
}

/// Counts markdown checklist items.
pub fn count_todos(content: &str) -> TodoCount {
    let mut count = TodoCount::default();
    for line in content.lines().map(str::trim) {
        if OPEN_MARKERS.iter().any(|m| line.starts_with(m)) {
            count.open += 1;
        } else if CLOSED_MARKERS.iter().any(|m| line.starts_with(m)) {
            count.closed += 1;
        }
    }
    count
}
