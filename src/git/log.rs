use serde::{Deserialize, Serialize};

use super::LOG_FIELD_SEPARATOR;

/// One commit as reported by `git log --format=%H|%aI|%an|%s`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommitInfo {
    pub hash: String,
    /// Author date, strict ISO-8601.
    pub date: String,
    pub author: String,
    /// Subject line.
    pub message: String,
}

/// Parses a single `hash|date|author|subject` line.
///
/// The subject may itself contain the separator; only the first three split.
pub fn parse_log_line(line: &str) -> Option<CommitInfo> {
    let mut parts = line.splitn(4, LOG_FIELD_SEPARATOR);
    let hash = parts.next()?;
    let date = parts.next()?;
    let author = parts.next()?;
    let message = parts.next()?;

    Some(CommitInfo {
        hash: hash.to_string(),
        date: date.to_string(),
        author: author.to_string(),
        message: message.to_string(),
    })
}

/// Parses log output, dropping malformed lines.
pub fn parse_log(output: &str) -> Vec<CommitInfo> {
    output
        .lines()
        .filter(|line| !line.is_empty())
        .filter_map(parse_log_line)
        .collect()
}

pub fn parse_commit_count(output: &str) -> u32 {
    output.trim().parse().unwrap_or(0)
}

/// Deduplicates author names, keeping first-seen order. Case-sensitive.
pub fn parse_contributors(output: &str) -> Vec<String> {
    let mut names: Vec<String> = Vec::new();
    for name in output.lines().map(str::trim) {
        if !name.is_empty() && !names.iter().any(|n| n == name) {
            names.push(name.to_string());
        }
    }
    names
}
