//! The per-repository metadata record and how it is derived.

pub mod extract;
pub mod state;

pub use extract::{Extractor, COMMIT_WINDOW, RECENT_COMMIT_LIMIT};
pub use state::{classify, has_wip_signal, infer_status, Status};

pub use crate::detectors::ReferenceFiles;
pub use crate::git::CommitInfo;

use std::path::PathBuf;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Everything known about one repository as of its last scan.
///
/// `path` is the identity key: a fresh scan of the same path replaces the
/// whole record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Project {
    pub name: String,
    pub path: PathBuf,
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub claude_description: Option<String>,
    #[serde(default)]
    pub tech_stack: Vec<String>,
    pub inferred_type: String,
    pub status: Status,
    #[serde(default)]
    pub is_fork: bool,
    #[serde(default)]
    pub git_remote: String,
    #[serde(default)]
    pub last_commit_date: String,
    #[serde(default)]
    pub last_commit_message: String,
    #[serde(default)]
    pub last_commit_author: String,
    #[serde(default)]
    pub recent_commits: Vec<CommitInfo>,
    #[serde(default)]
    pub commit_count_8m: u32,
    #[serde(default)]
    pub contributors: Vec<String>,
    #[serde(default)]
    pub reference_files: ReferenceFiles,
    #[serde(default)]
    pub todo_open: u32,
    #[serde(default)]
    pub todo_closed: u32,
    #[serde(default)]
    pub deployment: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub nested_repos: Vec<PathBuf>,
    #[serde(default)]
    pub plans_count: usize,
    #[serde(default)]
    pub ai_docs_count: usize,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub errors: Vec<String>,
    pub scanned_at: DateTime<Utc>,
}

impl Project {
    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    /// Parsed `last_commit_date`, if present and well-formed.
    pub fn last_commit_time(&self) -> Option<DateTime<Utc>> {
        state::parse_commit_date(&self.last_commit_date)
    }
}
