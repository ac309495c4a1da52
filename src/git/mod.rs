//! Thin facade over the `git` binary.
//!
//! Every query runs `git` as a subprocess with the repository as working
//! directory and a per-call timeout. Log-based queries return a [`GitError`]
//! on failure; identity, remote and count queries fall back to empty/zero.

mod log;
mod runner;

pub use log::{parse_commit_count, parse_contributors, parse_log, parse_log_line, CommitInfo};
pub use runner::{GitRunner, DEFAULT_TIMEOUT};

use std::path::Path;

use crate::error::GitError;

pub const GIT_COMMAND: &str = "git";

pub const LOG_FORMAT: &str = "--format=%H|%aI|%an|%s";
pub const LOG_FIELD_SEPARATOR: char = '|';

/// The scanning user's known identities, used for fork detection.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Identity {
    /// `git config user.name` as seen from the repository.
    pub user_name: String,
    /// `git config --global github.user`.
    pub github_user: String,
}

/// Git queries needed to build a project record.
///
/// [`GitRunner`] is the real implementation; tests substitute a fixed one.
pub trait GitProvider: Send + Sync {
    /// Up to `limit` commits, newest first.
    fn recent_commits(&self, dir: &Path, limit: usize) -> Result<Vec<CommitInfo>, GitError>;

    /// Number of commits reachable from HEAD since `since` (e.g. "8 months ago").
    fn commit_count_since(&self, dir: &Path, since: &str) -> u32;

    /// Unique author names in first-seen order.
    fn contributors(&self, dir: &Path) -> Result<Vec<String>, GitError>;

    /// URL of the `origin` remote, or an empty string.
    fn remote_url(&self, dir: &Path) -> String;

    fn identity(&self, dir: &Path) -> Identity;
}

impl GitProvider for GitRunner {
    fn recent_commits(&self, dir: &Path, limit: usize) -> Result<Vec<CommitInfo>, GitError> {
        let limit = limit.to_string();
        let out = self.run(dir, &["log", LOG_FORMAT, "-n", &limit])?;
        Ok(parse_log(&out))
    }

    fn commit_count_since(&self, dir: &Path, since: &str) -> u32 {
        let since = format!("--since={since}");
        self.run(dir, &["rev-list", "--count", &since, "HEAD"])
            .map(|out| parse_commit_count(&out))
            .unwrap_or(0)
    }

    fn contributors(&self, dir: &Path) -> Result<Vec<String>, GitError> {
        let out = self.run(dir, &["log", "--format=%an"])?;
        Ok(parse_contributors(&out))
    }

    fn remote_url(&self, dir: &Path) -> String {
        self.run(dir, &["remote", "get-url", "origin"])
            .unwrap_or_default()
    }

    fn identity(&self, dir: &Path) -> Identity {
        Identity {
            user_name: self.run(dir, &["config", "user.name"]).unwrap_or_default(),
            github_user: self
                .run(dir, &["config", "--global", "github.user"])
                .unwrap_or_default(),
        }
    }
}
