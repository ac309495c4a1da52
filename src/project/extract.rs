use std::path::Path;

use chrono::{DateTime, Utc};
use tracing::{debug, warn};

use super::{state, Project};
use crate::detectors::{github_owner, is_fork, DetectorRegistry};
use crate::git::{GitProvider, GitRunner};

pub const RECENT_COMMIT_LIMIT: usize = 10;

/// Window for `commit_count_8m`, in git's relative date syntax.
pub const COMMIT_WINDOW: &str = "8 months ago";

/// Builds a [`Project`] for a repository path.
///
/// Never fails: each step that goes wrong adds a `"<step>: <message>"` entry
/// to `Project::errors` and leaves its fields at their defaults.
pub struct Extractor<G: GitProvider = GitRunner> {
    git: G,
    detectors: DetectorRegistry,
}

impl Extractor<GitRunner> {
    pub fn with_git(git: GitRunner) -> Self {
        Self::new(git, DetectorRegistry::new())
    }
}

impl<G: GitProvider> Extractor<G> {
    pub fn new(git: G, detectors: DetectorRegistry) -> Self {
        Self { git, detectors }
    }

    pub fn extract(&self, repo: &Path) -> Project {
        self.extract_at(repo, Utc::now())
    }

    /// Like [`Extractor::extract`] with an explicit clock for status.
    pub fn extract_at(&self, repo: &Path, now: DateTime<Utc>) -> Project {
        debug!(repo = %repo.display(), "extracting");
        let mut errors = Vec::new();

        let recent_commits = match self.git.recent_commits(repo, RECENT_COMMIT_LIMIT) {
            Ok(commits) => commits,
            Err(err) => {
                errors.push(format!("git log: {err}"));
                Vec::new()
            }
        };

        let contributors = match self.git.contributors(repo) {
            Ok(names) => names,
            Err(err) => {
                errors.push(format!("git contributors: {err}"));
                Vec::new()
            }
        };

        let commit_count_8m = self.git.commit_count_since(repo, COMMIT_WINDOW);
        let git_remote = self.git.remote_url(repo);

        // Identity is only consulted when the remote names a GitHub owner.
        let is_fork = github_owner(&git_remote).is_some()
            && is_fork(&git_remote, &self.git.identity(repo));

        let (signals, detector_errors) = self.detectors.run(repo);
        errors.extend(detector_errors);

        let (last_commit_date, last_commit_message, last_commit_author) = recent_commits
            .first()
            .map(|c| (c.date.clone(), c.message.clone(), c.author.clone()))
            .unwrap_or_default();

        let status = state::infer_status(&last_commit_date, &recent_commits, now);

        if !errors.is_empty() {
            warn!(repo = %repo.display(), count = errors.len(), "extraction finished with errors");
        }

        Project {
            name: repo
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_default(),
            path: repo.to_path_buf(),
            description: signals.description,
            claude_description: signals.claude_description,
            tech_stack: signals.tech_stack,
            inferred_type: signals.inferred_type,
            status,
            is_fork,
            git_remote,
            last_commit_date,
            last_commit_message,
            last_commit_author,
            recent_commits,
            commit_count_8m,
            contributors,
            plans_count: signals.references.tasks.len(),
            ai_docs_count: signals.references.ai.len(),
            reference_files: signals.references,
            todo_open: signals.todo.open,
            todo_closed: signals.todo.closed,
            deployment: signals.deployment,
            nested_repos: signals.nested_repos,
            errors,
            scanned_at: now,
        }
    }
}
