use std::fmt;

use chrono::{DateTime, Duration, Utc};
use clap::ValueEnum;
use serde::{Deserialize, Serialize};

use crate::git::CommitInfo;

pub const ACTIVE_DAYS: i64 = 30;
pub const RECENT_DAYS: i64 = 90;

/// Case-insensitive substrings in a commit subject that mark work in progress.
pub const WIP_MARKERS: &[&str] = &["wip", "work in progress"];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Status {
    Active,
    Wip,
    Recent,
    Paused,
}

impl Status {
    /// Dashboard order.
    pub const ALL: [Status; 4] = [Status::Active, Status::Wip, Status::Recent, Status::Paused];

    pub fn as_str(&self) -> &'static str {
        match self {
            Status::Active => "active",
            Status::Wip => "wip",
            Status::Recent => "recent",
            Status::Paused => "paused",
        }
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

pub fn has_wip_signal(commits: &[CommitInfo]) -> bool {
    commits.iter().any(|commit| {
        let subject = commit.message.to_lowercase();
        WIP_MARKERS.iter().any(|marker| subject.contains(marker))
    })
}

pub fn parse_commit_date(date: &str) -> Option<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(date)
        .ok()
        .map(|dt| dt.with_timezone(&Utc))
}

/// Decision table, first match wins:
///
/// | WIP signal | last commit     | status   |
/// |------------|-----------------|----------|
/// | yes        | within 30 days  | `wip`    |
/// | -          | within 30 days  | `active` |
/// | -          | within 90 days  | `recent` |
/// | -          | older or none   | `paused` |
pub fn classify(last_commit: Option<DateTime<Utc>>, wip: bool, now: DateTime<Utc>) -> Status {
    let within = |days: i64| last_commit.is_some_and(|at| at > now - Duration::days(days));

    if wip && within(ACTIVE_DAYS) {
        Status::Wip
    } else if within(ACTIVE_DAYS) {
        Status::Active
    } else if within(RECENT_DAYS) {
        Status::Recent
    } else {
        Status::Paused
    }
}

/// Status from the raw last-commit date and the recent commit subjects. An
/// empty or unparseable date counts as no history.
pub fn infer_status(last_commit_date: &str, commits: &[CommitInfo], now: DateTime<Utc>) -> Status {
    classify(parse_commit_date(last_commit_date), has_wip_signal(commits), now)
}
