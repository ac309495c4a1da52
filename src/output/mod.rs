//! Terminal rendering. Nothing here holds global state: color is decided by
//! the caller and passed in as a [`Style`].

pub mod detail;
pub mod formatter;
pub mod summary;
pub mod table;

pub use detail::render_detail;
pub use formatter::{OutputFormat, OutputFormatter};
pub use summary::render_summary;
pub use table::render_table;

use chrono::{DateTime, Utc};
use owo_colors::OwoColorize;

use crate::project::{state::parse_commit_date, Status};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Style {
    color: bool,
}

impl Style {
    pub fn new(color: bool) -> Self {
        Self { color }
    }

    pub fn plain() -> Self {
        Self::new(false)
    }

    pub fn is_colored(&self) -> bool {
        self.color
    }

    fn paint(&self, text: &str, f: impl Fn(&str) -> String) -> String {
        if self.color {
            f(text)
        } else {
            text.to_string()
        }
    }

    pub fn bold(&self, text: &str) -> String {
        self.paint(text, |t| t.bold().to_string())
    }

    pub fn green(&self, text: &str) -> String {
        self.paint(text, |t| t.green().to_string())
    }

    pub fn blue(&self, text: &str) -> String {
        self.paint(text, |t| t.blue().to_string())
    }

    pub fn yellow(&self, text: &str) -> String {
        self.paint(text, |t| t.yellow().to_string())
    }

    pub fn gray(&self, text: &str) -> String {
        self.paint(text, |t| t.bright_black().to_string())
    }

    pub fn red(&self, text: &str) -> String {
        self.paint(text, |t| t.red().to_string())
    }

    pub fn cyan(&self, text: &str) -> String {
        self.paint(text, |t| t.cyan().to_string())
    }

    /// `text` colored the way `status` is shown everywhere.
    pub fn status_text(&self, status: Status, text: &str) -> String {
        match status {
            Status::Active => self.green(text),
            Status::Wip => self.blue(text),
            Status::Recent => self.yellow(text),
            Status::Paused => self.gray(text),
        }
    }

    pub fn status(&self, status: Status) -> String {
        self.status_text(status, status.as_str())
    }
}

/// Human age of an ISO-8601 commit date relative to `now`.
pub fn format_age(date: &str, now: DateTime<Utc>) -> String {
    if date.is_empty() {
        return "never".to_string();
    }
    let Some(at) = parse_commit_date(date) else {
        return date.chars().take(10).collect();
    };

    let hours = (now - at).num_hours();
    match hours {
        h if h < 24 => "today".to_string(),
        h if h < 48 => "yesterday".to_string(),
        h if h < 7 * 24 => format!("{}d ago", h / 24),
        h if h < 30 * 24 => format!("{}w ago", h / (24 * 7)),
        h if h < 365 * 24 => format!("{}mo ago", h / (24 * 30)),
        h => format!("{}y ago", h / (24 * 365)),
    }
}
