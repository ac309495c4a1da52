use chrono::{DateTime, Utc};
use clap::ValueEnum;

use super::{render_table, Style};
use crate::project::Project;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    #[default]
    Table,
    Json,
}

impl OutputFormat {
    pub fn as_str(&self) -> &'static str {
        match self {
            OutputFormat::Table => "table",
            OutputFormat::Json => "json",
        }
    }
}

pub struct OutputFormatter;

impl OutputFormatter {
    pub fn format_list(
        projects: &[&Project],
        format: OutputFormat,
        style: Style,
        now: DateTime<Utc>,
    ) -> serde_json::Result<String> {
        match format {
            OutputFormat::Table => Ok(render_table(projects, style, now)),
            OutputFormat::Json => serde_json::to_string_pretty(projects),
        }
    }

    pub fn format_one(
        project: &Project,
        format: OutputFormat,
        style: Style,
        now: DateTime<Utc>,
    ) -> serde_json::Result<String> {
        match format {
            OutputFormat::Table => Ok(super::render_detail(project, style, now)),
            OutputFormat::Json => serde_json::to_string_pretty(project),
        }
    }
}
