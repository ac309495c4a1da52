use chrono::{DateTime, Utc};

use super::{format_age, Style};
use crate::project::Project;
use crate::utils::string::truncate_with_ellipsis;

pub const TECH_COLUMN_CHARS: usize = 20;

const HEADERS: [&str; 6] = ["Name", "Type", "Status", "Tech", "Last Commit", "Commits(8m)"];
const STATUS_COLUMN: usize = 2;

fn row(project: &Project, now: DateTime<Utc>) -> [String; 6] {
    [
        project.name.clone(),
        project.inferred_type.clone(),
        project.status.as_str().to_string(),
        truncate_with_ellipsis(&project.tech_stack.join(","), TECH_COLUMN_CHARS),
        format_age(&project.last_commit_date, now),
        project.commit_count_8m.to_string(),
    ]
}

fn pad(text: &str, width: usize) -> String {
    let len = text.chars().count();
    format!("{text}{}", " ".repeat(width.saturating_sub(len)))
}

/// Column-aligned table, one project per row, followed by a count line.
///
/// Widths are computed on the uncolored text so escape codes never skew
/// alignment.
pub fn render_table(projects: &[&Project], style: Style, now: DateTime<Utc>) -> String {
    if projects.is_empty() {
        return "No projects found.\n".to_string();
    }

    let rows: Vec<[String; 6]> = projects.iter().map(|p| row(p, now)).collect();
    let mut widths = HEADERS.map(|h| h.chars().count());
    for cells in &rows {
        for (width, cell) in widths.iter_mut().zip(cells) {
            *width = (*width).max(cell.chars().count());
        }
    }

    let mut out = String::new();
    let header: Vec<String> = HEADERS
        .iter()
        .zip(widths)
        .map(|(h, w)| style.bold(&pad(h, w)))
        .collect();
    out.push_str(header.join("  ").trim_end());
    out.push('\n');

    for (project, cells) in projects.iter().zip(&rows) {
        let line: Vec<String> = cells
            .iter()
            .zip(widths)
            .enumerate()
            .map(|(i, (cell, w))| {
                let padded = pad(cell, w);
                if i == STATUS_COLUMN {
                    style.status_text(project.status, &padded)
                } else {
                    padded
                }
            })
            .collect();
        out.push_str(line.join("  ").trim_end());
        out.push('\n');
    }

    let noun = if projects.len() == 1 { "project" } else { "projects" };
    out.push_str(&format!("\n{} {noun}\n", projects.len()));
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::project::Status;
    use crate::store::test_support::project;
    use chrono::TimeZone;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 6, 1, 12, 0, 0).unwrap()
    }

    #[test]
    fn test_empty_table() {
        assert_eq!(render_table(&[], Style::plain(), now()), "No projects found.\n");
    }

    #[test]
    fn test_table_rows_are_aligned() {
        let mut api = project("/dev/api", "");
        api.inferred_type = "rust-app".to_string();
        api.status = Status::Active;
        api.tech_stack = vec!["rust".to_string()];
        api.last_commit_date = "2026-05-31T10:00:00+00:00".to_string();
        api.commit_count_8m = 42;
        let mut web = project("/dev/website", "");
        web.tech_stack = vec!["node", "react", "next", "typescript"]
            .into_iter()
            .map(String::from)
            .collect();

        let out = render_table(&[&api, &web], Style::plain(), now());
        let lines: Vec<&str> = out.lines().collect();

        assert!(lines[0].starts_with("Name     Type      Status"));
        assert!(lines[1].starts_with("api      rust-app  active"));
        assert!(lines[1].contains("today"));
        assert!(lines[1].ends_with("42"));
        assert!(lines[2].contains("node,react,next,t..."));
        assert!(lines[2].contains("never"));
        assert_eq!(lines.last(), Some(&"2 projects"));

        let status_col = lines[0].find("Status").unwrap();
        assert_eq!(lines[2].find("paused"), Some(status_col));
    }

    #[test]
    fn test_colored_table_keeps_status_text() {
        let a = project("/dev/a", "");
        let out = render_table(&[&a], Style::new(true), now());
        assert!(out.contains("paused"));
        assert!(out.contains('\u{1b}'));
        assert!(out.ends_with("1 project\n"));
    }
}
