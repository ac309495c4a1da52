use chrono::{DateTime, Utc};

use super::{format_age, Style};
use crate::project::Project;

fn field(out: &mut String, style: Style, label: &str, value: &str) {
    let label = format!("{:<14}", format!("{label}:"));
    out.push_str(&format!("  {}{value}\n", style.gray(&label)));
}

fn list_or_none(items: &[String]) -> String {
    if items.is_empty() {
        "none".to_string()
    } else {
        items.join(", ")
    }
}

/// Every field of one record, grouped into sections.
pub fn render_detail(project: &Project, style: Style, now: DateTime<Utc>) -> String {
    let mut out = String::new();
    out.push_str(&style.bold(&project.name));
    out.push('\n');
    out.push_str(&format!("  {}\n\n", project.description));

    let path = project.path.display().to_string();
    let tech = list_or_none(&project.tech_stack);
    let fork = if project.is_fork { "yes" } else { "no" };
    field(&mut out, style, "Path", &path);
    field(&mut out, style, "Status", &style.status(project.status));
    field(&mut out, style, "Type", &project.inferred_type);
    field(&mut out, style, "Tech", &tech);
    field(&mut out, style, "Fork", fork);
    if !project.git_remote.is_empty() {
        field(&mut out, style, "Remote", &project.git_remote);
    }
    if let Some(claude) = &project.claude_description {
        field(&mut out, style, "CLAUDE.md", claude);
    }

    out.push_str(&format!("\n{}\n", style.bold("Activity")));
    if project.last_commit_date.is_empty() {
        field(&mut out, style, "Last commit", "never");
    } else {
        let when = format!(
            "{} ({})",
            format_age(&project.last_commit_date, now),
            project.last_commit_date
        );
        field(&mut out, style, "Last commit", &when);
        field(&mut out, style, "Message", &project.last_commit_message);
        field(&mut out, style, "Author", &project.last_commit_author);
    }
    field(&mut out, style, "Commits (8m)", &project.commit_count_8m.to_string());
    field(&mut out, style, "Contributors", &list_or_none(&project.contributors));

    if !project.recent_commits.is_empty() {
        out.push_str(&format!("\n{}\n", style.bold("Recent commits")));
        for commit in &project.recent_commits {
            let short: String = commit.hash.chars().take(7).collect();
            out.push_str(&format!(
                "  {} {} {}\n",
                style.yellow(&short),
                style.gray(&format_age(&commit.date, now)),
                commit.message
            ));
        }
    }

    out.push_str(&format!("\n{}\n", style.bold("Project files")));
    let todos = format!("{} open, {} closed", project.todo_open, project.todo_closed);
    field(&mut out, style, "TODO", &todos);
    field(&mut out, style, "Deployment", &list_or_none(&project.deployment));
    let refs = &project.reference_files;
    field(&mut out, style, "References", &list_or_none(&refs.root));
    for (label, files) in [
        (".ai", &refs.ai),
        (".cursor", &refs.cursor),
        ("docs", &refs.docs),
        ("tasks", &refs.tasks),
    ] {
        if !files.is_empty() {
            field(&mut out, style, label, &files.join(", "));
        }
    }
    field(&mut out, style, "Plans", &project.plans_count.to_string());
    field(&mut out, style, "AI docs", &project.ai_docs_count.to_string());
    if !project.nested_repos.is_empty() {
        let nested: Vec<String> = project
            .nested_repos
            .iter()
            .map(|p| p.display().to_string())
            .collect();
        field(&mut out, style, "Nested repos", &nested.join(", "));
    }

    if project.has_errors() {
        out.push_str(&format!("\n{}\n", style.red("Errors")));
        for error in &project.errors {
            out.push_str(&format!("  - {error}\n"));
        }
    }

    out.push('\n');
    field(
        &mut out,
        style,
        "Scanned",
        &project.scanned_at.format("%Y-%m-%d %H:%M UTC").to_string(),
    );
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::git::CommitInfo;
    use crate::store::test_support::project;
    use chrono::TimeZone;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 6, 1, 12, 0, 0).unwrap()
    }

    #[test]
    fn test_detail_shows_every_section() {
        let mut p = project("/dev/shop", "Online shop");
        p.tech_stack = vec!["node".to_string(), "next".to_string()];
        p.git_remote = "git@github.com:alice/shop.git".to_string();
        p.last_commit_date = "2026-05-30T09:00:00+00:00".to_string();
        p.last_commit_message = "Add cart".to_string();
        p.last_commit_author = "Alice".to_string();
        p.recent_commits = vec![CommitInfo {
            hash: "abcdef1234567".to_string(),
            date: "2026-05-30T09:00:00+00:00".to_string(),
            author: "Alice".to_string(),
            message: "Add cart".to_string(),
        }];
        p.todo_open = 2;
        p.todo_closed = 1;
        p.deployment = vec!["docker".to_string()];
        p.reference_files.root = vec!["README.md".to_string()];
        p.reference_files.docs = vec!["api.md".to_string()];
        p.errors = vec!["git contributors: timed out after 10s".to_string()];

        let out = render_detail(&p, Style::plain(), now());

        assert!(out.starts_with("shop\n  Online shop\n"));
        assert!(out.contains("node, next"));
        assert!(out.contains("git@github.com:alice/shop.git"));
        assert!(out.contains("2d ago (2026-05-30T09:00:00+00:00)"));
        assert!(out.contains("abcdef1"));
        assert!(!out.contains("abcdef12"));
        assert!(out.contains("2 open, 1 closed"));
        assert!(out.contains("docker"));
        assert!(out.contains("api.md"));
        assert!(out.contains("  - git contributors: timed out after 10s\n"));
        assert!(out.contains("2026-01-01 00:00 UTC"));
    }

    #[test]
    fn test_detail_without_history() {
        let p = project("/dev/empty", "empty");
        let out = render_detail(&p, Style::plain(), now());
        assert!(out.contains("never"));
        assert!(!out.contains("Recent commits"));
        assert!(!out.contains("Errors"));
    }
}
