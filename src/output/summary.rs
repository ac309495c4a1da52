use std::collections::BTreeMap;

use chrono::{DateTime, Duration, Utc};

use super::{format_age, Style};
use crate::project::{Project, Status};

pub const RECENT_LIMIT: usize = 5;
pub const STALLED_LIMIT: usize = 10;

fn heading(out: &mut String, style: Style, title: &str) {
    out.push_str(&format!("\n{}\n", style.bold(title)));
}

/// Dashboard over the whole collection. Projects with no commit, or whose last
/// commit is older than `cutoff_days`, are listed as stalled.
pub fn render_summary(
    projects: &[Project],
    style: Style,
    cutoff_days: i64,
    now: DateTime<Utc>,
) -> String {
    let mut out = String::new();
    out.push_str(&style.bold(&format!("{} projects", projects.len())));
    out.push('\n');
    if projects.is_empty() {
        return out;
    }

    heading(&mut out, style, "By status");
    for status in Status::ALL {
        let count = projects.iter().filter(|p| p.status == status).count();
        let label = format!("{:<8}", status.as_str());
        out.push_str(&format!("  {}{count:>4}\n", style.status_text(status, &label)));
    }

    heading(&mut out, style, "By type");
    let mut by_type: BTreeMap<&str, usize> = BTreeMap::new();
    for project in projects {
        *by_type.entry(project.inferred_type.as_str()).or_default() += 1;
    }
    let width = by_type.keys().map(|k| k.chars().count()).max().unwrap_or(0);
    for (kind, count) in &by_type {
        out.push_str(&format!("  {kind:<width$}{count:>6}\n"));
    }

    let forks = projects.iter().filter(|p| p.is_fork).count();
    heading(&mut out, style, "Ownership");
    out.push_str(&format!("  own     {:>4}\n", projects.len() - forks));
    out.push_str(&format!("  forks   {forks:>4}\n"));

    let mut dated: Vec<&Project> = projects
        .iter()
        .filter(|p| !p.last_commit_date.is_empty())
        .collect();
    dated.sort_by(|a, b| b.last_commit_date.cmp(&a.last_commit_date));
    if !dated.is_empty() {
        heading(&mut out, style, "Most recent");
        for project in dated.iter().take(RECENT_LIMIT) {
            out.push_str(&format!(
                "  {} {}\n",
                project.name,
                style.gray(&format_age(&project.last_commit_date, now))
            ));
        }
    }

    let cutoff = now - Duration::days(cutoff_days);
    let stalled: Vec<&Project> = projects
        .iter()
        .filter(|p| p.last_commit_time().is_none_or(|at| at < cutoff))
        .collect();
    if !stalled.is_empty() {
        heading(
            &mut out,
            style,
            &format!("Stalled (no commits in {cutoff_days} days): {}", stalled.len()),
        );
        for project in stalled.iter().take(STALLED_LIMIT) {
            out.push_str(&format!(
                "  {} {}\n",
                project.name,
                style.gray(&format_age(&project.last_commit_date, now))
            ));
        }
        if stalled.len() > STALLED_LIMIT {
            out.push_str(&format!("  ... and {} more\n", stalled.len() - STALLED_LIMIT));
        }
    }
    out
}
