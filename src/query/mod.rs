//! Filtering, sorting and lookup over stored projects.

use clap::ValueEnum;

use crate::project::{Project, Status};
use crate::utils::string::contains_ci;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum SortOrder {
    Name,
    /// Last commit date, newest first.
    #[default]
    Date,
    /// Commits in the trailing window, most first.
    Commits,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Ownership {
    #[default]
    Any,
    Own,
    Forks,
}

#[derive(Debug, Clone, Default)]
pub struct ListFilter {
    pub status: Option<Status>,
    /// Substring of the inferred type, case-insensitive.
    pub kind: Option<String>,
    /// Substring of any tech tag, case-insensitive.
    pub tech: Option<String>,
    pub ownership: Ownership,
    /// Substring of name or path, case-insensitive.
    pub search: Option<String>,
}

impl ListFilter {
    pub fn matches(&self, project: &Project) -> bool {
        if self.status.is_some_and(|s| s != project.status) {
            return false;
        }
        if let Some(kind) = &self.kind {
            if !contains_ci(&project.inferred_type, kind) {
                return false;
            }
        }
        if let Some(tech) = &self.tech {
            if !project.tech_stack.iter().any(|t| contains_ci(t, tech)) {
                return false;
            }
        }
        match self.ownership {
            Ownership::Own if project.is_fork => return false,
            Ownership::Forks if !project.is_fork => return false,
            _ => {}
        }
        if let Some(query) = &self.search {
            if !contains_ci(&project.name, query)
                && !contains_ci(&project.path.to_string_lossy(), query)
            {
                return false;
            }
        }
        true
    }

    pub fn apply<'a>(&self, projects: &'a [Project]) -> Vec<&'a Project> {
        projects.iter().filter(|p| self.matches(p)).collect()
    }
}

pub fn sort_projects(projects: &mut [&Project], order: SortOrder) {
    match order {
        SortOrder::Name => projects.sort_by_key(|p| p.name.to_lowercase()),
        SortOrder::Commits => projects.sort_by(|a, b| b.commit_count_8m.cmp(&a.commit_count_8m)),
        SortOrder::Date => projects.sort_by(|a, b| b.last_commit_date.cmp(&a.last_commit_date)),
    }
}

/// Exact case-insensitive name match, else the first partial match.
pub fn find_project<'a>(projects: &'a [Project], name: &str) -> Option<&'a Project> {
    let needle = name.to_lowercase();
    projects
        .iter()
        .find(|p| p.name.to_lowercase() == needle)
        .or_else(|| projects.iter().find(|p| p.name.to_lowercase().contains(&needle)))
}
