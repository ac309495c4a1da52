use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use crate::project::Project;

/// Upserts `fresh` into `existing` by path.
///
/// Every path from either side appears exactly once. A fresh record replaces
/// the existing one wholesale; later duplicates win over earlier ones. The
/// result is sorted by path.
pub fn merge(existing: Vec<Project>, fresh: Vec<Project>) -> Vec<Project> {
    let mut by_path: BTreeMap<PathBuf, Project> = BTreeMap::new();
    for project in existing.into_iter().chain(fresh) {
        by_path.insert(project.path.clone(), project);
    }
    by_path.into_values().collect()
}

/// Splits `projects` into those still worth keeping and stale ones: records
/// whose path no longer exists or is not under any tracked folder.
///
/// Folders are matched both as given and canonicalized, since discovered
/// paths are canonical.
pub fn prune(projects: Vec<Project>, folders: &[PathBuf]) -> (Vec<Project>, Vec<Project>) {
    let mut roots: Vec<PathBuf> = folders.to_vec();
    roots.extend(folders.iter().filter_map(|f| f.canonicalize().ok()));
    projects
        .into_iter()
        .partition(|project| is_live(&project.path, &roots))
}

fn is_live(path: &Path, folders: &[PathBuf]) -> bool {
    path.is_dir() && folders.iter().any(|folder| path.starts_with(folder))
}
