//! End-to-end scan: discover repositories under every tracked folder,
//! extract a record for each on a bounded worker pool, then merge into the
//! store.

use std::collections::HashSet;
use std::panic;
use std::path::PathBuf;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::thread;

use tracing::{debug, info, warn};

use crate::config::Config;
use crate::discovery::find_repos;
use crate::error::Result;
use crate::git::{GitProvider, GitRunner};
use crate::project::{Extractor, Project};
use crate::store::{merge, prune, Store};

#[derive(Debug, Clone, Default)]
pub struct ScanOptions {
    /// Extract but do not touch the store.
    pub dry_run: bool,
    /// Drop stored records whose path is gone or no longer tracked.
    pub prune: bool,
    /// Worker count override; falls back to the config.
    pub jobs: Option<usize>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FolderOutcome {
    Found(usize),
    Skipped(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FolderReport {
    pub folder: PathBuf,
    pub outcome: FolderOutcome,
}

#[derive(Debug, Default)]
pub struct ScanReport {
    pub folders: Vec<FolderReport>,
    /// Freshly extracted records, in discovery order.
    pub scanned: Vec<Project>,
    /// Size of the saved collection; `None` when nothing was written.
    pub saved: Option<usize>,
    pub pruned: Vec<PathBuf>,
}

impl ScanReport {
    pub fn with_errors(&self) -> impl Iterator<Item = &Project> {
        self.scanned.iter().filter(|p| p.has_errors())
    }
}

/// Walks every folder and returns unique repository paths in first-seen
/// order. Folders that cannot be walked are reported and skipped.
pub fn discover(folders: &[PathBuf]) -> (Vec<PathBuf>, Vec<FolderReport>) {
    let mut seen = HashSet::new();
    let mut repos = Vec::new();
    let mut reports = Vec::with_capacity(folders.len());

    for folder in folders {
        let outcome = match find_repos(folder) {
            Ok(found) => {
                let count = found.len();
                for repo in found {
                    if seen.insert(repo.clone()) {
                        repos.push(repo);
                    }
                }
                debug!(folder = %folder.display(), count, "walked folder");
                FolderOutcome::Found(count)
            }
            Err(err) => {
                warn!(folder = %folder.display(), error = %err, "skipping folder");
                FolderOutcome::Skipped(err.to_string())
            }
        };
        reports.push(FolderReport {
            folder: folder.clone(),
            outcome,
        });
    }

    (repos, reports)
}

/// Extracts every repository using up to `jobs` threads. Output order
/// matches `repos`.
pub fn extract_all<G: GitProvider>(
    extractor: &Extractor<G>,
    repos: &[PathBuf],
    jobs: usize,
) -> Vec<Project> {
    let workers = jobs.clamp(1, repos.len().max(1));
    let next = AtomicUsize::new(0);

    let mut indexed: Vec<(usize, Project)> = thread::scope(|s| {
        let handles: Vec<_> = (0..workers)
            .map(|_| {
                s.spawn(|| {
                    let mut done = Vec::new();
                    loop {
                        let i = next.fetch_add(1, Ordering::Relaxed);
                        let Some(repo) = repos.get(i) else {
                            break;
                        };
                        done.push((i, extractor.extract(repo)));
                    }
                    done
                })
            })
            .collect();

        handles
            .into_iter()
            .flat_map(|h| h.join().unwrap_or_else(|e| panic::resume_unwind(e)))
            .collect()
    });

    indexed.sort_by_key(|(i, _)| *i);
    indexed.into_iter().map(|(_, project)| project).collect()
}

/// Runs a full scan with the real git binary.
pub fn run_scan(config: &Config, store: &Store, options: &ScanOptions) -> Result<ScanReport> {
    let extractor = Extractor::with_git(GitRunner::new(config.git_timeout()));
    run_scan_with(&extractor, config, store, options)
}

pub fn run_scan_with<G: GitProvider>(
    extractor: &Extractor<G>,
    config: &Config,
    store: &Store,
    options: &ScanOptions,
) -> Result<ScanReport> {
    // Read the store up front so a corrupt file fails before any work.
    let existing = if options.dry_run {
        Vec::new()
    } else {
        store.load()?
    };

    let (repos, folders) = discover(&config.folders);
    let jobs = options.jobs.unwrap_or_else(|| config.effective_jobs());
    info!(repos = repos.len(), jobs, "extracting metadata");

    let scanned = extract_all(extractor, &repos, jobs);
    let mut report = ScanReport {
        folders,
        scanned,
        ..Default::default()
    };

    if options.dry_run || (report.scanned.is_empty() && !options.prune) {
        return Ok(report);
    }

    let mut merged = merge(existing, report.scanned.clone());
    if options.prune {
        let (kept, removed) = prune(merged, &config.folders);
        report.pruned = removed.into_iter().map(|p| p.path).collect();
        merged = kept;
    }

    store.save(&merged)?;
    info!(saved = merged.len(), pruned = report.pruned.len(), path = %store.path().display(), "store updated");
    report.saved = Some(merged.len());
    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::detectors::DetectorRegistry;
    use crate::error::GitError;
    use crate::git::{CommitInfo, Identity};
    use crate::store::test_support::project;
    use chrono::Utc;
    use std::fs;
    use std::path::Path;
    use tempfile::TempDir;

    /// Every repository has a single commit from today.
    struct TodayGit;

    impl GitProvider for TodayGit {
        fn recent_commits(
            &self,
            _dir: &Path,
            _limit: usize,
        ) -> std::result::Result<Vec<CommitInfo>, GitError> {
            Ok(vec![CommitInfo {
                hash: "abc".to_string(),
                date: Utc::now().to_rfc3339(),
                author: "Dev".to_string(),
                message: "Initial commit".to_string(),
            }])
        }

        fn commit_count_since(&self, _dir: &Path, _since: &str) -> u32 {
            1
        }

        fn contributors(&self, _dir: &Path) -> std::result::Result<Vec<String>, GitError> {
            Ok(vec!["Dev".to_string()])
        }

        fn remote_url(&self, _dir: &Path) -> String {
            String::new()
        }

        fn identity(&self, _dir: &Path) -> Identity {
            Identity::default()
        }
    }

    fn extractor() -> Extractor<TodayGit> {
        Extractor::new(TodayGit, DetectorRegistry::new())
    }

    fn make_repo(path: &Path) {
        fs::create_dir_all(path.join(".git")).unwrap();
    }

    fn config_for(folders: Vec<PathBuf>) -> Config {
        Config {
            folders,
            jobs: 2,
            ..Config::default()
        }
    }

    #[test]
    fn test_discover_dedups_overlapping_folders_and_skips_missing() {
        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path().canonicalize().unwrap();
        make_repo(&root.join("work/api"));
        make_repo(&root.join("home-app"));

        let folders = vec![
            root.clone(),
            root.join("work"),
            root.join("does-not-exist"),
        ];
        let (repos, reports) = discover(&folders);

        assert_eq!(repos.len(), 2);
        assert_eq!(reports[0].outcome, FolderOutcome::Found(2));
        assert_eq!(reports[1].outcome, FolderOutcome::Found(1));
        assert!(matches!(reports[2].outcome, FolderOutcome::Skipped(_)));
    }

    #[test]
    fn test_extract_all_preserves_order_and_count() {
        let temp_dir = TempDir::new().unwrap();
        let repos: Vec<PathBuf> = (0..9)
            .map(|i| {
                let path = temp_dir.path().join(format!("repo-{i}"));
                make_repo(&path);
                path
            })
            .collect();

        let projects = extract_all(&extractor(), &repos, 4);

        let paths: Vec<PathBuf> = projects.iter().map(|p| p.path.clone()).collect();
        assert_eq!(paths, repos);
    }

    #[test]
    fn test_extract_all_with_no_repos() {
        assert!(extract_all(&extractor(), &[], 8).is_empty());
    }

    #[test]
    fn test_scan_merges_into_store() {
        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path().canonicalize().unwrap();
        let folder = root.join("dev");
        make_repo(&folder.join("alpha"));
        make_repo(&folder.join("beta"));

        let store = Store::new(root.join("data/projects.json"));
        store
            .save(&[project("/elsewhere/old", "kept"), {
                let mut stale = project(folder.join("alpha").to_str().unwrap(), "stale");
                stale.tech_stack = vec!["ruby".to_string()];
                stale
            }])
            .unwrap();

        let report = run_scan_with(
            &extractor(),
            &config_for(vec![folder.clone()]),
            &store,
            &ScanOptions::default(),
        )
        .unwrap();

        assert_eq!(report.scanned.len(), 2);
        assert_eq!(report.saved, Some(3));

        let stored = store.load().unwrap();
        assert_eq!(stored.len(), 3);
        let alpha = stored.iter().find(|p| p.path == folder.join("alpha")).unwrap();
        assert_eq!(alpha.description, "alpha");
        assert!(alpha.tech_stack.is_empty());
        assert_eq!(alpha.status, crate::project::Status::Active);
        assert!(stored.iter().any(|p| p.description == "kept"));
    }

    #[test]
    fn test_dry_run_leaves_store_untouched() {
        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path().canonicalize().unwrap();
        make_repo(&root.join("dev/alpha"));
        let store = Store::new(root.join("data/projects.json"));

        let options = ScanOptions {
            dry_run: true,
            ..Default::default()
        };
        let report =
            run_scan_with(&extractor(), &config_for(vec![root.join("dev")]), &store, &options)
                .unwrap();

        assert_eq!(report.scanned.len(), 1);
        assert_eq!(report.saved, None);
        assert!(!store.path().exists());
    }

    #[test]
    fn test_dry_run_ignores_corrupt_store() {
        let temp_dir = TempDir::new().unwrap();
        let store_path = temp_dir.path().join("projects.json");
        fs::write(&store_path, "not json").unwrap();

        let options = ScanOptions {
            dry_run: true,
            ..Default::default()
        };
        let report =
            run_scan_with(&extractor(), &config_for(vec![]), &Store::new(&store_path), &options);
        assert!(report.is_ok());
    }

    #[test]
    fn test_corrupt_store_is_fatal() {
        let temp_dir = TempDir::new().unwrap();
        let store_path = temp_dir.path().join("projects.json");
        fs::write(&store_path, "not json").unwrap();

        let result = run_scan_with(
            &extractor(),
            &config_for(vec![]),
            &Store::new(&store_path),
            &ScanOptions::default(),
        );
        assert!(result.is_err());
        assert_eq!(fs::read_to_string(&store_path).unwrap(), "not json");
    }

    #[test]
    fn test_prune_drops_stale_records() {
        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path().canonicalize().unwrap();
        let folder = root.join("dev");
        make_repo(&folder.join("alpha"));
        let store = Store::new(root.join("projects.json"));
        store
            .save(&[
                project(folder.join("deleted").to_str().unwrap(), ""),
                project("/untracked/thing", ""),
            ])
            .unwrap();

        let options = ScanOptions {
            prune: true,
            ..Default::default()
        };
        let report =
            run_scan_with(&extractor(), &config_for(vec![folder.clone()]), &store, &options)
                .unwrap();

        assert_eq!(report.pruned.len(), 2);
        let stored = store.load().unwrap();
        assert_eq!(stored.len(), 1);
        assert_eq!(stored[0].path, folder.join("alpha"));
    }

    #[test]
    fn test_without_prune_stale_records_remain() {
        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path().canonicalize().unwrap();
        make_repo(&root.join("dev/alpha"));
        let store = Store::new(root.join("projects.json"));
        store.save(&[project("/untracked/thing", "")]).unwrap();

        run_scan_with(
            &extractor(),
            &config_for(vec![root.join("dev")]),
            &store,
            &ScanOptions::default(),
        )
        .unwrap();

        assert_eq!(store.load().unwrap().len(), 2);
    }
}
