//! Tracked folders and scan settings, stored as JSON in the data directory.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{IoError, Result, StoreError};
use crate::utils::fs::atomic_write;

pub const CONFIG_FILE: &str = "config.json";
pub const STORE_FILE: &str = "projects.json";
pub const DATA_DIR_NAME: &str = ".prj";
pub const DATA_DIR_ENV: &str = "PRJ_HOME";

pub const DEFAULT_CUTOFF_DAYS: i64 = 240;
pub const DEFAULT_GIT_TIMEOUT_SECS: u64 = 10;
pub const MAX_JOBS: usize = 16;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub folders: Vec<PathBuf>,
    /// Days without a commit before a project counts as stalled.
    #[serde(default)]
    pub cutoff_days: i64,
    #[serde(default)]
    pub git_timeout_secs: u64,
    /// Extraction workers; 0 picks from available parallelism.
    #[serde(default)]
    pub jobs: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            folders: Vec::new(),
            cutoff_days: DEFAULT_CUTOFF_DAYS,
            git_timeout_secs: DEFAULT_GIT_TIMEOUT_SECS,
            jobs: 0,
        }
    }
}

impl Config {
    /// Loads the config at `path`. A missing file yields the defaults.
    pub fn load(path: &Path) -> Result<Self> {
        let content = match fs::read_to_string(path) {
            Ok(content) => content,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                debug!(path = %path.display(), "no config file, using defaults");
                return Ok(Self::default());
            }
            Err(e) => return Err(IoError::read_error(path, e).into()),
        };

        let mut config: Config =
            serde_json::from_str(&content).map_err(|e| StoreError::corrupt(path, e))?;
        config.normalize();
        Ok(config)
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        let json = serde_json::to_string_pretty(self).map_err(|e| StoreError::serialize(path, e))?;
        atomic_write(path, json.as_bytes())?;
        Ok(())
    }

    fn normalize(&mut self) {
        if self.cutoff_days <= 0 {
            self.cutoff_days = DEFAULT_CUTOFF_DAYS;
        }
        if self.git_timeout_secs == 0 {
            self.git_timeout_secs = DEFAULT_GIT_TIMEOUT_SECS;
        }
    }

    /// Returns false if the folder was already tracked.
    pub fn add_folder(&mut self, folder: PathBuf) -> bool {
        if self.folders.contains(&folder) {
            return false;
        }
        self.folders.push(folder);
        true
    }

    /// Returns false if the folder was not tracked.
    pub fn remove_folder(&mut self, folder: &Path) -> bool {
        let before = self.folders.len();
        self.folders.retain(|f| f != folder);
        self.folders.len() != before
    }

    pub fn git_timeout(&self) -> Duration {
        Duration::from_secs(self.git_timeout_secs)
    }

    pub fn effective_jobs(&self) -> usize {
        if self.jobs > 0 {
            return self.jobs.min(MAX_JOBS);
        }
        std::thread::available_parallelism()
            .map(|n| n.get())
            .unwrap_or(4)
            .clamp(1, MAX_JOBS)
    }
}

/// Location of the config and project store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DataDir {
    root: PathBuf,
}

impl DataDir {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// `explicit`, else `$PRJ_HOME`, else `~/.prj`.
    pub fn resolve(explicit: Option<PathBuf>) -> Result<Self> {
        if let Some(root) = explicit {
            return Ok(Self::new(root));
        }
        if let Some(root) = std::env::var_os(DATA_DIR_ENV).filter(|v| !v.is_empty()) {
            return Ok(Self::new(root));
        }
        let home = dirs::home_dir().ok_or(IoError::NoHomeDirectory)?;
        Ok(Self::new(home.join(DATA_DIR_NAME)))
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn config_path(&self) -> PathBuf {
        self.root.join(CONFIG_FILE)
    }

    pub fn store_path(&self) -> PathBuf {
        self.root.join(STORE_FILE)
    }
}

/// Expands `~` and makes `input` absolute. Existing paths are canonicalized
/// so they compare equal to the paths the walker reports.
pub fn expand_path(input: &str) -> PathBuf {
    let expanded = match input.strip_prefix('~') {
        Some(rest) if rest.is_empty() || rest.starts_with('/') => match dirs::home_dir() {
            Some(home) => home.join(rest.trim_start_matches('/')),
            None => PathBuf::from(input),
        },
        _ => PathBuf::from(input),
    };

    expanded
        .canonicalize()
        .or_else(|_| std::path::absolute(&expanded))
        .unwrap_or(expanded)
}
