//! The persisted project collection.
//!
//! One JSON array of [`Project`] records, read once and written once per
//! scan. Writes go through a temporary file and a rename.

mod merge;

pub use merge::{merge, prune};

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::error::{IoError, Result, StoreError};
use crate::project::Project;
use crate::utils::fs::atomic_write;

#[derive(Debug, Clone)]
pub struct Store {
    path: PathBuf,
}

impl Store {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Reads every stored project. A missing file is an empty collection;
    /// an unparseable one is an error.
    pub fn load(&self) -> Result<Vec<Project>> {
        let content = match fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(IoError::read_error(&self.path, e).into()),
        };

        // `null` is what an empty collection looked like in older stores.
        let projects: Option<Vec<Project>> =
            serde_json::from_str(&content).map_err(|e| StoreError::corrupt(&self.path, e))?;
        let projects = projects.unwrap_or_default();
        debug!(path = %self.path.display(), count = projects.len(), "loaded store");
        Ok(projects)
    }

    pub fn save(&self, projects: &[Project]) -> Result<()> {
        let json = serde_json::to_string_pretty(projects)
            .map_err(|e| StoreError::serialize(&self.path, e))?;
        atomic_write(&self.path, json.as_bytes())?;
        debug!(path = %self.path.display(), count = projects.len(), "saved store");
        Ok(())
    }
}
