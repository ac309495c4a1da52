use std::path::PathBuf;
use thiserror::Error;

/// A detector hit a real I/O failure. Missing files are not errors.
#[derive(Error, Debug)]
pub enum DetectError {
    #[error("failed to read '{path}': {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
}

impl DetectError {
    pub fn read(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Read {
            path: path.into(),
            source,
        }
    }
}
