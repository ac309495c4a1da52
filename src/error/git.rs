use std::time::Duration;
use thiserror::Error;

/// Failure of a single git invocation.
///
/// The `Display` form is what ends up in a project's error list, so it stays
/// short and does not repeat the repository path.
#[derive(Error, Debug)]
pub enum GitError {
    #[error("failed to run git: {source}")]
    Spawn { source: std::io::Error },

    #[error("exit status {code}: {stderr}")]
    Failed { code: i32, stderr: String },

    #[error("timed out after {}s", .timeout.as_secs())]
    Timeout { timeout: Duration },
}

impl GitError {
    pub fn failed(code: Option<i32>, stderr: &[u8]) -> Self {
        let stderr = String::from_utf8_lossy(stderr);
        let first_line = stderr.lines().next().unwrap_or("").trim().to_string();
        Self::Failed {
            code: code.unwrap_or(-1),
            stderr: first_line,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_failed_keeps_first_stderr_line() {
        let err = GitError::failed(
            Some(128),
            b"fatal: not a git repository\nhint: something else\n",
        );
        assert_eq!(
            err.to_string(),
            "exit status 128: fatal: not a git repository"
        );
    }

    #[test]
    fn test_failed_without_code() {
        let err = GitError::failed(None, b"");
        assert_eq!(err.to_string(), "exit status -1: ");
    }

    #[test]
    fn test_timeout_display() {
        let err = GitError::Timeout {
            timeout: Duration::from_secs(10),
        };
        assert_eq!(err.to_string(), "timed out after 10s");
    }
}
