use std::io::Read;
use std::path::Path;
use std::process::{Command, Stdio};
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};

use tracing::trace;

use super::GIT_COMMAND;
use crate::error::GitError;

pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

const POLL_INTERVAL: Duration = Duration::from_millis(10);

/// Runs git commands with a deadline.
#[derive(Debug, Clone)]
pub struct GitRunner {
    timeout: Duration,
}

impl GitRunner {
    pub fn new(timeout: Duration) -> Self {
        Self { timeout }
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Runs `git <args>` in `dir` and returns trimmed stdout.
    ///
    /// A child still running at the deadline is killed and reported as
    /// [`GitError::Timeout`].
    pub fn run(&self, dir: &Path, args: &[&str]) -> Result<String, GitError> {
        trace!(dir = %dir.display(), ?args, "running git");

        let mut child = Command::new(GIT_COMMAND)
            .args(args)
            .current_dir(dir)
            .env("GIT_TERMINAL_PROMPT", "0")
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(|source| GitError::Spawn { source })?;

        // Drain both pipes concurrently; a child blocked on a full pipe never exits.
        let stdout = drain(child.stdout.take());
        let stderr = drain(child.stderr.take());

        let deadline = Instant::now() + self.timeout;
        let status = loop {
            match child.try_wait() {
                Ok(Some(status)) => break status,
                Ok(None) => {
                    if Instant::now() >= deadline {
                        let _ = child.kill();
                        let _ = child.wait();
                        return Err(GitError::Timeout {
                            timeout: self.timeout,
                        });
                    }
                    thread::sleep(POLL_INTERVAL);
                }
                Err(source) => return Err(GitError::Spawn { source }),
            }
        };

        let stdout = stdout.join().unwrap_or_default();
        let stderr = stderr.join().unwrap_or_default();

        if !status.success() {
            return Err(GitError::failed(status.code(), &stderr));
        }

        // Author names and subjects may be in any encoding.
        Ok(String::from_utf8_lossy(&stdout).trim().to_string())
    }
}

impl Default for GitRunner {
    fn default() -> Self {
        Self::new(DEFAULT_TIMEOUT)
    }
}

fn drain<R: Read + Send + 'static>(pipe: Option<R>) -> JoinHandle<Vec<u8>> {
    thread::spawn(move || {
        let mut buf = Vec::new();
        if let Some(mut pipe) = pipe {
            let _ = pipe.read_to_end(&mut buf);
        }
        buf
    })
}
