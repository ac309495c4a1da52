pub mod walker;

pub use walker::{find_repos, is_repo_root, GIT_DIR, SKIPPED_DIRS};
