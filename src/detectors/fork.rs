use crate::git::Identity;

const GITHUB_SSH: &str = "github.com:";
const GITHUB_HTTPS: &str = "github.com/";

/// Owner segment of a GitHub remote, for both
/// `git@github.com:owner/repo.git` and `https://github.com/owner/repo.git`.
pub fn github_owner(remote: &str) -> Option<&str> {
    let path = if let Some((_, path)) = remote.split_once(GITHUB_SSH) {
        path
    } else if let Some((_, path)) = remote.split_once(GITHUB_HTTPS) {
        path
    } else {
        return None;
    };

    let path = path.strip_suffix(".git").unwrap_or(path);
    path.split('/').next().filter(|owner| !owner.is_empty())
}

/// A repository is a fork when its GitHub owner matches neither the local
/// git user nor the configured GitHub handle. No remote, or a remote that is
/// not on GitHub, is never a fork.
pub fn is_fork(remote: &str, identity: &Identity) -> bool {
    let Some(owner) = github_owner(remote) else {
        return false;
    };

    let matches = |name: &str| !name.is_empty() && name.eq_ignore_ascii_case(owner);
    !(matches(&identity.user_name) || matches(&identity.github_user))
}
