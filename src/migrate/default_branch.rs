//! Pick the destination's default branch.

use crate::error::Result;
use crate::github::RepoOps;

/// Probed in this order; the first one that exists wins.
pub const DEFAULT_BRANCH_CANDIDATES: [&str; 3] = ["master", "main", "develop"];

/// The first candidate branch present at the destination.
///
/// A probe that fails for a reason other than "not found" is logged and the
/// next candidate is tried.
pub fn resolve_default_branch<D: RepoOps + ?Sized>(
    github: &D,
    owner: &str,
    repo: &str,
) -> Option<&'static str> {
    for candidate in DEFAULT_BRANCH_CANDIDATES {
        match github.branch_exists(owner, repo, candidate) {
            Ok(true) => return Some(candidate),
            Ok(false) => tracing::debug!(branch = candidate, "not found"),
            Err(e) => tracing::warn!(branch = candidate, "cannot verify branch: {}", e),
        }
    }
    None
}

/// Set the default branch to the first existing candidate.
///
/// When no candidate exists the repository is left alone and `None` is returned.
pub fn apply_default_branch<D: RepoOps + ?Sized>(
    github: &D,
    owner: &str,
    repo: &str,
) -> Result<Option<String>> {
    let Some(branch) = resolve_default_branch(github, owner, repo) else {
        tracing::warn!(
            "none of {} exist at the destination, default branch unchanged",
            DEFAULT_BRANCH_CANDIDATES.join(", ")
        );
        return Ok(None);
    };

    tracing::info!(branch, "setting default branch");
    github.set_default_branch(owner, repo, branch)?;
    Ok(Some(branch.to_string()))
}
