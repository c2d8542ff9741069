//! Git operations for the local mirror.
//!
//! Cloning and compaction shell out to the `git` binary ([`Workdir`]); the
//! remote rewrite and the push go through git2 ([`GitOps`], [`PushOps`]).

mod auth;
mod mirror;
mod push;

pub use auth::{GitAuth, TOKEN_USERNAME};
pub use mirror::{MIRROR_DIR, Workdir, run_git};
pub use push::PushOps;

use crate::error::Result;
use git2::Repository;
use std::path::Path;

/// Git operations wrapper around an opened (usually bare) repository.
///
/// # Example
///
/// ```rust,no_run
/// use gl_migrator::git::{GitAuth, GitOps, PushOps};
///
/// let git = GitOps::open("./.git")?.with_auth(GitAuth::token("ghp_..."));
/// git.set_remote_url("origin", "https://github.com/acme/service.git")?;
/// git.push_all("origin", false)?;
/// # Ok::<(), gl_migrator::error::MigrateError>(())
/// ```
pub struct GitOps {
    repo: Repository,
    auth: GitAuth,
}

impl GitOps {
    /// Open an existing repository.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let repo = Repository::open(path.as_ref())?;
        Ok(Self {
            repo,
            auth: GitAuth::None,
        })
    }

    /// Set authentication method for remote operations.
    pub fn with_auth(mut self, auth: GitAuth) -> Self {
        self.auth = auth;
        self
    }

    /// Get a reference to the underlying git2::Repository.
    pub fn repo(&self) -> &Repository {
        &self.repo
    }
}
