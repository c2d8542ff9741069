//! Git push operations with authentication.

use std::cell::RefCell;

use git2::{BranchType, Cred, PushOptions, RemoteCallbacks};

use crate::error::{MigrateError, Result};
use crate::git::{GitAuth, GitOps, TOKEN_USERNAME};

/// Push operations for GitOps.
pub trait PushOps {
    /// Point an existing remote at a new URL.
    fn set_remote_url(&self, remote_name: &str, url: &str) -> Result<()>;

    /// Get the URL for a remote.
    fn remote_url(&self, remote_name: &str) -> Result<String>;

    /// Force-push every local branch, and optionally every tag, to a remote.
    ///
    /// Returns the refspecs that were pushed.
    fn push_all(&self, remote_name: &str, include_tags: bool) -> Result<Vec<String>>;

    /// List local branch names.
    fn list_branches(&self) -> Result<Vec<String>>;

    /// List tag names.
    fn list_tags(&self) -> Result<Vec<String>>;
}

impl PushOps for GitOps {
    fn set_remote_url(&self, remote_name: &str, url: &str) -> Result<()> {
        self.repo.find_remote(remote_name).map_err(|_| MigrateError::PushError {
            message: format!("Remote '{}' not found", remote_name),
        })?;
        self.repo.remote_set_url(remote_name, url)?;
        Ok(())
    }

    fn remote_url(&self, remote_name: &str) -> Result<String> {
        let remote = self.repo.find_remote(remote_name)?;
        remote.url().map(String::from).ok_or_else(|| {
            MigrateError::InvalidConfig(format!("Remote '{}' has no URL", remote_name))
        })
    }

    fn push_all(&self, remote_name: &str, include_tags: bool) -> Result<Vec<String>> {
        let mut remote = self.repo.find_remote(remote_name).map_err(|_| {
            MigrateError::PushError {
                message: format!("Remote '{}' not found", remote_name),
            }
        })?;

        // libgit2 does not expand globs in push refspecs, so list refs explicitly.
        let mut refspecs: Vec<String> = self
            .list_branches()?
            .iter()
            .map(|b| format!("+refs/heads/{}:refs/heads/{}", b, b))
            .collect();
        if include_tags {
            refspecs.extend(
                self.list_tags()?
                    .iter()
                    .map(|t| format!("+refs/tags/{}:refs/tags/{}", t, t)),
            );
        }

        if refspecs.is_empty() {
            tracing::warn!(remote = remote_name, "nothing to push");
            return Ok(refspecs);
        }

        let rejected = RefCell::new(Vec::new());
        {
            let mut callbacks = RemoteCallbacks::new();
            self.setup_auth_callbacks(&mut callbacks);
            callbacks.push_update_reference(|refname, status| {
                if let Some(message) = status {
                    rejected
                        .borrow_mut()
                        .push(format!("{}: {}", refname, message));
                }
                Ok(())
            });

            let mut push_options = PushOptions::new();
            push_options.remote_callbacks(callbacks);

            let specs: Vec<&str> = refspecs.iter().map(String::as_str).collect();
            remote
                .push(&specs, Some(&mut push_options))
                .map_err(|e| MigrateError::PushError {
                    message: e.to_string(),
                })?;
        }

        let rejected = rejected.into_inner();
        if !rejected.is_empty() {
            return Err(MigrateError::PushError {
                message: format!("remote rejected {}", rejected.join(", ")),
            });
        }

        Ok(refspecs)
    }

    fn list_branches(&self) -> Result<Vec<String>> {
        let mut names = Vec::new();
        for branch in self.repo.branches(Some(BranchType::Local))? {
            let (branch, _) = branch?;
            if let Some(name) = branch.name()? {
                names.push(name.to_string());
            }
        }
        Ok(names)
    }

    fn list_tags(&self) -> Result<Vec<String>> {
        let tags = self.repo.tag_names(None)?;
        Ok(tags.iter().flatten().map(String::from).collect())
    }
}

impl GitOps {
    fn setup_auth_callbacks(&self, callbacks: &mut RemoteCallbacks<'_>) {
        let auth = self.auth.clone();

        callbacks.credentials(move |_url, _username_from_url, _allowed_types| match &auth {
            GitAuth::Token(token) => Cred::userpass_plaintext(TOKEN_USERNAME, token),
            GitAuth::None => Cred::default(),
        });
    }
}
