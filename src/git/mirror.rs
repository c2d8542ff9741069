//! Local bare mirror built with the `git` binary.

use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;

use crate::error::{MigrateError, Result};
use crate::git::TOKEN_USERNAME;
use crate::location::RepoLocation;

/// Directory name of the mirror inside the working directory.
pub const MIRROR_DIR: &str = ".git";

/// Scratch directory holding the bare mirror.
#[derive(Debug, Clone)]
pub struct Workdir {
    root: PathBuf,
}

impl Workdir {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Path of the bare mirror.
    pub fn mirror_path(&self) -> PathBuf {
        self.root.join(MIRROR_DIR)
    }

    /// Delete everything inside the working directory, keeping the directory itself.
    ///
    /// Entries that cannot be removed are logged and skipped.
    pub fn wipe(&self) -> Result<()> {
        if !self.root.exists() {
            return Ok(());
        }

        for entry in fs::read_dir(&self.root)? {
            let path = entry?.path();
            let removed = if path.is_dir() {
                fs::remove_dir_all(&path)
            } else {
                fs::remove_file(&path)
            };
            match removed {
                Ok(()) => tracing::debug!(path = %path.display(), "deleted"),
                Err(e) => tracing::warn!(path = %path.display(), "could not delete: {}", e),
            }
        }
        Ok(())
    }

    /// Bare-clone `source` into the working directory and compact it.
    ///
    /// The clone is made under the repository's own name and then renamed to
    /// [`MIRROR_DIR`]. Reflogs are expired and unreachable objects pruned so
    /// only live history is pushed.
    pub fn create_mirror(&self, source: &RepoLocation, token: &str) -> Result<PathBuf> {
        let mirror = self.mirror_path();
        if mirror.exists() {
            return Err(MigrateError::MirrorExists(mirror));
        }
        fs::create_dir_all(&self.root)?;

        let clone_dir = format!("{}.git", source.name());
        let url = source.authenticated_url(TOKEN_USERNAME, token)?;

        tracing::info!(source = %source, "cloning bare repository");
        run_git(&self.root, &["clone", "--bare", &url, &clone_dir], &[token])?;

        tracing::debug!(from = %clone_dir, to = MIRROR_DIR, "renaming clone");
        fs::rename(self.root.join(&clone_dir), &mirror)?;

        tracing::info!("expiring reflogs and collecting garbage");
        run_git(
            &mirror,
            &["reflog", "expire", "--expire-unreachable=now", "--all"],
            &[],
        )?;
        run_git(&mirror, &["gc", "--prune=now"], &[])?;

        Ok(mirror)
    }
}

/// Run `git` in `cwd`, failing on a non-zero exit.
///
/// Every string in `secrets` is masked in the returned error.
pub fn run_git(cwd: &Path, args: &[&str], secrets: &[&str]) -> Result<String> {
    let command = args.first().copied().unwrap_or_default().to_string();

    let output = Command::new("git")
        .args(args)
        .current_dir(cwd)
        .env("GIT_TERMINAL_PROMPT", "0")
        .output()
        .map_err(|e| MigrateError::GitCommand {
            command: command.clone(),
            stderr: format!("failed to execute git (is it installed?): {}", e),
        })?;

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        return Err(MigrateError::GitCommand {
            command,
            stderr: redact(stderr.trim(), secrets),
        });
    }

    Ok(String::from_utf8_lossy(&output.stdout).into_owned())
}

fn redact(text: &str, secrets: &[&str]) -> String {
    secrets
        .iter()
        .filter(|s| !s.is_empty())
        .fold(text.to_string(), |acc, secret| acc.replace(secret, "***"))
}
