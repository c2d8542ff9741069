//! Access tokens and the on-disk credentials cache.
//!
//! Tokens are looked up in order: explicit flag or environment variable,
//! the YAML cache in the home directory, then an interactive prompt. A
//! prompted token is written back to the cache so the next run does not ask
//! again.
//!
//! Cache layout:
//! ```yaml
//! credentials:
//!   github:
//!     pat: ghp_...
//!   gitlab:
//!     pat: glpat-...
//! ```

use std::fmt;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{Forge, MigrateError, Result};

/// File name of the cache, placed in the user's home directory.
pub const CREDENTIALS_FILE: &str = "gl-migrator-cfg.yaml";

const PROMPT_ATTEMPTS: usize = 3;

#[derive(Debug, Default, Clone, Serialize, Deserialize)]
pub struct CredentialsFile {
    #[serde(default)]
    pub credentials: Credentials,
}

#[derive(Debug, Default, Clone, Serialize, Deserialize)]
pub struct Credentials {
    #[serde(default)]
    pub github: TokenEntry,
    #[serde(default)]
    pub gitlab: TokenEntry,
}

#[derive(Default, Clone, Serialize, Deserialize)]
pub struct TokenEntry {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pat: Option<String>,
}

impl fmt::Debug for TokenEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let pat = self.pat.as_ref().map(|_| "***");
        f.debug_struct("TokenEntry").field("pat", &pat).finish()
    }
}

/// The credentials cache loaded from disk.
#[derive(Debug)]
pub struct CredentialStore {
    path: PathBuf,
    file: CredentialsFile,
}

impl CredentialStore {
    /// `~/gl-migrator-cfg.yaml`.
    pub fn default_path() -> Result<PathBuf> {
        dirs::home_dir()
            .map(|home| home.join(CREDENTIALS_FILE))
            .ok_or_else(|| MigrateError::Credentials {
                message: "Could not determine home directory".into(),
            })
    }

    /// Load the cache. A missing or empty file yields an empty store.
    pub fn load(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        let file = match fs::read_to_string(&path) {
            Ok(text) if text.trim().is_empty() => CredentialsFile::default(),
            Ok(text) => serde_yaml::from_str(&text)?,
            Err(e) if e.kind() == io::ErrorKind::NotFound => CredentialsFile::default(),
            Err(e) => return Err(e.into()),
        };
        Ok(Self { path, file })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// The cached token for a forge, ignoring blank entries.
    pub fn token(&self, forge: Forge) -> Option<&str> {
        self.entry(forge)
            .pat
            .as_deref()
            .map(str::trim)
            .filter(|t| !t.is_empty())
    }

    pub fn set_token(&mut self, forge: Forge, token: impl Into<String>) {
        self.entry_mut(forge).pat = Some(token.into());
    }

    /// Write the cache back to disk, readable only by the owner on Unix.
    pub fn save(&self) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        let text = serde_yaml::to_string(&self.file)?;
        fs::write(&self.path, text)?;

        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            fs::set_permissions(&self.path, fs::Permissions::from_mode(0o600))?;
        }
        Ok(())
    }

    fn entry(&self, forge: Forge) -> &TokenEntry {
        match forge {
            Forge::GitHub => &self.file.credentials.github,
            Forge::GitLab => &self.file.credentials.gitlab,
        }
    }

    fn entry_mut(&mut self, forge: Forge) -> &mut TokenEntry {
        match forge {
            Forge::GitHub => &mut self.file.credentials.github,
            Forge::GitLab => &mut self.file.credentials.gitlab,
        }
    }
}

/// Asks the user for a token.
pub trait TokenPrompt {
    fn prompt_token(&self, forge: Forge) -> Result<String>;
}

/// Masked terminal prompt.
pub struct TerminalPrompt;

impl TokenPrompt for TerminalPrompt {
    fn prompt_token(&self, forge: Forge) -> Result<String> {
        for _ in 0..PROMPT_ATTEMPTS {
            let input =
                rpassword::prompt_password(format!("Enter your {} personal access token: ", forge))?;
            let token = input.trim();
            if !token.is_empty() {
                return Ok(token.to_string());
            }
            eprintln!("A {} token is required", forge);
        }
        Err(MigrateError::Credentials {
            message: format!("no {} token entered", forge),
        })
    }
}

/// Tokens for both forges.
#[derive(Clone)]
pub struct Tokens {
    pub github: String,
    pub gitlab: String,
}

impl fmt::Debug for Tokens {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Tokens")
            .field("github", &"***")
            .field("gitlab", &"***")
            .finish()
    }
}

/// Resolve both tokens, prompting (and caching) whatever is missing.
///
/// Tokens given explicitly are never written to the cache.
pub fn resolve_tokens(
    github: Option<String>,
    gitlab: Option<String>,
    store: &mut CredentialStore,
    prompt: &dyn TokenPrompt,
) -> Result<Tokens> {
    Ok(Tokens {
        github: resolve_token(Forge::GitHub, github, store, prompt)?,
        gitlab: resolve_token(Forge::GitLab, gitlab, store, prompt)?,
    })
}

fn resolve_token(
    forge: Forge,
    explicit: Option<String>,
    store: &mut CredentialStore,
    prompt: &dyn TokenPrompt,
) -> Result<String> {
    if let Some(token) = explicit.map(|t| t.trim().to_string()).filter(|t| !t.is_empty()) {
        return Ok(token);
    }
    if let Some(token) = store.token(forge) {
        tracing::debug!(%forge, path = %store.path().display(), "using cached token");
        return Ok(token.to_string());
    }

    let token = prompt.prompt_token(forge)?;
    store.set_token(forge, token.clone());
    match store.save() {
        Ok(()) => tracing::info!(path = %store.path().display(), "saved {} token", forge),
        Err(e) => tracing::warn!(path = %store.path().display(), "could not save credentials: {}", e),
    }
    Ok(token)
}
