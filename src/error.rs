//! Error types for the migrator.

use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

/// The forge an API error came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Forge {
    GitHub,
    GitLab,
}

impl fmt::Display for Forge {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Forge::GitHub => f.write_str("GitHub"),
            Forge::GitLab => f.write_str("GitLab"),
        }
    }
}

/// The main error type for migration operations.
#[derive(Error, Debug)]
pub enum MigrateError {
    #[error("Git error: {0}")]
    Git(#[from] git2::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("HTTP request error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Invalid repository URL '{url}': {message}")]
    InvalidUrl { url: String, message: String },

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("{forge} API request failed ({status}): {message}")]
    Api {
        forge: Forge,
        status: u16,
        message: String,
    },

    #[error("{forge} resource not found: {resource}")]
    NotFound { forge: Forge, resource: String },

    #[error("Reference already exists: {0}")]
    ReferenceExists(String),

    #[error("git {command} failed: {stderr}")]
    GitCommand { command: String, stderr: String },

    #[error("Credential error: {message}")]
    Credentials { message: String },

    #[error("Push failed: {message}")]
    PushError { message: String },

    #[error("Listing {endpoint} exceeds {pages} pages")]
    PageLimit { endpoint: String, pages: usize },

    #[error("Mirror already exists at {0} (use --remove to wipe the working directory)")]
    MirrorExists(PathBuf),
}

impl MigrateError {
    /// Whether the remote reported the requested resource as missing.
    pub fn is_not_found(&self) -> bool {
        matches!(self, MigrateError::NotFound { .. })
    }
}

/// A specialized Result type for migration operations.
pub type Result<T> = std::result::Result<T, MigrateError>;
