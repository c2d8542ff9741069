//! Git authentication configuration.

/// Username sent alongside a token.
///
/// Token authentication only checks the password field, but HTTPS basic auth
/// (and GitLab in particular) rejects an empty username.
pub const TOKEN_USERNAME: &str = "oauth2";

/// Authentication method for git remote operations.
#[derive(Clone, Default)]
pub enum GitAuth {
    /// Token-based basic authentication over HTTPS.
    Token(String),
    /// No authentication (local or public remotes).
    #[default]
    None,
}

impl GitAuth {
    /// Create token-based auth (typically for GitHub/GitLab HTTPS URLs).
    pub fn token(token: impl Into<String>) -> Self {
        Self::Token(token.into())
    }
}

impl std::fmt::Debug for GitAuth {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            GitAuth::Token(_) => f.write_str("Token(***)"),
            GitAuth::None => f.write_str("None"),
        }
    }
}
