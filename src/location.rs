//! Repository URL parsing.
//!
//! Source and destination URLs are parsed once at the CLI boundary into a
//! [`RepoLocation`], which every later stage uses to derive clone URLs, API
//! base URLs, owner/repository names and links back to the source forge.

use std::fmt;

use url::Url;

use crate::error::{MigrateError, Result};

const GITHUB_HOST: &str = "github.com";
const GITHUB_API_URL: &str = "https://api.github.com";

/// A repository hosted on a forge, e.g. `https://gitlab.example.com/group/sub/repo.git`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepoLocation {
    scheme: String,
    host: String,
    port: Option<u16>,
    namespace: Vec<String>,
    name: String,
}

impl RepoLocation {
    /// Parse a repository URL.
    ///
    /// Accepts `https://` and `http://` URLs as well as scheme-less
    /// `host/namespace/repo` forms. A trailing `.git` is stripped, embedded
    /// credentials are discarded, and GitLab web suffixes such as
    /// `/-/tree/main` are ignored.
    pub fn parse(input: &str) -> Result<Self> {
        let trimmed = input.trim();
        let with_scheme = if trimmed.contains("://") {
            trimmed.to_string()
        } else {
            format!("https://{}", trimmed)
        };

        let url = Url::parse(&with_scheme).map_err(|e| invalid(input, e.to_string()))?;

        match url.scheme() {
            "https" | "http" => {}
            other => return Err(invalid(input, format!("unsupported scheme '{}'", other))),
        }

        let host = url
            .host_str()
            .filter(|h| !h.is_empty())
            .ok_or_else(|| invalid(input, "missing host"))?
            .to_string();

        let mut segments: Vec<String> = url
            .path_segments()
            .map(|segments| {
                segments
                    .take_while(|s| *s != "-")
                    .filter(|s| !s.is_empty())
                    .map(String::from)
                    .collect()
            })
            .unwrap_or_default();

        let last = segments
            .pop()
            .ok_or_else(|| invalid(input, "expected <namespace>/<repository>"))?;
        let name = last.strip_suffix(".git").unwrap_or(&last).to_string();

        if name.is_empty() || segments.is_empty() {
            return Err(invalid(input, "expected <namespace>/<repository>"));
        }

        Ok(Self {
            scheme: url.scheme().to_string(),
            host,
            port: url.port(),
            namespace: segments,
            name,
        })
    }

    /// Host name without scheme or port.
    pub fn host(&self) -> &str {
        &self.host
    }

    /// Repository name with any `.git` suffix removed.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Owner or group path. Nested GitLab groups are joined with `/`.
    pub fn namespace(&self) -> String {
        self.namespace.join("/")
    }

    /// `namespace/name`, as used by GitLab's project-by-path lookup.
    pub fn project_path(&self) -> String {
        format!("{}/{}", self.namespace(), self.name)
    }

    /// `scheme://host[:port]`.
    pub fn web_base(&self) -> String {
        match self.port {
            Some(port) => format!("{}://{}:{}", self.scheme, self.host, port),
            None => format!("{}://{}", self.scheme, self.host),
        }
    }

    /// Clone URL without credentials.
    pub fn https_url(&self) -> String {
        format!("{}/{}.git", self.web_base(), self.project_path())
    }

    /// Clone URL with `username:token` embedded as basic-auth userinfo.
    pub fn authenticated_url(&self, username: &str, token: &str) -> Result<String> {
        let plain = self.https_url();
        let mut url = Url::parse(&plain).map_err(|e| invalid(&plain, e.to_string()))?;
        url.set_username(username)
            .map_err(|_| invalid(&plain, "cannot embed username"))?;
        url.set_password(Some(token))
            .map_err(|_| invalid(&plain, "cannot embed token"))?;
        Ok(url.into())
    }

    /// REST API base URL assuming a GitLab instance on this host.
    pub fn gitlab_api_url(&self) -> String {
        format!("{}/api/v4", self.web_base())
    }

    /// REST API base URL assuming github.com or a GitHub Enterprise host.
    pub fn github_api_url(&self) -> String {
        let host = self.host.trim_start_matches("www.");
        if host.eq_ignore_ascii_case(GITHUB_HOST) {
            GITHUB_API_URL.to_string()
        } else {
            format!("{}/api/v3", self.web_base())
        }
    }
}

impl fmt::Display for RepoLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.web_base(), self.project_path())
    }
}

fn invalid(url: &str, message: impl Into<String>) -> MigrateError {
    MigrateError::InvalidUrl {
        url: url.to_string(),
        message: message.into(),
    }
}
