//! GitHub API client.

use reqwest::blocking::{Client, RequestBuilder, Response};
use reqwest::header::{ACCEPT, AUTHORIZATION, HeaderMap, HeaderValue, USER_AGENT};
use serde::de::DeserializeOwned;

use crate::error::{Forge, MigrateError, Result};
use crate::http;

const DEFAULT_BASE_URL: &str = "https://api.github.com";

/// Client for interacting with the GitHub API.
#[derive(Clone)]
pub struct GitHubClient {
    pub(crate) token: String,
    pub(crate) base_url: String,
    pub(crate) client: Client,
}

impl GitHubClient {
    /// Create a new GitHub client with the given token.
    pub fn new(token: impl Into<String>) -> Self {
        Self::with_base_url(token, DEFAULT_BASE_URL)
    }

    /// Create a client for GitHub Enterprise (or a test server) with a custom base URL.
    pub fn with_base_url(token: impl Into<String>, base_url: impl Into<String>) -> Self {
        let mut url = base_url.into();
        // Remove trailing slash if present
        if url.ends_with('/') {
            url.pop();
        }
        Self {
            token: token.into(),
            base_url: url,
            client: Client::new(),
        }
    }

    /// Get the default headers for API requests.
    pub(crate) fn headers(&self) -> Result<HeaderMap> {
        let mut headers = HeaderMap::new();
        let auth = HeaderValue::from_str(&format!("Bearer {}", self.token)).map_err(|_| {
            MigrateError::Credentials {
                message: "GitHub token contains invalid characters".into(),
            }
        })?;
        headers.insert(AUTHORIZATION, auth);
        headers.insert(
            ACCEPT,
            HeaderValue::from_static("application/vnd.github+json"),
        );
        headers.insert(USER_AGENT, HeaderValue::from_static("gl-migrator"));
        headers.insert(
            "X-GitHub-Api-Version",
            HeaderValue::from_static("2022-11-28"),
        );
        Ok(headers)
    }

    fn send(&self, request: RequestBuilder, endpoint: &str) -> Result<Response> {
        let response = request.headers(self.headers()?).send()?;
        http::check_status(Forge::GitHub, endpoint, response)
    }

    fn url(&self, endpoint: &str) -> String {
        format!("{}{}", self.base_url, endpoint)
    }

    /// Make a GET request to the GitHub API.
    pub(crate) fn get<T: DeserializeOwned>(&self, endpoint: &str) -> Result<T> {
        tracing::debug!(endpoint, "GET");
        let response = self.send(self.client.get(self.url(endpoint)), endpoint)?;
        Ok(response.json()?)
    }

    /// GET every page of a list endpoint.
    pub(crate) fn get_all<T: DeserializeOwned>(&self, endpoint: &str) -> Result<Vec<T>> {
        http::collect_pages(endpoint, |page| self.get(page))
    }

    /// Make a POST request to the GitHub API.
    pub(crate) fn post<T: DeserializeOwned, B: serde::Serialize + ?Sized>(
        &self,
        endpoint: &str,
        body: &B,
    ) -> Result<T> {
        tracing::debug!(endpoint, "POST");
        let response = self.send(self.client.post(self.url(endpoint)).json(body), endpoint)?;
        Ok(response.json()?)
    }

    /// Make a PATCH request to the GitHub API.
    pub(crate) fn patch<T: DeserializeOwned, B: serde::Serialize + ?Sized>(
        &self,
        endpoint: &str,
        body: &B,
    ) -> Result<T> {
        tracing::debug!(endpoint, "PATCH");
        let response = self.send(self.client.patch(self.url(endpoint)).json(body), endpoint)?;
        Ok(response.json()?)
    }

    /// Get the base URL.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }
}

/// `/repos/{owner}/{repo}` prefix for repository-scoped endpoints.
pub(crate) fn repo_path(owner: &str, repo: &str) -> String {
    format!(
        "/repos/{}/{}",
        urlencoding::encode(owner),
        urlencoding::encode(repo)
    )
}
