//! GitLab API client.

use reqwest::blocking::{Client, Response};
use reqwest::header::{HeaderMap, HeaderValue, USER_AGENT};
use serde::de::DeserializeOwned;

use crate::error::{Forge, MigrateError, Result};
use crate::http;

/// Client for interacting with the GitLab v4 REST API.
#[derive(Clone)]
pub struct GitLabClient {
    pub(crate) token: String,
    pub(crate) base_url: String,
    pub(crate) client: Client,
}

impl GitLabClient {
    /// Create a client for the API rooted at `base_url`, e.g. `https://gitlab.com/api/v4`.
    pub fn new(token: impl Into<String>, base_url: impl Into<String>) -> Self {
        let mut url = base_url.into();
        if url.ends_with('/') {
            url.pop();
        }
        Self {
            token: token.into(),
            base_url: url,
            client: Client::new(),
        }
    }

    pub(crate) fn headers(&self) -> Result<HeaderMap> {
        let mut headers = HeaderMap::new();
        let token = HeaderValue::from_str(&self.token).map_err(|_| MigrateError::Credentials {
            message: "GitLab token contains invalid characters".into(),
        })?;
        headers.insert("PRIVATE-TOKEN", token);
        headers.insert(USER_AGENT, HeaderValue::from_static("gl-migrator"));
        Ok(headers)
    }

    /// Make a GET request to the GitLab API.
    pub(crate) fn get<T: DeserializeOwned>(&self, endpoint: &str) -> Result<T> {
        tracing::debug!(endpoint, "GET");
        let url = format!("{}{}", self.base_url, endpoint);
        let response: Response = self.client.get(&url).headers(self.headers()?).send()?;
        let response = http::check_status(Forge::GitLab, endpoint, response)?;
        Ok(response.json()?)
    }

    /// GET every page of a list endpoint.
    pub(crate) fn get_all<T: DeserializeOwned>(&self, endpoint: &str) -> Result<Vec<T>> {
        http::collect_pages(endpoint, |page| self.get(page))
    }

    /// Get the base URL.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }
}
