//! Git tag and reference operations through the Git Database API.

use serde::{Deserialize, Serialize};

use crate::error::{MigrateError, Result};
use crate::github::GitHubClient;
use crate::github::client::repo_path;

const REFERENCE_EXISTS: &str = "Reference already exists";

/// Identity recorded on an annotated tag.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Tagger {
    pub name: String,
    pub email: String,
    /// ISO 8601 timestamp.
    pub date: String,
}

/// Request body for creating an annotated tag object.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CreateTag {
    pub tag: String,
    pub message: String,
    /// SHA of the tagged commit.
    pub object: String,
    #[serde(rename = "type")]
    pub object_type: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tagger: Option<Tagger>,
}

impl CreateTag {
    /// An annotated tag pointing at a commit.
    pub fn for_commit(
        tag: impl Into<String>,
        message: impl Into<String>,
        sha: impl Into<String>,
    ) -> Self {
        Self {
            tag: tag.into(),
            message: message.into(),
            object: sha.into(),
            object_type: "commit".into(),
            tagger: None,
        }
    }

    pub fn with_tagger(mut self, tagger: Tagger) -> Self {
        self.tagger = Some(tagger);
        self
    }
}

/// A tag object created on GitHub.
#[derive(Debug, Clone, Deserialize)]
pub struct GitTag {
    pub sha: String,
    pub tag: String,
}

#[derive(Serialize)]
struct CreateRef<'a> {
    #[serde(rename = "ref")]
    reference: &'a str,
    sha: &'a str,
}

/// Tag operations.
pub trait TagOps {
    /// Create an annotated tag object. This does not create the `refs/tags/*` reference.
    fn create_tag(&self, owner: &str, repo: &str, tag: &CreateTag) -> Result<GitTag>;

    /// Create a reference.
    ///
    /// Fails with [`MigrateError::ReferenceExists`] when the reference is already present.
    fn create_ref(&self, owner: &str, repo: &str, reference: &str, sha: &str) -> Result<()>;
}

impl TagOps for GitHubClient {
    fn create_tag(&self, owner: &str, repo: &str, tag: &CreateTag) -> Result<GitTag> {
        let endpoint = format!("{}/git/tags", repo_path(owner, repo));
        self.post(&endpoint, tag)
    }

    fn create_ref(&self, owner: &str, repo: &str, reference: &str, sha: &str) -> Result<()> {
        let endpoint = format!("{}/git/refs", repo_path(owner, repo));
        let result: Result<serde_json::Value> =
            self.post(&endpoint, &CreateRef { reference, sha });

        match result {
            Ok(_) => Ok(()),
            Err(MigrateError::Api {
                status: 422,
                message,
                ..
            }) if message.contains(REFERENCE_EXISTS) => {
                Err(MigrateError::ReferenceExists(reference.to_string()))
            }
            Err(e) => Err(e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mockito::{Matcher, Server};

    #[test]
    fn test_create_tag_body() {
        let mut server = Server::new();
        let mock = server
            .mock("POST", "/repos/acme/service/git/tags")
            .match_body(Matcher::Json(serde_json::json!({
                "tag": "v1.0.0",
                "message": "First release",
                "object": "c3d0be41ecbe669545ee3e94d31ed9a4bc91ee3c",
                "type": "commit",
                "tagger": {
                    "name": "Jane Doe",
                    "email": "jane@example.com",
                    "date": "2024-01-02T03:04:05Z"
                }
            })))
            .with_status(201)
            .with_body(r#"{"sha":"940bd336248efae0f9ee5bc7b2d5c985887b16ac","tag":"v1.0.0"}"#)
            .create();

        let client = GitHubClient::with_base_url("ghp_test", server.url());
        let tag = CreateTag::for_commit(
            "v1.0.0",
            "First release",
            "c3d0be41ecbe669545ee3e94d31ed9a4bc91ee3c",
        )
        .with_tagger(Tagger {
            name: "Jane Doe".into(),
            email: "jane@example.com".into(),
            date: "2024-01-02T03:04:05Z".into(),
        });

        let created = client.create_tag("acme", "service", &tag).unwrap();
        assert_eq!(created.sha, "940bd336248efae0f9ee5bc7b2d5c985887b16ac");
        mock.assert();
    }

    #[test]
    fn test_create_ref_already_exists() {
        let mut server = Server::new();
        let _mock = server
            .mock("POST", "/repos/acme/service/git/refs")
            .with_status(422)
            .with_body(r#"{"message":"Reference already exists","documentation_url":"https://docs.github.com"}"#)
            .create();

        let client = GitHubClient::with_base_url("ghp_test", server.url());
        let err = client
            .create_ref("acme", "service", "refs/tags/v1.0.0", "940bd336")
            .unwrap_err();

        assert!(matches!(err, MigrateError::ReferenceExists(ref r) if r == "refs/tags/v1.0.0"));
    }

    #[test]
    fn test_create_ref_other_failure() {
        let mut server = Server::new();
        let _mock = server
            .mock("POST", "/repos/acme/service/git/refs")
            .with_status(422)
            .with_body(r#"{"message":"Object does not exist"}"#)
            .create();

        let client = GitHubClient::with_base_url("ghp_test", server.url());
        let err = client
            .create_ref("acme", "service", "refs/tags/v1.0.0", "940bd336")
            .unwrap_err();

        assert!(matches!(err, MigrateError::Api { status: 422, .. }));
    }
}
