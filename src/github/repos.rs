//! GitHub repository operations.

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::github::GitHubClient;
use crate::github::client::repo_path;

/// Branch information from the GitHub API.
#[derive(Debug, Clone, Deserialize)]
pub struct Branch {
    pub name: String,
    #[serde(default)]
    pub protected: bool,
}

#[derive(Serialize)]
struct EditRepository<'a> {
    default_branch: &'a str,
}

/// Repository-level operations.
pub trait RepoOps {
    /// Check whether a branch exists.
    ///
    /// Returns `Ok(false)` when GitHub answers 404; any other failure is an error.
    fn branch_exists(&self, owner: &str, repo: &str, branch: &str) -> Result<bool>;

    /// Set the repository's default branch.
    fn set_default_branch(&self, owner: &str, repo: &str, branch: &str) -> Result<()>;
}

impl RepoOps for GitHubClient {
    fn branch_exists(&self, owner: &str, repo: &str, branch: &str) -> Result<bool> {
        let endpoint = format!(
            "{}/branches/{}",
            repo_path(owner, repo),
            urlencoding::encode(branch)
        );
        match self.get::<Branch>(&endpoint) {
            Ok(_) => Ok(true),
            Err(e) if e.is_not_found() => Ok(false),
            Err(e) => Err(e),
        }
    }

    fn set_default_branch(&self, owner: &str, repo: &str, branch: &str) -> Result<()> {
        let endpoint = repo_path(owner, repo);
        let _: serde_json::Value = self.patch(
            &endpoint,
            &EditRepository {
                default_branch: branch,
            },
        )?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mockito::{Matcher, Server};

    #[test]
    fn test_branch_exists() {
        let mut server = Server::new();
        let found = server
            .mock("GET", "/repos/acme/service/branches/main")
            .match_header("authorization", "Bearer ghp_test")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{"name":"main","protected":false}"#)
            .create();
        let missing = server
            .mock("GET", "/repos/acme/service/branches/gone")
            .with_status(404)
            .with_body(r#"{"message":"Branch not found"}"#)
            .create();

        let client = GitHubClient::with_base_url("ghp_test", server.url());
        assert!(client.branch_exists("acme", "service", "main").unwrap());
        assert!(!client.branch_exists("acme", "service", "gone").unwrap());

        found.assert();
        missing.assert();
    }

    #[test]
    fn test_branch_exists_propagates_other_errors() {
        let mut server = Server::new();
        let _mock = server
            .mock("GET", "/repos/acme/service/branches/main")
            .with_status(500)
            .with_body(r#"{"message":"Server Error"}"#)
            .create();

        let client = GitHubClient::with_base_url("ghp_test", server.url());
        let err = client.branch_exists("acme", "service", "main").unwrap_err();
        assert!(!err.is_not_found());
        assert!(err.to_string().contains("Server Error"));
    }

    #[test]
    fn test_branch_name_with_slash_is_encoded() {
        let mut server = Server::new();
        let mock = server
            .mock("GET", "/repos/acme/service/branches/feature%2Flogin")
            .with_status(200)
            .with_body(r#"{"name":"feature/login"}"#)
            .create();

        let client = GitHubClient::with_base_url("ghp_test", server.url());
        assert!(client.branch_exists("acme", "service", "feature/login").unwrap());
        mock.assert();
    }

    #[test]
    fn test_set_default_branch() {
        let mut server = Server::new();
        let mock = server
            .mock("PATCH", "/repos/acme/service")
            .match_body(Matcher::Json(serde_json::json!({"default_branch": "develop"})))
            .with_status(200)
            .with_body(r#"{"id":1,"default_branch":"develop"}"#)
            .create();

        let client = GitHubClient::with_base_url("ghp_test", server.url());
        client.set_default_branch("acme", "service", "develop").unwrap();
        mock.assert();
    }
}
