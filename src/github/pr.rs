//! Pull request operations.

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::github::GitHubClient;
use crate::github::client::repo_path;

/// A pull request on GitHub.
#[derive(Debug, Clone, Deserialize)]
pub struct PullRequest {
    pub number: u64,
    pub title: String,
    pub state: String,
    #[serde(default)]
    pub html_url: Option<String>,
    #[serde(default)]
    pub body: Option<String>,
    pub head: PullRequestRef,
    pub base: PullRequestRef,
}

/// A reference (branch) in a pull request.
#[derive(Debug, Clone, Deserialize)]
pub struct PullRequestRef {
    #[serde(rename = "ref")]
    pub ref_name: String,
    #[serde(default)]
    pub sha: String,
}

/// Request body for creating a pull request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CreatePullRequest {
    pub title: String,
    pub body: String,
    pub head: String,
    pub base: String,
}

impl CreatePullRequest {
    /// Create a new pull request.
    pub fn new(
        title: impl Into<String>,
        body: impl Into<String>,
        head: impl Into<String>,
        base: impl Into<String>,
    ) -> Self {
        Self {
            title: title.into(),
            body: body.into(),
            head: head.into(),
            base: base.into(),
        }
    }
}

/// Pull request operations.
pub trait PullRequestOps {
    /// List every pull request of a repository, open or closed.
    fn list_pull_requests(&self, owner: &str, repo: &str) -> Result<Vec<PullRequest>>;

    /// Create a new pull request.
    fn create_pull_request(
        &self,
        owner: &str,
        repo: &str,
        pr: &CreatePullRequest,
    ) -> Result<PullRequest>;
}

impl PullRequestOps for GitHubClient {
    fn list_pull_requests(&self, owner: &str, repo: &str) -> Result<Vec<PullRequest>> {
        let endpoint = format!("{}/pulls?state=all", repo_path(owner, repo));
        self.get_all(&endpoint)
    }

    fn create_pull_request(
        &self,
        owner: &str,
        repo: &str,
        pr: &CreatePullRequest,
    ) -> Result<PullRequest> {
        let endpoint = format!("{}/pulls", repo_path(owner, repo));
        self.post(&endpoint, pr)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mockito::{Matcher, Server};

    fn pr_json(number: u64, title: &str) -> serde_json::Value {
        serde_json::json!({
            "number": number,
            "title": title,
            "state": "open",
            "html_url": format!("https://github.com/acme/service/pull/{}", number),
            "head": {"ref": "feature", "sha": "abc"},
            "base": {"ref": "main", "sha": "def"}
        })
    }

    #[test]
    fn test_list_pull_requests_pages() {
        let mut server = Server::new();
        let first: Vec<_> = (1..=100).map(|n| pr_json(n, &format!("PR {}", n))).collect();
        let page1 = server
            .mock("GET", "/repos/acme/service/pulls")
            .match_query(Matcher::AllOf(vec![
                Matcher::UrlEncoded("state".into(), "all".into()),
                Matcher::UrlEncoded("page".into(), "1".into()),
            ]))
            .with_status(200)
            .with_body(serde_json::Value::Array(first).to_string())
            .create();
        let page2 = server
            .mock("GET", "/repos/acme/service/pulls")
            .match_query(Matcher::AllOf(vec![
                Matcher::UrlEncoded("state".into(), "all".into()),
                Matcher::UrlEncoded("page".into(), "2".into()),
            ]))
            .with_status(200)
            .with_body(serde_json::json!([pr_json(101, "Last one")]).to_string())
            .create();

        let client = GitHubClient::with_base_url("ghp_test", server.url());
        let prs = client.list_pull_requests("acme", "service").unwrap();

        assert_eq!(prs.len(), 101);
        assert_eq!(prs[100].title, "Last one");
        assert_eq!(prs[0].head.ref_name, "feature");
        page1.assert();
        page2.assert();
    }

    #[test]
    fn test_create_pull_request() {
        let mut server = Server::new();
        let mock = server
            .mock("POST", "/repos/acme/service/pulls")
            .match_body(Matcher::Json(serde_json::json!({
                "title": "Fix bug",
                "body": "Details",
                "head": "fix-bug",
                "base": "main"
            })))
            .with_status(201)
            .with_body(pr_json(7, "Fix bug").to_string())
            .create();

        let client = GitHubClient::with_base_url("ghp_test", server.url());
        let pr = client
            .create_pull_request(
                "acme",
                "service",
                &CreatePullRequest::new("Fix bug", "Details", "fix-bug", "main"),
            )
            .unwrap();

        assert_eq!(pr.number, 7);
        mock.assert();
    }

    #[test]
    fn test_create_pull_request_validation_error() {
        let mut server = Server::new();
        let _mock = server
            .mock("POST", "/repos/acme/service/pulls")
            .with_status(422)
            .with_body(
                r#"{"message":"Validation Failed","errors":[{"message":"A pull request already exists for acme:fix-bug."}]}"#,
            )
            .create();

        let client = GitHubClient::with_base_url("ghp_test", server.url());
        let err = client
            .create_pull_request(
                "acme",
                "service",
                &CreatePullRequest::new("Fix bug", "", "fix-bug", "main"),
            )
            .unwrap_err();

        assert!(err.to_string().contains("422"));
        assert!(err.to_string().contains("already exists"));
    }
}
