//! Issue and comment operations.

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::github::GitHubClient;
use crate::github::client::repo_path;

/// An issue on GitHub.
///
/// GitHub's issue listing also returns pull requests; those carry a
/// `pull_request` object.
#[derive(Debug, Clone, Deserialize)]
pub struct Issue {
    pub number: u64,
    pub title: String,
    pub state: String,
    #[serde(default)]
    pub pull_request: Option<serde_json::Value>,
}

impl Issue {
    pub fn is_pull_request(&self) -> bool {
        self.pull_request.is_some()
    }
}

/// Request body for creating an issue.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CreateIssue {
    pub title: String,
    pub body: String,
}

#[derive(Serialize)]
struct CreateComment<'a> {
    body: &'a str,
}

/// Issue operations.
pub trait IssueOps {
    /// List every issue (open or closed), excluding pull requests.
    fn list_issues(&self, owner: &str, repo: &str) -> Result<Vec<Issue>>;

    /// Create a new issue.
    fn create_issue(&self, owner: &str, repo: &str, issue: &CreateIssue) -> Result<Issue>;

    /// Add a comment to an issue or pull request.
    fn create_comment(&self, owner: &str, repo: &str, number: u64, body: &str) -> Result<()>;
}

impl IssueOps for GitHubClient {
    fn list_issues(&self, owner: &str, repo: &str) -> Result<Vec<Issue>> {
        let endpoint = format!("{}/issues?state=all", repo_path(owner, repo));
        let issues: Vec<Issue> = self.get_all(&endpoint)?;
        Ok(issues.into_iter().filter(|i| !i.is_pull_request()).collect())
    }

    fn create_issue(&self, owner: &str, repo: &str, issue: &CreateIssue) -> Result<Issue> {
        let endpoint = format!("{}/issues", repo_path(owner, repo));
        self.post(&endpoint, issue)
    }

    fn create_comment(&self, owner: &str, repo: &str, number: u64, body: &str) -> Result<()> {
        let endpoint = format!("{}/issues/{}/comments", repo_path(owner, repo), number);
        let _: serde_json::Value = self.post(&endpoint, &CreateComment { body })?;
        Ok(())
    }
}
