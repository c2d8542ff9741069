//! Label operations.

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::github::GitHubClient;
use crate::github::client::repo_path;

/// Color used for labels created during migration (GitHub's own default grey).
pub const DEFAULT_LABEL_COLOR: &str = "ededed";

/// A repository label.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Label {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl Label {
    /// A label with the default color and an empty description.
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            color: Some(DEFAULT_LABEL_COLOR.to_string()),
            description: Some(String::new()),
        }
    }
}

#[derive(Serialize)]
struct AddLabels<'a> {
    labels: &'a [String],
}

/// Label operations.
pub trait LabelOps {
    /// List the labels defined in a repository.
    fn list_labels(&self, owner: &str, repo: &str) -> Result<Vec<Label>>;

    /// Define a new label in a repository.
    fn create_label(&self, owner: &str, repo: &str, label: &Label) -> Result<()>;

    /// Attach labels to an issue or pull request.
    fn add_labels(&self, owner: &str, repo: &str, number: u64, labels: &[String]) -> Result<()>;
}

impl LabelOps for GitHubClient {
    fn list_labels(&self, owner: &str, repo: &str) -> Result<Vec<Label>> {
        let endpoint = format!("{}/labels", repo_path(owner, repo));
        self.get_all(&endpoint)
    }

    fn create_label(&self, owner: &str, repo: &str, label: &Label) -> Result<()> {
        let endpoint = format!("{}/labels", repo_path(owner, repo));
        let _: Label = self.post(&endpoint, label)?;
        Ok(())
    }

    fn add_labels(&self, owner: &str, repo: &str, number: u64, labels: &[String]) -> Result<()> {
        let endpoint = format!("{}/issues/{}/labels", repo_path(owner, repo), number);
        let _: Vec<Label> = self.post(&endpoint, &AddLabels { labels })?;
        Ok(())
    }
}
