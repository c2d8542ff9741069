//! GitLab API data types - only the fields the migration reads.

use serde::Deserialize;

/// GitLab project.
#[derive(Debug, Clone, Deserialize)]
pub struct Project {
    pub id: u64,
    /// Full path including namespace (e.g., "group/subgroup/project").
    pub path_with_namespace: String,
    #[serde(default)]
    pub web_url: Option<String>,
}

/// Merge request lifecycle state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MergeRequestState {
    Opened,
    Closed,
    Merged,
    Locked,
    #[serde(other)]
    Unknown,
}

/// A user reference embedded in other records.
#[derive(Debug, Clone, Deserialize)]
pub struct User {
    pub username: String,
    #[serde(default)]
    pub name: Option<String>,
}

/// A merge request as returned by the project merge request listing.
#[derive(Debug, Clone, Deserialize)]
pub struct MergeRequest {
    /// Project-scoped number shown in the web UI (`!iid`).
    pub iid: u64,
    pub project_id: u64,
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    pub source_branch: String,
    pub target_branch: String,
    pub state: MergeRequestState,
    #[serde(default)]
    pub assignee: Option<User>,
    /// Label names.
    #[serde(default)]
    pub labels: Vec<String>,
}

impl MergeRequest {
    pub fn is_open(&self) -> bool {
        self.state == MergeRequestState::Opened
    }
}

/// An issue as returned by the project issue listing.
#[derive(Debug, Clone, Deserialize)]
pub struct Issue {
    pub iid: u64,
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub created_at: Option<String>,
}

/// The commit a tag points to.
#[derive(Debug, Clone, Deserialize)]
pub struct TagCommit {
    pub id: String,
    #[serde(default)]
    pub author_name: Option<String>,
    #[serde(default)]
    pub author_email: Option<String>,
    #[serde(default)]
    pub authored_date: Option<String>,
}

/// A repository tag.
#[derive(Debug, Clone, Deserialize)]
pub struct Tag {
    pub name: String,
    /// Annotation message; `None` for lightweight tags.
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub commit: Option<TagCommit>,
}
