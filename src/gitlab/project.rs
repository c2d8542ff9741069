//! Project-scoped read operations.

use crate::error::Result;
use crate::gitlab::GitLabClient;
use crate::gitlab::types::{Issue, MergeRequest, Project, Tag};

/// Reads the source-side metadata of a project.
pub trait ProjectOps {
    /// Look up a project by its `namespace/name` path.
    fn find_project(&self, path: &str) -> Result<Project>;

    /// List open merge requests, in the order GitLab returns them.
    fn list_open_merge_requests(&self, project_id: u64) -> Result<Vec<MergeRequest>>;

    /// List open issues. GitLab returns them newest first.
    fn list_open_issues(&self, project_id: u64) -> Result<Vec<Issue>>;

    /// List repository tags.
    fn list_tags(&self, project_id: u64) -> Result<Vec<Tag>>;
}

impl ProjectOps for GitLabClient {
    fn find_project(&self, path: &str) -> Result<Project> {
        let endpoint = format!("/projects/{}", urlencoding::encode(path));
        self.get(&endpoint)
    }

    fn list_open_merge_requests(&self, project_id: u64) -> Result<Vec<MergeRequest>> {
        let endpoint = format!("/projects/{}/merge_requests?state=opened", project_id);
        self.get_all(&endpoint)
    }

    fn list_open_issues(&self, project_id: u64) -> Result<Vec<Issue>> {
        let endpoint = format!("/projects/{}/issues?state=opened", project_id);
        self.get_all(&endpoint)
    }

    fn list_tags(&self, project_id: u64) -> Result<Vec<Tag>> {
        let endpoint = format!("/projects/{}/repository/tags", project_id);
        self.get_all(&endpoint)
    }
}
