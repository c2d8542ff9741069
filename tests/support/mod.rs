//! In-memory forges that record every call, for driving the replication
//! stages without a network.

#![allow(dead_code)]

use std::cell::{Cell, RefCell};
use std::collections::{HashMap, HashSet};

use gl_migrator::error::{Forge, MigrateError, Result};
use gl_migrator::github::{
    CreateIssue, CreatePullRequest, CreateTag, GitTag, Issue as GhIssue, IssueOps, Label,
    LabelOps, PullRequest, PullRequestOps, PullRequestRef, RepoOps, TagOps,
};
use gl_migrator::gitlab::{
    Issue, MergeRequest, MergeRequestState, Project, ProjectOps, Tag, TagCommit, User,
};

/// A GitHub repository held in memory.
#[derive(Default)]
pub struct FakeGitHub {
    pub branches: RefCell<HashSet<String>>,
    /// Branch probes for these names fail with a server error.
    pub broken_branches: RefCell<HashSet<String>>,
    pub pull_requests: RefCell<Vec<PullRequest>>,
    pub issues: RefCell<Vec<GhIssue>>,
    pub labels: RefCell<Vec<Label>>,
    pub attached_labels: RefCell<Vec<(u64, Vec<String>)>>,
    pub comments: RefCell<Vec<(u64, String)>>,
    pub tag_objects: RefCell<Vec<CreateTag>>,
    pub refs: RefCell<HashMap<String, String>>,
    pub default_branch: RefCell<Option<String>>,
    /// Make every `create_ref` fail with a server error.
    pub refs_unavailable: Cell<bool>,
    /// Pull request titles the fake refuses to create.
    pub rejected_titles: RefCell<HashSet<String>>,
    /// Issue titles the fake refuses to create.
    pub rejected_issue_titles: RefCell<HashSet<String>>,
    /// Label names the fake refuses, both on creation and on attach.
    pub rejected_labels: RefCell<HashSet<String>>,
    /// Make every `create_comment` fail with a server error.
    pub comments_unavailable: Cell<bool>,
    next_number: Cell<u64>,
}

impl FakeGitHub {
    pub fn with_branches(names: &[&str]) -> Self {
        let github = Self::default();
        github
            .branches
            .borrow_mut()
            .extend(names.iter().map(|n| n.to_string()));
        github
    }

    pub fn add_issue(&self, title: &str) {
        let number = self.number();
        self.issues.borrow_mut().push(GhIssue {
            number,
            title: title.to_string(),
            state: "open".into(),
            pull_request: None,
        });
    }

    pub fn issue_titles(&self) -> Vec<String> {
        self.issues.borrow().iter().map(|i| i.title.clone()).collect()
    }

    pub fn pull_request_titles(&self) -> Vec<String> {
        self.pull_requests
            .borrow()
            .iter()
            .map(|pr| pr.title.clone())
            .collect()
    }

    fn number(&self) -> u64 {
        let number = self.next_number.get() + 1;
        self.next_number.set(number);
        number
    }

    fn validation_failed() -> MigrateError {
        MigrateError::Api {
            forge: Forge::GitHub,
            status: 422,
            message: "Validation Failed".into(),
        }
    }

    fn server_error(message: &str) -> MigrateError {
        MigrateError::Api {
            forge: Forge::GitHub,
            status: 500,
            message: message.to_string(),
        }
    }
}

impl RepoOps for FakeGitHub {
    fn branch_exists(&self, _owner: &str, _repo: &str, branch: &str) -> Result<bool> {
        if self.broken_branches.borrow().contains(branch) {
            return Err(Self::server_error("branch lookup failed"));
        }
        Ok(self.branches.borrow().contains(branch))
    }

    fn set_default_branch(&self, _owner: &str, _repo: &str, branch: &str) -> Result<()> {
        *self.default_branch.borrow_mut() = Some(branch.to_string());
        Ok(())
    }
}

impl PullRequestOps for FakeGitHub {
    fn list_pull_requests(&self, _owner: &str, _repo: &str) -> Result<Vec<PullRequest>> {
        Ok(self.pull_requests.borrow().clone())
    }

    fn create_pull_request(
        &self,
        _owner: &str,
        _repo: &str,
        request: &CreatePullRequest,
    ) -> Result<PullRequest> {
        if self.rejected_titles.borrow().contains(&request.title) {
            return Err(Self::validation_failed());
        }

        let pr = PullRequest {
            number: self.number(),
            title: request.title.clone(),
            state: "open".into(),
            html_url: None,
            body: Some(request.body.clone()),
            head: PullRequestRef {
                ref_name: request.head.clone(),
                sha: String::new(),
            },
            base: PullRequestRef {
                ref_name: request.base.clone(),
                sha: String::new(),
            },
        };
        self.pull_requests.borrow_mut().push(pr.clone());
        Ok(pr)
    }
}

impl IssueOps for FakeGitHub {
    fn list_issues(&self, _owner: &str, _repo: &str) -> Result<Vec<GhIssue>> {
        Ok(self.issues.borrow().clone())
    }

    fn create_issue(&self, _owner: &str, _repo: &str, issue: &CreateIssue) -> Result<GhIssue> {
        if self.rejected_issue_titles.borrow().contains(&issue.title) {
            return Err(Self::validation_failed());
        }
        let created = GhIssue {
            number: self.number(),
            title: issue.title.clone(),
            state: "open".into(),
            pull_request: None,
        };
        self.issues.borrow_mut().push(created.clone());
        Ok(created)
    }

    fn create_comment(&self, _owner: &str, _repo: &str, number: u64, body: &str) -> Result<()> {
        if self.comments_unavailable.get() {
            return Err(Self::server_error("comments are unavailable"));
        }
        self.comments.borrow_mut().push((number, body.to_string()));
        Ok(())
    }
}

impl LabelOps for FakeGitHub {
    fn list_labels(&self, _owner: &str, _repo: &str) -> Result<Vec<Label>> {
        Ok(self.labels.borrow().clone())
    }

    fn create_label(&self, _owner: &str, _repo: &str, label: &Label) -> Result<()> {
        if self.rejected_labels.borrow().contains(&label.name) {
            return Err(Self::validation_failed());
        }
        self.labels.borrow_mut().push(label.clone());
        Ok(())
    }

    fn add_labels(&self, _owner: &str, _repo: &str, number: u64, labels: &[String]) -> Result<()> {
        let rejected = self.rejected_labels.borrow();
        if labels.iter().any(|l| rejected.contains(l)) {
            return Err(Self::validation_failed());
        }
        self.attached_labels
            .borrow_mut()
            .push((number, labels.to_vec()));
        Ok(())
    }
}

impl TagOps for FakeGitHub {
    fn create_tag(&self, _owner: &str, _repo: &str, tag: &CreateTag) -> Result<GitTag> {
        self.tag_objects.borrow_mut().push(tag.clone());
        Ok(GitTag {
            sha: format!("tagobj-{}", tag.tag),
            tag: tag.tag.clone(),
        })
    }

    fn create_ref(&self, _owner: &str, _repo: &str, reference: &str, sha: &str) -> Result<()> {
        if self.refs_unavailable.get() {
            return Err(Self::server_error("refs are unavailable"));
        }
        let mut refs = self.refs.borrow_mut();
        if refs.contains_key(reference) {
            return Err(MigrateError::ReferenceExists(reference.to_string()));
        }
        refs.insert(reference.to_string(), sha.to_string());
        Ok(())
    }
}

/// A GitLab project held in memory.
#[derive(Default)]
pub struct FakeGitLab {
    pub projects: Vec<Project>,
    pub merge_requests: Vec<MergeRequest>,
    pub issues: Vec<Issue>,
    pub tags: Vec<Tag>,
    pub project_lookups: RefCell<Vec<String>>,
}

impl ProjectOps for FakeGitLab {
    fn find_project(&self, path: &str) -> Result<Project> {
        self.project_lookups.borrow_mut().push(path.to_string());
        self.projects
            .iter()
            .find(|p| p.path_with_namespace == path)
            .cloned()
            .ok_or_else(|| MigrateError::NotFound {
                forge: Forge::GitLab,
                resource: format!("projects/{}", path),
            })
    }

    fn list_open_merge_requests(&self, _project_id: u64) -> Result<Vec<MergeRequest>> {
        Ok(self
            .merge_requests
            .iter()
            .filter(|mr| mr.is_open())
            .cloned()
            .collect())
    }

    fn list_open_issues(&self, _project_id: u64) -> Result<Vec<Issue>> {
        Ok(self.issues.clone())
    }

    fn list_tags(&self, _project_id: u64) -> Result<Vec<Tag>> {
        Ok(self.tags.clone())
    }
}

pub fn merge_request(iid: u64, title: &str, source: &str, target: &str) -> MergeRequest {
    MergeRequest {
        iid,
        project_id: 42,
        title: title.to_string(),
        description: Some(format!("Description of {}", title)),
        source_branch: source.to_string(),
        target_branch: target.to_string(),
        state: MergeRequestState::Opened,
        assignee: None,
        labels: Vec::new(),
    }
}

pub fn assigned_to(mut mr: MergeRequest, username: &str) -> MergeRequest {
    mr.assignee = Some(User {
        username: username.to_string(),
        name: None,
    });
    mr
}

pub fn issue(iid: u64, title: &str) -> Issue {
    Issue {
        iid,
        title: title.to_string(),
        description: Some(format!("Body of {}", title)),
        created_at: None,
    }
}

pub fn tag(name: &str, commit: &str) -> Tag {
    Tag {
        name: name.to_string(),
        message: Some(format!("Release {}", name)),
        commit: Some(TagCommit {
            id: commit.to_string(),
            author_name: Some("Jane Doe".into()),
            author_email: Some("jane@example.com".into()),
            authored_date: Some("2024-01-02T03:04:05+01:00".into()),
        }),
    }
}
