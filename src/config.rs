//! Run configuration.

use std::path::PathBuf;

use crate::credentials::Tokens;
use crate::location::RepoLocation;

/// Which metadata replication stages run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Stages {
    pub merge_requests: bool,
    pub issues: bool,
    pub tags: bool,
}

impl Default for Stages {
    fn default() -> Self {
        Self {
            merge_requests: true,
            issues: true,
            tags: true,
        }
    }
}

/// Everything a migration run needs, built once from the command line and
/// passed to each stage.
#[derive(Debug, Clone)]
pub struct RunConfig {
    pub source: RepoLocation,
    pub destination: RepoLocation,
    pub tokens: Tokens,
    /// GitLab project id; resolved from the source path when absent.
    pub project_id: Option<u64>,
    pub workdir: PathBuf,
    /// Wipe the working directory before and after the run.
    pub remove_workdir: bool,
    /// Pick master/main/develop as the destination default branch.
    pub set_default_branch: bool,
    /// Push tags along with branches.
    pub push_tags: bool,
    pub stages: Stages,
    pub github_api_url: String,
    pub gitlab_api_url: String,
}

impl RunConfig {
    /// A configuration with defaults derived from the two repository URLs.
    pub fn new(source: RepoLocation, destination: RepoLocation, tokens: Tokens) -> Self {
        let github_api_url = destination.github_api_url();
        let gitlab_api_url = source.gitlab_api_url();
        Self {
            source,
            destination,
            tokens,
            project_id: None,
            workdir: PathBuf::from("."),
            remove_workdir: false,
            set_default_branch: false,
            push_tags: false,
            stages: Stages::default(),
            github_api_url,
            gitlab_api_url,
        }
    }

    /// Destination owner (user or organisation).
    pub fn owner(&self) -> String {
        self.destination.namespace()
    }

    /// Destination repository name.
    pub fn repo(&self) -> &str {
        self.destination.name()
    }
}
