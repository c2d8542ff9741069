//! GitLab API integration for the source side of a migration.
//!
//! Only read operations are needed: resolving the project, and listing its
//! open merge requests, open issues and tags.

mod client;
mod project;
mod types;

pub use client::GitLabClient;
pub use project::ProjectOps;
pub use types::{Issue, MergeRequest, MergeRequestState, Project, Tag, TagCommit, User};
