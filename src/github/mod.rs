//! GitHub API integration for the destination side of a migration.
//!
//! This module provides a blocking client for the GitHub REST API with the
//! operations the migrator needs:
//! - Probe branches and change the default branch
//! - List and create pull requests
//! - List and create issues and comments
//! - List, create and attach labels
//! - Create annotated tags and references
//!
//! Each group of operations is a trait implemented by [`GitHubClient`], so the
//! replication stages can run against any implementation.
//!
//! # Example
//!
//! ```rust,no_run
//! use gl_migrator::github::{GitHubClient, PullRequestOps};
//!
//! let client = GitHubClient::new("ghp_your_token_here");
//!
//! for pr in client.list_pull_requests("my-org", "my-repo")? {
//!     println!("#{}: {}", pr.number, pr.title);
//! }
//! # Ok::<(), gl_migrator::error::MigrateError>(())
//! ```

mod client;
mod issues;
mod labels;
mod pr;
mod repos;
mod tags;

pub use client::GitHubClient;
pub use issues::{CreateIssue, Issue, IssueOps};
pub use labels::{DEFAULT_LABEL_COLOR, Label, LabelOps};
pub use pr::{CreatePullRequest, PullRequest, PullRequestOps, PullRequestRef};
pub use repos::{Branch, RepoOps};
pub use tags::{CreateTag, GitTag, TagOps, Tagger};
