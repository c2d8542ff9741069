//! # gl-migrator
//!
//! Move a repository from GitLab to GitHub: history, branches, tags, open
//! merge requests and open issues.
//!
//! The crate provides:
//! - A local mirror stage (bare clone, reflog expiry, gc) and an authenticated
//!   push of every branch to the destination
//! - Blocking REST clients for the GitLab v4 and GitHub v3 APIs
//! - Replication stages that create only what the destination does not
//!   already have, so a rerun after a partial failure adds no duplicates
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use gl_migrator::prelude::*;
//!
//! let config = RunConfig::new(
//!     RepoLocation::parse("https://gitlab.example.com/team/service.git")?,
//!     RepoLocation::parse("https://github.com/acme/service")?,
//!     Tokens { github: "ghp_...".into(), gitlab: "glpat-...".into() },
//! );
//!
//! let report = gl_migrator::migrate::run(&config)?;
//! report.log();
//! # Ok::<(), gl_migrator::error::MigrateError>(())
//! ```
//!
//! ## Replaying metadata only
//!
//! The replication stages are generic over the forge traits, so they can be
//! driven without touching git:
//!
//! ```rust,no_run
//! use gl_migrator::prelude::*;
//!
//! # let config: RunConfig = unimplemented!();
//! let github = GitHubClient::new(&config.tokens.github);
//! let gitlab = GitLabClient::new(&config.tokens.gitlab, &config.gitlab_api_url);
//! let report = migrate_metadata(&gitlab, &github, &config)?;
//! # Ok::<(), gl_migrator::error::MigrateError>(())
//! ```

pub mod config;
pub mod credentials;
pub mod error;
pub mod git;
pub mod github;
pub mod gitlab;
pub(crate) mod http;
pub mod location;
pub mod migrate;

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::config::{RunConfig, Stages};
    pub use crate::credentials::{
        CredentialStore, TerminalPrompt, TokenPrompt, Tokens, resolve_tokens,
    };
    pub use crate::error::{Forge, MigrateError, Result};
    pub use crate::git::{GitAuth, GitOps, PushOps, Workdir};
    pub use crate::github::{
        GitHubClient, IssueOps, LabelOps, PullRequestOps, RepoOps, TagOps,
    };
    pub use crate::gitlab::{GitLabClient, ProjectOps};
    pub use crate::location::RepoLocation;
    pub use crate::migrate::{
        Destination, MigrationReport, StageSummary, migrate_metadata, replicate_issues,
        replicate_merge_requests, replicate_tags,
    };
}

pub use prelude::*;
