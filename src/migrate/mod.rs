//! The migration pipeline.
//!
//! A run is strictly sequential:
//! 1. optionally wipe the working directory
//! 2. bare-clone the source, compact it, point `origin` at the destination and push
//! 3. optionally pick a default branch
//! 4. replicate merge requests, issues and tags
//! 5. optionally wipe the working directory again
//!
//! Stage 4 is generic over [`ProjectOps`] and [`Destination`] so it can run
//! against any forge implementation; [`run`] wires it to the real clients.

mod default_branch;
mod issues;
mod merge_requests;
mod summary;
mod tags;

pub use default_branch::{DEFAULT_BRANCH_CANDIDATES, apply_default_branch, resolve_default_branch};
pub use issues::{migrate_issues, replicate_issues};
pub use merge_requests::{
    merge_request_url, migrate_merge_requests, migration_comment, replicate_merge_requests,
};
pub use summary::{MigrationReport, StageSummary};
pub use tags::{migrate_tags, replicate_tags};

use crate::config::RunConfig;
use crate::error::Result;
use crate::git::{GitAuth, GitOps, PushOps, Workdir};
use crate::github::{GitHubClient, IssueOps, LabelOps, PullRequestOps, RepoOps, TagOps};
use crate::gitlab::{GitLabClient, ProjectOps};

/// Every destination-side operation the pipeline uses.
pub trait Destination: RepoOps + PullRequestOps + IssueOps + LabelOps + TagOps {}

impl<T: RepoOps + PullRequestOps + IssueOps + LabelOps + TagOps + ?Sized> Destination for T {}

/// Run the whole migration described by `config`.
pub fn run(config: &RunConfig) -> Result<MigrationReport> {
    let workdir = Workdir::new(&config.workdir);
    if config.remove_workdir {
        tracing::info!(path = %workdir.root().display(), "removing working directory contents");
        workdir.wipe()?;
    }

    let pushed = mirror_repository(config, &workdir)?;

    let github = GitHubClient::with_base_url(&config.tokens.github, &config.github_api_url);
    let gitlab = GitLabClient::new(&config.tokens.gitlab, &config.gitlab_api_url);
    let mut report = migrate_metadata(&gitlab, &github, config)?;
    report.pushed_refs = pushed.len();

    if config.remove_workdir {
        tracing::info!(path = %workdir.root().display(), "removing working directory contents");
        workdir.wipe()?;
    }

    Ok(report)
}

/// Clone the source into the working directory and push it to the destination.
///
/// Returns the refspecs pushed.
pub fn mirror_repository(config: &RunConfig, workdir: &Workdir) -> Result<Vec<String>> {
    let mirror = workdir.create_mirror(&config.source, &config.tokens.gitlab)?;

    let git = GitOps::open(&mirror)?.with_auth(GitAuth::token(config.tokens.github.clone()));
    let destination_url = config.destination.https_url();
    tracing::info!(url = %destination_url, "pointing origin at destination");
    git.set_remote_url("origin", &destination_url)?;

    tracing::info!(tags = config.push_tags, "pushing to origin");
    let pushed = git.push_all("origin", config.push_tags)?;
    tracing::info!(refs = pushed.len(), "push complete");
    Ok(pushed)
}

/// Default branch and metadata replication, without touching git.
pub fn migrate_metadata<S, D>(gitlab: &S, github: &D, config: &RunConfig) -> Result<MigrationReport>
where
    S: ProjectOps + ?Sized,
    D: Destination + ?Sized,
{
    let mut report = MigrationReport::default();

    if config.set_default_branch {
        report.default_branch = apply_default_branch(github, &config.owner(), config.repo())?;
    }

    let stages = config.stages;
    if !(stages.merge_requests || stages.issues || stages.tags) {
        return Ok(report);
    }

    let project_id = resolve_project_id(gitlab, config)?;

    if stages.merge_requests {
        report.merge_requests = Some(migrate_merge_requests(
            gitlab,
            github,
            &config.source,
            &config.destination,
            project_id,
        )?);
    }
    if stages.issues {
        report.issues = Some(migrate_issues(
            gitlab,
            github,
            &config.destination,
            project_id,
        )?);
    }
    if stages.tags {
        report.tags = Some(migrate_tags(
            gitlab,
            github,
            &config.destination,
            project_id,
        )?);
    }

    Ok(report)
}

/// The configured project id, or the id GitLab reports for the source path.
pub fn resolve_project_id<S: ProjectOps + ?Sized>(gitlab: &S, config: &RunConfig) -> Result<u64> {
    if let Some(id) = config.project_id {
        return Ok(id);
    }

    let path = config.source.project_path();
    let project = gitlab.find_project(&path)?;
    tracing::info!(path = %path, id = project.id, "resolved GitLab project");
    Ok(project.id)
}
