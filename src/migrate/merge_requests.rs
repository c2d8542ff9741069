//! Replicate open GitLab merge requests as GitHub pull requests.

use std::collections::HashSet;

use crate::error::Result;
use crate::github::{CreatePullRequest, IssueOps, Label, LabelOps, PullRequestOps, RepoOps};
use crate::gitlab::{MergeRequest, ProjectOps};
use crate::location::RepoLocation;
use crate::migrate::{Destination, StageSummary};

/// Fetch open merge requests and existing pull requests, then replicate.
///
/// Failing to list either side is fatal; everything after that is per item.
pub fn migrate_merge_requests<S, D>(
    gitlab: &S,
    github: &D,
    source: &RepoLocation,
    destination: &RepoLocation,
    project_id: u64,
) -> Result<StageSummary>
where
    S: ProjectOps + ?Sized,
    D: Destination + ?Sized,
{
    let merge_requests = gitlab.list_open_merge_requests(project_id)?;
    let existing = github.list_pull_requests(&destination.namespace(), destination.name())?;
    tracing::info!(
        open = merge_requests.len(),
        existing = existing.len(),
        "replicating merge requests"
    );

    let titles = existing.into_iter().map(|pr| pr.title).collect();
    Ok(replicate_merge_requests(
        github,
        source,
        destination,
        &merge_requests,
        titles,
    ))
}

/// Create a pull request for every open merge request whose title is not
/// already taken at the destination.
///
/// Titles compare case-sensitively. Each created title joins the set, so
/// duplicates within `merge_requests` are only reproduced once.
pub fn replicate_merge_requests<D>(
    github: &D,
    source: &RepoLocation,
    destination: &RepoLocation,
    merge_requests: &[MergeRequest],
    mut existing_titles: HashSet<String>,
) -> StageSummary
where
    D: RepoOps + PullRequestOps + IssueOps + LabelOps + ?Sized,
{
    let owner = destination.namespace();
    let repo = destination.name();
    let mut summary = StageSummary::default();

    for mr in merge_requests {
        if !mr.is_open() {
            tracing::debug!(iid = mr.iid, state = ?mr.state, "not open, skipping");
            summary.skipped += 1;
            continue;
        }

        if existing_titles.contains(&mr.title) {
            tracing::info!(title = %mr.title, "pull request already exists, skipping");
            summary.skipped += 1;
            continue;
        }

        if !branches_present(github, &owner, repo, mr) {
            summary.skipped += 1;
            continue;
        }

        let request = CreatePullRequest::new(
            &mr.title,
            mr.description.clone().unwrap_or_default(),
            &mr.source_branch,
            &mr.target_branch,
        );
        let pr = match github.create_pull_request(&owner, repo, &request) {
            Ok(pr) => pr,
            Err(e) => {
                tracing::error!(title = %mr.title, "failed to create pull request: {}", e);
                summary.failed += 1;
                continue;
            }
        };
        tracing::info!(title = %mr.title, number = pr.number, "pull request created");
        existing_titles.insert(mr.title.clone());
        summary.created += 1;

        if !mr.labels.is_empty() {
            sync_labels(github, &owner, repo, pr.number, &mr.labels);
        }

        let assignee = mr.assignee.as_ref().map(|u| u.username.as_str());
        let comment = migration_comment(assignee, &merge_request_url(source, mr.iid));
        match github.create_comment(&owner, repo, pr.number, &comment) {
            Ok(()) => tracing::debug!(number = pr.number, "comment added"),
            Err(e) => tracing::warn!(number = pr.number, "failed to add comment: {}", e),
        }
    }

    summary
}

/// Link back to the merge request on the source forge.
pub fn merge_request_url(source: &RepoLocation, iid: u64) -> String {
    format!(
        "{}/{}/-/merge_requests/{}",
        source.web_base(),
        source.project_path(),
        iid
    )
}

/// Comment left on every migrated pull request.
pub fn migration_comment(assignee: Option<&str>, url: &str) -> String {
    format!(
        "Migrated from GitLab.\nAssigned on GitLab to: **@{}**\n{}",
        assignee.unwrap_or_default(),
        url
    )
}

/// Both branches must already exist at the destination. A missing branch
/// needs a human to push it, so the item is skipped rather than retried.
fn branches_present<D: RepoOps + ?Sized>(
    github: &D,
    owner: &str,
    repo: &str,
    mr: &MergeRequest,
) -> bool {
    for (role, branch) in [("source", &mr.source_branch), ("target", &mr.target_branch)] {
        match github.branch_exists(owner, repo, branch) {
            Ok(true) => {}
            Ok(false) => {
                tracing::warn!(
                    title = %mr.title,
                    branch = %branch,
                    "{} branch does not exist at the destination, skipping",
                    role
                );
                return false;
            }
            Err(e) => {
                tracing::warn!(
                    title = %mr.title,
                    branch = %branch,
                    "cannot verify {} branch, skipping: {}",
                    role,
                    e
                );
                return false;
            }
        }
    }
    true
}

/// Create whichever labels the destination lacks, then attach every label
/// that now exists there.
///
/// GitHub label names are case-insensitive.
fn sync_labels<D: LabelOps + ?Sized>(
    github: &D,
    owner: &str,
    repo: &str,
    number: u64,
    labels: &[String],
) {
    let mut known: HashSet<String> = match github.list_labels(owner, repo) {
        Ok(existing) => existing.into_iter().map(|l| l.name.to_lowercase()).collect(),
        Err(e) => {
            tracing::warn!(number, "failed to list labels, not labelling: {}", e);
            return;
        }
    };

    // GitHub rejects the whole attach request if any name is invalid.
    let mut failed = HashSet::new();
    let mut attachable = Vec::with_capacity(labels.len());
    for name in labels {
        let key = name.to_lowercase();
        if known.insert(key.clone()) {
            match github.create_label(owner, repo, &Label::named(name)) {
                Ok(()) => tracing::info!(label = %name, "label created"),
                Err(e) => {
                    tracing::warn!(label = %name, "failed to create label, not attaching: {}", e);
                    failed.insert(key);
                    continue;
                }
            }
        }
        if !failed.contains(&key) {
            attachable.push(name.clone());
        }
    }

    if attachable.is_empty() {
        return;
    }
    match github.add_labels(owner, repo, number, &attachable) {
        Ok(()) => tracing::debug!(number, labels = ?attachable, "labels attached"),
        Err(e) => tracing::warn!(number, "failed to attach labels: {}", e),
    }
}
