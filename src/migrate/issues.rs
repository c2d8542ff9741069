//! Replicate GitLab issues as GitHub issues.

use std::collections::HashSet;

use crate::error::Result;
use crate::github::{CreateIssue, IssueOps};
use crate::gitlab::{Issue, ProjectOps};
use crate::location::RepoLocation;
use crate::migrate::StageSummary;

/// Fetch open source issues and every destination issue, then replicate.
pub fn migrate_issues<S, D>(
    gitlab: &S,
    github: &D,
    destination: &RepoLocation,
    project_id: u64,
) -> Result<StageSummary>
where
    S: ProjectOps + ?Sized,
    D: IssueOps + ?Sized,
{
    let issues = gitlab.list_open_issues(project_id)?;
    let existing = github.list_issues(&destination.namespace(), destination.name())?;
    tracing::info!(
        open = issues.len(),
        existing = existing.len(),
        "replicating issues"
    );

    let titles = existing.into_iter().map(|issue| issue.title).collect();
    Ok(replicate_issues(github, destination, issues, titles))
}

/// Create every issue whose title (compared case-insensitively) is not yet
/// present at the destination.
///
/// GitLab lists issues newest first; the list is reversed so the oldest
/// issue is created first and GitHub numbering roughly follows the original
/// timeline.
pub fn replicate_issues<D: IssueOps + ?Sized>(
    github: &D,
    destination: &RepoLocation,
    mut issues: Vec<Issue>,
    existing_titles: HashSet<String>,
) -> StageSummary {
    let owner = destination.namespace();
    let repo = destination.name();
    let mut known: HashSet<String> = existing_titles.iter().map(|t| t.to_lowercase()).collect();
    let mut summary = StageSummary::default();

    issues.reverse();

    for issue in &issues {
        let key = issue.title.to_lowercase();
        if known.contains(&key) {
            tracing::info!(title = %issue.title, "issue already exists, skipping");
            summary.skipped += 1;
            continue;
        }

        let request = CreateIssue {
            title: issue.title.clone(),
            body: issue.description.clone().unwrap_or_default(),
        };
        match github.create_issue(&owner, repo, &request) {
            Ok(created) => {
                tracing::info!(title = %issue.title, number = created.number, "issue created");
                known.insert(key);
                summary.created += 1;
            }
            Err(e) => {
                tracing::error!(title = %issue.title, "failed to create issue: {}", e);
                summary.failed += 1;
            }
        }
    }

    summary
}
