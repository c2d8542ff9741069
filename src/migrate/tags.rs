//! Recreate GitLab tags as annotated tags on GitHub.

use crate::error::{MigrateError, Result};
use crate::github::{CreateTag, TagOps, Tagger};
use crate::gitlab::{ProjectOps, Tag, TagCommit};
use crate::location::RepoLocation;
use crate::migrate::StageSummary;

pub fn migrate_tags<S, D>(
    gitlab: &S,
    github: &D,
    destination: &RepoLocation,
    project_id: u64,
) -> Result<StageSummary>
where
    S: ProjectOps + ?Sized,
    D: TagOps + ?Sized,
{
    let tags = gitlab.list_tags(project_id)?;
    tracing::info!(count = tags.len(), "replicating tags");
    replicate_tags(github, destination, &tags)
}

/// Create a tag object and a `refs/tags/<name>` reference for each tag.
///
/// A reference that already exists counts as skipped, which makes reruns
/// harmless. Any other reference failure aborts the pass. A tag object that
/// cannot be created is logged and skipped.
pub fn replicate_tags<D: TagOps + ?Sized>(
    github: &D,
    destination: &RepoLocation,
    tags: &[Tag],
) -> Result<StageSummary> {
    let owner = destination.namespace();
    let repo = destination.name();
    let mut summary = StageSummary::default();

    for tag in tags {
        let Some(commit) = &tag.commit else {
            tracing::warn!(tag = %tag.name, "tag has no commit, skipping");
            summary.skipped += 1;
            continue;
        };

        let object = match github.create_tag(&owner, repo, &tag_request(tag, commit)) {
            Ok(object) => object,
            Err(e) => {
                tracing::error!(tag = %tag.name, "failed to create tag object: {}", e);
                summary.failed += 1;
                continue;
            }
        };

        let reference = format!("refs/tags/{}", tag.name);
        match github.create_ref(&owner, repo, &reference, &object.sha) {
            Ok(()) => {
                tracing::info!(tag = %tag.name, "tag created");
                summary.created += 1;
            }
            Err(MigrateError::ReferenceExists(_)) => {
                tracing::info!(tag = %tag.name, "tag already exists, skipping");
                summary.skipped += 1;
            }
            Err(e) => return Err(e),
        }
    }

    Ok(summary)
}

/// The tagger is the tagged commit's author; it is left out when GitLab did
/// not report a complete identity.
fn tag_request(tag: &Tag, commit: &TagCommit) -> CreateTag {
    let request = CreateTag::for_commit(
        &tag.name,
        tag.message.clone().unwrap_or_default(),
        &commit.id,
    );

    match (&commit.author_name, &commit.author_email, &commit.authored_date) {
        (Some(name), Some(email), Some(date)) => request.with_tagger(Tagger {
            name: name.clone(),
            email: email.clone(),
            date: date.clone(),
        }),
        _ => request,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn commit(author: Option<&str>) -> TagCommit {
        TagCommit {
            id: "2695effb5807a22ff3d138d593fd856244e155e7".into(),
            author_name: author.map(String::from),
            author_email: Some("jane@example.com".into()),
            authored_date: Some("2024-01-02T03:04:05+01:00".into()),
        }
    }

    #[test]
    fn test_tag_request_carries_tagger() {
        let commit = commit(Some("Jane Doe"));
        let tag = Tag {
            name: "v1.0.0".into(),
            message: Some("First release".into()),
            commit: Some(commit.clone()),
        };

        let request = tag_request(&tag, &commit);
        assert_eq!(request.tag, "v1.0.0");
        assert_eq!(request.message, "First release");
        assert_eq!(request.object, commit.id);
        assert_eq!(request.object_type, "commit");
        let tagger = request.tagger.unwrap();
        assert_eq!(tagger.name, "Jane Doe");
        assert_eq!(tagger.date, "2024-01-02T03:04:05+01:00");
    }

    #[test]
    fn test_tag_request_without_author() {
        let commit = commit(None);
        let tag = Tag {
            name: "v0.1".into(),
            message: None,
            commit: Some(commit.clone()),
        };

        let request = tag_request(&tag, &commit);
        assert_eq!(request.message, "");
        assert!(request.tagger.is_none());
    }
}
