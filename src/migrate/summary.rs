//! Per-stage outcome counters.

use std::fmt;

/// What a replication stage did with its items.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct StageSummary {
    pub created: usize,
    pub skipped: usize,
    pub failed: usize,
}

impl fmt::Display for StageSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} created, {} skipped, {} failed",
            self.created, self.skipped, self.failed
        )
    }
}

/// Outcome of a whole run.
#[derive(Debug, Default, Clone)]
pub struct MigrationReport {
    pub pushed_refs: usize,
    pub default_branch: Option<String>,
    pub merge_requests: Option<StageSummary>,
    pub issues: Option<StageSummary>,
    pub tags: Option<StageSummary>,
}

impl MigrationReport {
    /// Log one line per stage that ran.
    pub fn log(&self) {
        tracing::info!(refs = self.pushed_refs, "pushed");
        if let Some(branch) = &self.default_branch {
            tracing::info!(branch = %branch, "default branch set");
        }
        for (stage, summary) in [
            ("merge requests", self.merge_requests),
            ("issues", self.issues),
            ("tags", self.tags),
        ] {
            if let Some(summary) = summary {
                tracing::info!("{}: {}", stage, summary);
            }
        }
    }

    /// Total per-item failures across all stages.
    pub fn failures(&self) -> usize {
        [self.merge_requests, self.issues, self.tags]
            .iter()
            .flatten()
            .map(|s| s.failed)
            .sum()
    }
}
