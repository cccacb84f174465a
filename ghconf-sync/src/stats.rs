//! Run-wide statistics, aggregated from per-plan execution results.

use ghconf_core::RepoName;

use crate::executor::ExecutionResult;
use crate::plan::ItemKind;

/// Counters for one item kind across all repositories.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct KindStats {
    pub created: usize,
    pub updated: usize,
    pub deleted: usize,
    pub unchanged: usize,
    pub failed: usize,
}

impl KindStats {
    /// Operations that changed (or in dry-run would change) the remote.
    pub fn succeeded(&self) -> usize {
        self.created + self.updated + self.deleted
    }

    fn absorb(&mut self, result: &ExecutionResult) {
        self.created += result.created;
        self.updated += result.updated;
        self.deleted += result.deleted;
        self.unchanged += result.unchanged;
        self.failed += result.failed;
    }
}

/// Whether a completed run needs attention.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunOutcome {
    /// No item or repository failed.
    Clean,
    /// The run completed but at least one item or repository failed.
    PartialFailure,
}

/// Aggregated counters for a whole run. Starts at zero; only grows through
/// [`RunStatistics::merge`] and [`RunStatistics::record_repository_failure`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunStatistics {
    pub milestones: KindStats,
    pub labels: KindStats,
    /// Repositories visited, in processing order.
    pub repositories: Vec<RepoName>,
    /// Repositories whose remote state could not be read.
    pub repository_failures: usize,
}

impl RunStatistics {
    pub fn merge(&mut self, kind: ItemKind, result: &ExecutionResult) {
        match kind {
            ItemKind::Milestone => self.milestones.absorb(result),
            ItemKind::Label => self.labels.absorb(result),
        }
    }

    pub fn record_repository_failure(&mut self) {
        self.repository_failures += 1;
    }

    pub fn created(&self) -> usize {
        self.milestones.created + self.labels.created
    }

    pub fn updated(&self) -> usize {
        self.milestones.updated + self.labels.updated
    }

    pub fn deleted(&self) -> usize {
        self.milestones.deleted + self.labels.deleted
    }

    pub fn unchanged(&self) -> usize {
        self.milestones.unchanged + self.labels.unchanged
    }

    /// Item failures of both kinds plus repository-level failures.
    pub fn failed(&self) -> usize {
        self.milestones.failed + self.labels.failed + self.repository_failures
    }

    pub fn succeeded(&self) -> usize {
        self.milestones.succeeded() + self.labels.succeeded()
    }

    pub fn outcome(&self) -> RunOutcome {
        if self.failed() == 0 {
            RunOutcome::Clean
        } else {
            RunOutcome::PartialFailure
        }
    }
}
