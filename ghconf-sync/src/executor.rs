//! Plan execution against the remote.
//!
//! ## `execute` — ordering and isolation
//!
//! 1. Conflicts are reported as failures (no remote call).
//! 2. Creates, then updates, then deletes, each in plan order.
//! 3. Every operation is attempted on its own; a rejected call is logged,
//!    counted as failed, and execution moves on to the next item.
//! 4. In dry-run mode no mutation is issued and every planned operation is
//!    counted as if it had succeeded.

use std::fmt;

use ghconf_core::{LabelSpec, MilestoneSpec, RemoteLabel, RemoteMilestone, RepoName};

use crate::error::RemoteError;
use crate::plan::{ItemKind, Plan, PlanItem};
use crate::remote::RemoteState;

// ---------------------------------------------------------------------------
// Operation records
// ---------------------------------------------------------------------------

/// What an operation does to the remote item.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Create,
    Update,
    Delete,
    /// Not attempted because the desired item could not be matched safely.
    Skip,
}

impl Action {
    fn past_tense(self) -> &'static str {
        match self {
            Action::Create => "created",
            Action::Update => "updated",
            Action::Delete => "deleted",
            Action::Skip => "skipped",
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Action::Create => f.write_str("create"),
            Action::Update => f.write_str("update"),
            Action::Delete => f.write_str("delete"),
            Action::Skip => f.write_str("skip"),
        }
    }
}

/// How an operation ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Applied,
    /// `--dry-run`: the operation *would* have been issued.
    DryRun,
    Failed,
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Outcome::Applied => f.write_str("applied"),
            Outcome::DryRun => f.write_str("dry-run"),
            Outcome::Failed => f.write_str("failed"),
        }
    }
}

/// One attempted operation, as logged.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OperationRecord {
    pub repository: RepoName,
    pub item_kind: ItemKind,
    pub item_key: String,
    pub action: Action,
    pub outcome: Outcome,
    pub detail: Option<String>,
}

/// Counters and records for one plan of one repository.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExecutionResult {
    pub created: usize,
    pub updated: usize,
    pub deleted: usize,
    pub unchanged: usize,
    pub failed: usize,
    pub records: Vec<OperationRecord>,
}

// ---------------------------------------------------------------------------
// Mutators
// ---------------------------------------------------------------------------

/// Create/update/delete primitives for one item kind of one repository.
pub trait Mutator<S, R> {
    fn create(&self, spec: &S) -> Result<(), RemoteError>;
    fn update(&self, spec: &S, current: &R) -> Result<(), RemoteError>;
    fn delete(&self, current: &R) -> Result<(), RemoteError>;
}

/// Milestone primitives of `repo`, routed through a [`RemoteState`].
pub struct MilestoneMutator<'a, P: ?Sized> {
    pub remote: &'a P,
    pub repo: &'a RepoName,
}

impl<P: RemoteState + ?Sized> Mutator<MilestoneSpec, RemoteMilestone> for MilestoneMutator<'_, P> {
    fn create(&self, spec: &MilestoneSpec) -> Result<(), RemoteError> {
        self.remote.create_milestone(self.repo, spec)
    }

    fn update(&self, spec: &MilestoneSpec, current: &RemoteMilestone) -> Result<(), RemoteError> {
        self.remote.update_milestone(self.repo, current.number, spec)
    }

    fn delete(&self, current: &RemoteMilestone) -> Result<(), RemoteError> {
        self.remote.delete_milestone(self.repo, current.number)
    }
}

/// Label primitives of `repo`, routed through a [`RemoteState`].
pub struct LabelMutator<'a, P: ?Sized> {
    pub remote: &'a P,
    pub repo: &'a RepoName,
}

impl<P: RemoteState + ?Sized> Mutator<LabelSpec, RemoteLabel> for LabelMutator<'_, P> {
    fn create(&self, spec: &LabelSpec) -> Result<(), RemoteError> {
        self.remote.create_label(self.repo, spec)
    }

    fn update(&self, spec: &LabelSpec, current: &RemoteLabel) -> Result<(), RemoteError> {
        self.remote.update_label(self.repo, &current.name, spec)
    }

    fn delete(&self, current: &RemoteLabel) -> Result<(), RemoteError> {
        self.remote.delete_label(self.repo, &current.name)
    }
}

// ---------------------------------------------------------------------------
// execute
// ---------------------------------------------------------------------------

/// Apply `plan` for `repo` through `mutator`.
///
/// Never fails as a whole: item failures are counted in
/// [`ExecutionResult::failed`] and described in the records.
pub fn execute<S, R, M>(
    repo: &RepoName,
    plan: &Plan<S, R>,
    kind: ItemKind,
    mutator: &M,
    dry_run: bool,
) -> ExecutionResult
where
    S: PlanItem,
    R: PlanItem,
    M: Mutator<S, R> + ?Sized,
{
    let mut run = Execution {
        repo,
        kind,
        dry_run,
        result: ExecutionResult {
            unchanged: plan.unchanged,
            ..ExecutionResult::default()
        },
    };

    for conflict in &plan.conflicts {
        let detail = format!(
            "ambiguous case-insensitive match: {}",
            conflict.candidates.join(", ")
        );
        tracing::error!(
            repository = %repo,
            kind = %kind,
            key = %conflict.key,
            "✗ skipped {kind} '{}': {detail}",
            conflict.key
        );
        run.result.failed += 1;
        run.record(&conflict.key, Action::Skip, Outcome::Failed, Some(detail));
    }

    for spec in &plan.to_create {
        run.attempt(spec.key(), Action::Create, None, || mutator.create(spec));
    }

    for (spec, current) in &plan.to_update {
        let recased = (spec.key() != current.key())
            .then(|| format!("casing changed from '{}'", current.key()));
        run.attempt(spec.key(), Action::Update, recased, || mutator.update(spec, current));
    }

    for current in &plan.to_delete {
        run.attempt(current.key(), Action::Delete, None, || mutator.delete(current));
    }

    run.result
}

struct Execution<'a> {
    repo: &'a RepoName,
    kind: ItemKind,
    dry_run: bool,
    result: ExecutionResult,
}

impl Execution<'_> {
    fn attempt<F>(&mut self, key: &str, action: Action, note: Option<String>, op: F)
    where
        F: FnOnce() -> Result<(), RemoteError>,
    {
        let (repo, kind) = (self.repo, self.kind);

        if self.dry_run {
            tracing::info!(
                repository = %repo,
                kind = %kind,
                key,
                action = %action,
                "[dry-run] would {action} {kind} '{key}' in {repo}"
            );
            self.count(action);
            self.record(key, action, Outcome::DryRun, note);
            return;
        }

        match op() {
            Ok(()) => {
                tracing::info!(
                    repository = %repo,
                    kind = %kind,
                    key,
                    action = %action,
                    "✓ {} {kind} '{key}' in {repo}",
                    action.past_tense()
                );
                self.count(action);
                self.record(key, action, Outcome::Applied, note);
            }
            Err(err) => {
                tracing::error!(
                    repository = %repo,
                    kind = %kind,
                    key,
                    action = %action,
                    error = %err,
                    "✗ failed to {action} {kind} '{key}' in {repo}: {err}"
                );
                self.result.failed += 1;
                self.record(key, action, Outcome::Failed, Some(err.to_string()));
            }
        }
    }

    fn count(&mut self, action: Action) {
        match action {
            Action::Create => self.result.created += 1,
            Action::Update => self.result.updated += 1,
            Action::Delete => self.result.deleted += 1,
            Action::Skip => {}
        }
    }

    fn record(&mut self, key: &str, action: Action, outcome: Outcome, detail: Option<String>) {
        self.result.records.push(OperationRecord {
            repository: self.repo.clone(),
            item_kind: self.kind,
            item_key: key.to_string(),
            action,
            outcome,
            detail,
        });
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
