//! Repository orchestration: the shared entrypoint used by `apply` and `plan`.
//!
//! For every target repository the remote snapshot is fetched once, both
//! plans are built, and (for `run`) both are executed. A repository whose
//! snapshot cannot be read is counted as failed and skipped; only a rejected
//! token or a failed repository listing aborts the run.

use std::sync::atomic::{AtomicBool, Ordering};

use ghconf_core::{DesiredState, RepoName};

use crate::error::{RemoteError, SyncError};
use crate::executor::{execute, ExecutionResult, LabelMutator, MilestoneMutator, OperationRecord};
use crate::plan::{ItemKind, LabelPlan, MilestonePlan};
use crate::remote::RemoteState;
use crate::stats::RunStatistics;
use crate::{labels, milestones};

/// Listing more repositories than this logs a "this may take a while" warning.
const LARGE_RUN_THRESHOLD: usize = 50;

/// Options for a pipeline run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunOptions {
    pub dry_run: bool,
    /// Delete remote milestones absent from the desired state.
    pub sync_milestones: bool,
    /// Delete remote labels absent from the desired state.
    pub sync_labels: bool,
    /// Organization used to list repositories and to qualify bare names.
    pub organization: Option<String>,
}

/// Result of a completed run.
#[derive(Debug, Clone, Default)]
pub struct RunReport {
    pub statistics: RunStatistics,
    pub records: Vec<OperationRecord>,
    /// `true` if the run stopped early on a cancellation request.
    pub cancelled: bool,
}

/// Both plans for one repository. A kind is `None` when the run does not
/// manage it (nothing declared and no pruning requested).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepositoryPlan {
    pub repository: RepoName,
    pub milestones: Option<MilestonePlan>,
    pub labels: Option<LabelPlan>,
}

/// A repository whose remote state could not be read.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepositoryFailure {
    pub repository: RepoName,
    pub error: RemoteError,
}

/// Reconcile and apply `desired` to every target repository.
pub fn run<P>(remote: &P, desired: &DesiredState, options: &RunOptions) -> Result<RunReport, SyncError>
where
    P: RemoteState + ?Sized,
{
    run_with_cancel(remote, desired, options, &AtomicBool::new(false))
}

/// [`run`], checking `cancel` before each repository.
///
/// Once `cancel` is set the remaining repositories are skipped and the
/// partial report is returned with `cancelled = true`.
pub fn run_with_cancel<P>(
    remote: &P,
    desired: &DesiredState,
    options: &RunOptions,
    cancel: &AtomicBool,
) -> Result<RunReport, SyncError>
where
    P: RemoteState + ?Sized,
{
    verify(remote)?;
    let repositories = resolve_repositories(remote, desired, options)?;
    tracing::info!(
        count = repositories.len(),
        "applying configuration to {} repositories",
        repositories.len()
    );

    let mut report = RunReport::default();
    for (index, repo) in repositories.iter().enumerate() {
        if cancel.load(Ordering::Relaxed) {
            tracing::warn!(
                remaining = repositories.len() - index,
                "run cancelled; skipping remaining repositories"
            );
            report.cancelled = true;
            break;
        }

        tracing::info!(repository = %repo, "processing {repo}");
        report.statistics.repositories.push(repo.clone());

        let plan = match plan_repository(remote, repo, desired, options) {
            Ok(plan) => plan,
            Err(err) => {
                tracing::error!(
                    repository = %repo,
                    error = %err,
                    "✗ failed to read remote state of {repo}; skipping: {err}"
                );
                report.statistics.record_repository_failure();
                continue;
            }
        };

        for (kind, result) in execute_repository_plan(remote, &plan, options.dry_run) {
            report.statistics.merge(kind, &result);
            report.records.extend(result.records);
        }
    }

    Ok(report)
}

/// Compute the plans for every target repository without executing them.
pub fn plan<P>(
    remote: &P,
    desired: &DesiredState,
    options: &RunOptions,
) -> Result<Vec<Result<RepositoryPlan, RepositoryFailure>>, SyncError>
where
    P: RemoteState + ?Sized,
{
    verify(remote)?;
    let repositories = resolve_repositories(remote, desired, options)?;
    Ok(repositories
        .into_iter()
        .map(|repo| {
            plan_repository(remote, &repo, desired, options)
                .map_err(|error| RepositoryFailure { repository: repo, error })
        })
        .collect())
}

/// Fetch one repository's snapshot and build its plans.
pub fn plan_repository<P>(
    remote: &P,
    repo: &RepoName,
    desired: &DesiredState,
    options: &RunOptions,
) -> Result<RepositoryPlan, RemoteError>
where
    P: RemoteState + ?Sized,
{
    let milestones = match managed(desired.milestones.as_deref(), options.sync_milestones) {
        Some(specs) => {
            let current = remote.list_milestones(repo)?;
            tracing::debug!(repository = %repo, count = current.len(), "fetched milestones");
            Some(milestones::reconcile(specs, &current, options.sync_milestones))
        }
        None => None,
    };

    let labels = match managed(desired.labels.as_deref(), options.sync_labels) {
        Some(specs) => {
            let current = remote.list_labels(repo)?;
            tracing::debug!(repository = %repo, count = current.len(), "fetched labels");
            Some(labels::reconcile(specs, &current, options.sync_labels))
        }
        None => None,
    };

    Ok(RepositoryPlan {
        repository: repo.clone(),
        milestones,
        labels,
    })
}

/// Execute both plans of `plan`, milestones first.
pub fn execute_repository_plan<P>(
    remote: &P,
    plan: &RepositoryPlan,
    dry_run: bool,
) -> Vec<(ItemKind, ExecutionResult)>
where
    P: RemoteState + ?Sized,
{
    let repo = &plan.repository;
    let mut results = Vec::with_capacity(2);
    if let Some(milestone_plan) = &plan.milestones {
        let mutator = MilestoneMutator { remote, repo };
        results.push((
            ItemKind::Milestone,
            execute(repo, milestone_plan, ItemKind::Milestone, &mutator, dry_run),
        ));
    }
    if let Some(label_plan) = &plan.labels {
        let mutator = LabelMutator { remote, repo };
        results.push((
            ItemKind::Label,
            execute(repo, label_plan, ItemKind::Label, &mutator, dry_run),
        ));
    }
    results
}

/// Resolve the target repositories: the declared list (qualified with the
/// organization) or, when none are declared, everything the remote lists.
pub fn resolve_repositories<P>(
    remote: &P,
    desired: &DesiredState,
    options: &RunOptions,
) -> Result<Vec<RepoName>, SyncError>
where
    P: RemoteState + ?Sized,
{
    let owner = options.organization.as_deref();

    if !desired.repositories.is_empty() {
        let repos: Vec<RepoName> = desired
            .repositories
            .iter()
            .map(|repo| repo.qualified(owner))
            .collect();
        tracing::info!(
            count = repos.len(),
            "using {} repositories specified in configuration",
            repos.len()
        );
        return Ok(repos);
    }

    let repos = remote.list_repositories(owner).map_err(|err| match err {
        RemoteError::AuthenticationFailed => SyncError::Authentication,
        source => SyncError::RepositoryListing {
            owner: owner.unwrap_or("the authenticated user").to_string(),
            source,
        },
    })?;

    tracing::info!(count = repos.len(), "found {} repositories", repos.len());
    if repos.is_empty() {
        tracing::warn!("no repositories found; check the token permissions and organization name");
    } else if repos.len() > LARGE_RUN_THRESHOLD {
        tracing::warn!(
            count = repos.len(),
            "large number of repositories found ({}); this may take a while",
            repos.len()
        );
    }
    Ok(repos)
}

fn verify<P>(remote: &P) -> Result<(), SyncError>
where
    P: RemoteState + ?Sized,
{
    match remote.verify_access() {
        Ok(()) => Ok(()),
        Err(RemoteError::AuthenticationFailed) => Err(SyncError::Authentication),
        Err(err) => {
            tracing::warn!(error = %err, "could not verify credentials; continuing: {err}");
            Ok(())
        }
    }
}

/// The specs to reconcile for one kind, or `None` to leave it untouched.
///
/// An absent section is never managed. A declared section is managed when it
/// lists something or pruning is on, so an explicit empty list with pruning
/// removes every remote item of that kind.
fn managed<T>(section: Option<&[T]>, prune: bool) -> Option<&[T]> {
    section.filter(|specs| !specs.is_empty() || prune)
}
