//! The remote state capability consumed by the reconciliation pipeline.

use ghconf_core::{LabelSpec, MilestoneSpec, RemoteLabel, RemoteMilestone, RepoName};

use crate::error::RemoteError;

/// Read and mutate milestones and labels of remote repositories.
///
/// Implementations own transport concerns (auth headers, pagination,
/// timeouts). Callers never retry; any error is final for that call.
pub trait RemoteState {
    /// Check that the credentials are accepted at all.
    fn verify_access(&self) -> Result<(), RemoteError>;

    /// Repositories owned by `owner`, or visible to the authenticated account
    /// when `owner` is `None`.
    fn list_repositories(&self, owner: Option<&str>) -> Result<Vec<RepoName>, RemoteError>;

    /// All milestones of `repo`, open and closed.
    fn list_milestones(&self, repo: &RepoName) -> Result<Vec<RemoteMilestone>, RemoteError>;

    fn list_labels(&self, repo: &RepoName) -> Result<Vec<RemoteLabel>, RemoteError>;

    fn create_milestone(&self, repo: &RepoName, spec: &MilestoneSpec) -> Result<(), RemoteError>;

    fn update_milestone(
        &self,
        repo: &RepoName,
        number: u64,
        spec: &MilestoneSpec,
    ) -> Result<(), RemoteError>;

    fn delete_milestone(&self, repo: &RepoName, number: u64) -> Result<(), RemoteError>;

    fn create_label(&self, repo: &RepoName, spec: &LabelSpec) -> Result<(), RemoteError>;

    /// Update the label currently named `current_name`; this also renames it
    /// to `spec.name` when the two differ.
    fn update_label(
        &self,
        repo: &RepoName,
        current_name: &str,
        spec: &LabelSpec,
    ) -> Result<(), RemoteError>;

    fn delete_label(&self, repo: &RepoName, name: &str) -> Result<(), RemoteError>;
}
