//! # ghconf-sync
//!
//! Milestone and label reconciliation engine.
//!
//! The reconcilers ([`milestones::reconcile`], [`labels::reconcile`]) are pure
//! functions from desired state and a remote snapshot to a [`Plan`]. The
//! [`executor`] applies a plan through a [`RemoteState`], and
//! [`pipeline::run`] drives both across every target repository.

pub mod error;
pub mod executor;
pub mod labels;
pub mod milestones;
pub mod pipeline;
pub mod plan;
pub mod remote;
pub mod stats;

pub use error::{RemoteError, SyncError};
pub use executor::{execute, Action, ExecutionResult, OperationRecord, Outcome};
pub use pipeline::{RepositoryPlan, RunOptions, RunReport};
pub use plan::{Conflict, ItemKind, LabelPlan, MilestonePlan, Plan};
pub use remote::RemoteState;
pub use stats::{KindStats, RunOutcome, RunStatistics};
