//! Reconciliation plans: the pure-data output of the reconcilers.

use std::fmt;

use ghconf_core::{LabelSpec, MilestoneSpec, RemoteLabel, RemoteMilestone};

/// Which kind of repository item a plan or operation concerns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ItemKind {
    Milestone,
    Label,
}

impl fmt::Display for ItemKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ItemKind::Milestone => f.write_str("milestone"),
            ItemKind::Label => f.write_str("label"),
        }
    }
}

/// Anything that has a human-readable identity key.
pub trait PlanItem {
    fn key(&self) -> &str;
}

impl PlanItem for MilestoneSpec {
    fn key(&self) -> &str {
        &self.title
    }
}

impl PlanItem for RemoteMilestone {
    fn key(&self) -> &str {
        &self.title
    }
}

impl PlanItem for LabelSpec {
    fn key(&self) -> &str {
        &self.name
    }
}

impl PlanItem for RemoteLabel {
    fn key(&self) -> &str {
        &self.name
    }
}

/// A desired item that matched more than one remote item and therefore
/// cannot be reconciled safely.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Conflict {
    pub key: String,
    pub candidates: Vec<String>,
}

/// Operations needed to move one repository's items of one kind from the
/// remote snapshot toward the desired state.
///
/// `S` is the desired spec type, `R` the remote snapshot type (which carries
/// the remote identifier used for update and delete).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Plan<S, R> {
    pub to_create: Vec<S>,
    /// Desired spec paired with the remote item it replaces.
    pub to_update: Vec<(S, R)>,
    /// Only populated when pruning is enabled for this kind.
    pub to_delete: Vec<R>,
    pub unchanged: usize,
    pub conflicts: Vec<Conflict>,
}

impl<S, R> Default for Plan<S, R> {
    fn default() -> Self {
        Self {
            to_create: Vec::new(),
            to_update: Vec::new(),
            to_delete: Vec::new(),
            unchanged: 0,
            conflicts: Vec::new(),
        }
    }
}

impl<S, R> Plan<S, R> {
    /// `true` when applying the plan would not touch the remote.
    pub fn is_empty(&self) -> bool {
        self.to_create.is_empty()
            && self.to_update.is_empty()
            && self.to_delete.is_empty()
            && self.conflicts.is_empty()
    }

    /// Number of mutation calls the plan would issue.
    pub fn pending(&self) -> usize {
        self.to_create.len() + self.to_update.len() + self.to_delete.len()
    }
}

pub type MilestonePlan = Plan<MilestoneSpec, RemoteMilestone>;
pub type LabelPlan = Plan<LabelSpec, RemoteLabel>;
