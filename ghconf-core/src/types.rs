//! Domain types for desired and remote repository state.
//!
//! Desired-state types (`MilestoneSpec`, `LabelSpec`, `DesiredState`) are only
//! ever built through [`crate::config`], so every instance is already
//! validated. Remote snapshot types are built by the transport layer.

use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Newtypes
// ---------------------------------------------------------------------------

/// A repository identifier, normally `owner/name`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct RepoName(pub String);

impl RepoName {
    /// Qualify a bare repository name with `owner`.
    ///
    /// Names that already contain a `/` are returned unchanged, as are all
    /// names when no owner is given.
    pub fn qualified(&self, owner: Option<&str>) -> RepoName {
        match owner {
            Some(owner) if !self.0.contains('/') => RepoName(format!("{owner}/{}", self.0)),
            _ => self.clone(),
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for RepoName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl From<String> for RepoName {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<&str> for RepoName {
    fn from(s: &str) -> Self {
        Self(s.to_owned())
    }
}

// ---------------------------------------------------------------------------
// Enums
// ---------------------------------------------------------------------------

/// Open/closed state of a milestone.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum MilestoneState {
    #[default]
    Open,
    Closed,
}

impl MilestoneState {
    pub fn as_str(self) -> &'static str {
        match self {
            MilestoneState::Open => "open",
            MilestoneState::Closed => "closed",
        }
    }
}

impl fmt::Display for MilestoneState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// Desired state
// ---------------------------------------------------------------------------

/// A milestone as declared in the configuration. `title` is the identity.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MilestoneSpec {
    pub title: String,
    pub description: String,
    pub state: MilestoneState,
    pub due_on: Option<NaiveDate>,
}

/// A label as declared in the configuration.
///
/// `name` is the identity (case-insensitive). `color` is stored as six
/// lowercase hex digits without a leading `#`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LabelSpec {
    pub name: String,
    pub color: String,
    pub description: String,
}

/// The validated desired state for a run. Immutable once loaded.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct DesiredState {
    /// Target repositories in declaration order. Empty means "every
    /// repository the account can see".
    pub repositories: Vec<RepoName>,
    /// `None` when the document has no `milestones` section; milestones are
    /// then never touched, even when pruning. `Some(vec![])` is an explicit
    /// empty list.
    pub milestones: Option<Vec<MilestoneSpec>>,
    /// Same convention as `milestones`.
    pub labels: Option<Vec<LabelSpec>>,
}

impl DesiredState {
    /// Declared milestones, empty when the section is absent.
    pub fn milestone_specs(&self) -> &[MilestoneSpec] {
        self.milestones.as_deref().unwrap_or_default()
    }

    /// Declared labels, empty when the section is absent.
    pub fn label_specs(&self) -> &[LabelSpec] {
        self.labels.as_deref().unwrap_or_default()
    }
}

// ---------------------------------------------------------------------------
// Remote snapshot
// ---------------------------------------------------------------------------

/// A milestone as currently stored on the remote.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemoteMilestone {
    /// Remote identifier used for update/delete calls.
    pub number: u64,
    pub title: String,
    /// `null` descriptions are represented as the empty string.
    pub description: String,
    pub state: MilestoneState,
    /// Calendar date of the remote due timestamp.
    pub due_on: Option<NaiveDate>,
}

/// A label as currently stored on the remote. The current `name` doubles as
/// the remote identifier.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemoteLabel {
    pub name: String,
    pub color: String,
    pub description: String,
}

/// Canonical form of a hex color for comparison: no `#`, lowercase.
pub fn normalize_color(color: &str) -> String {
    color.trim().trim_start_matches('#').to_ascii_lowercase()
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
