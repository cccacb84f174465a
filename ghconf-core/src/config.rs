//! Desired-state YAML loader.
//!
//! # Document shape
//!
//! ```yaml
//! repositories:          # optional; empty or absent means "all"
//!   - acme/api
//!   - web                # bare names are qualified with --organization
//! milestones:
//!   - title: MVP
//!     description: First usable release
//!     state: open        # open | closed, default open
//!     due_on: 2025-05-04 # YYYY-MM-DD, optional
//! labels:
//!   - name: bug
//!     color: "#d73a4a"   # 6 hex digits, leading '#' optional
//!     description: Something isn't working
//! ```
//!
//! Loading is two-phase: serde parses the document into loosely shaped raw
//! structs (missing required keys fail here), then [`validate`] turns them into
//! a [`DesiredState`] or rejects the document. Nothing downstream ever sees an
//! unvalidated value.

use std::collections::{HashMap, HashSet};
use std::path::{Path, PathBuf};

use chrono::NaiveDate;
use serde::Deserialize;

use crate::error::{ConfigError, ValidationError};
use crate::types::{
    normalize_color, DesiredState, LabelSpec, MilestoneSpec, MilestoneState, RepoName,
};

/// Accepted `due_on` format.
pub const DUE_DATE_FORMAT: &str = "%Y-%m-%d";

// ---------------------------------------------------------------------------
// 1. Raw document
// ---------------------------------------------------------------------------

#[derive(Debug, Default, Deserialize)]
struct RawConfig {
    #[serde(default)]
    repositories: Option<Vec<String>>,
    #[serde(default)]
    milestones: Option<Vec<RawMilestone>>,
    #[serde(default)]
    labels: Option<Vec<RawLabel>>,
}

#[derive(Debug, Deserialize)]
struct RawMilestone {
    title: String,
    #[serde(default)]
    description: Option<String>,
    #[serde(default)]
    state: MilestoneState,
    #[serde(default)]
    due_on: Option<String>,
}

#[derive(Debug, Deserialize)]
struct RawLabel {
    name: String,
    color: String,
    #[serde(default)]
    description: Option<String>,
}

// ---------------------------------------------------------------------------
// 2. Load
// ---------------------------------------------------------------------------

/// Read and validate the desired-state document at `path`.
///
/// Returns `ConfigError::Io` if unreadable, `ConfigError::Parse` (with line
/// context) if malformed or missing required keys, and
/// `ConfigError::Validation` if a semantic rule is broken.
pub fn load(path: &Path) -> Result<DesiredState, ConfigError> {
    let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let state = parse(&contents, path)?;
    tracing::info!(path = %path.display(), "loaded configuration");
    Ok(state)
}

/// Parse and validate an in-memory document. `origin` is only used for error
/// messages.
pub fn parse(contents: &str, origin: &Path) -> Result<DesiredState, ConfigError> {
    let raw: RawConfig = if contents.trim().is_empty() {
        RawConfig::default()
    } else {
        serde_yaml::from_str(contents).map_err(|source| ConfigError::Parse {
            path: PathBuf::from(origin),
            source,
        })?
    };

    if raw.milestones.is_none() && raw.labels.is_none() {
        tracing::warn!(
            path = %origin.display(),
            "configuration does not contain 'milestones' or 'labels' sections"
        );
    }

    validate(raw).map_err(|source| ConfigError::Validation {
        path: PathBuf::from(origin),
        source,
    })
}

// ---------------------------------------------------------------------------
// 3. Validate
// ---------------------------------------------------------------------------

fn validate(raw: RawConfig) -> Result<DesiredState, ValidationError> {
    let repositories = raw
        .repositories
        .unwrap_or_default()
        .into_iter()
        .enumerate()
        .map(|(index, repo)| {
            let repo = repo.trim();
            if repo.is_empty() {
                Err(ValidationError::EmptyRepository { index })
            } else {
                Ok(RepoName::from(repo))
            }
        })
        .collect::<Result<Vec<_>, _>>()?;

    let milestones_declared = raw.milestones.is_some();
    let labels_declared = raw.labels.is_some();

    let mut titles = HashSet::new();
    let mut milestones = Vec::new();
    for (index, m) in raw.milestones.unwrap_or_default().into_iter().enumerate() {
        if m.title.trim().is_empty() {
            return Err(ValidationError::EmptyMilestoneTitle { index });
        }
        if !titles.insert(m.title.clone()) {
            return Err(ValidationError::DuplicateMilestone { title: m.title });
        }
        let due_on = match m.due_on.as_deref().map(str::trim) {
            None | Some("") => None,
            Some(value) => Some(parse_due_date(value).ok_or_else(|| {
                ValidationError::InvalidDueDate {
                    title: m.title.clone(),
                    value: value.to_string(),
                }
            })?),
        };
        milestones.push(MilestoneSpec {
            title: m.title,
            description: m.description.unwrap_or_default(),
            state: m.state,
            due_on,
        });
    }

    let mut names: HashMap<String, String> = HashMap::new();
    let mut labels = Vec::new();
    for (index, l) in raw.labels.unwrap_or_default().into_iter().enumerate() {
        if l.name.trim().is_empty() {
            return Err(ValidationError::EmptyLabelName { index });
        }
        if let Some(first) = names.get(&l.name.to_lowercase()) {
            return Err(ValidationError::DuplicateLabel {
                first: first.clone(),
                second: l.name,
            });
        }
        if !is_hex_color(&l.color) {
            return Err(ValidationError::InvalidColor {
                name: l.name,
                value: l.color,
            });
        }
        names.insert(l.name.to_lowercase(), l.name.clone());
        labels.push(LabelSpec {
            color: normalize_color(&l.color),
            name: l.name,
            description: l.description.unwrap_or_default(),
        });
    }

    Ok(DesiredState {
        repositories,
        milestones: milestones_declared.then_some(milestones),
        labels: labels_declared.then_some(labels),
    })
}

/// Parse a `YYYY-MM-DD` date.
pub fn parse_due_date(value: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(value, DUE_DATE_FORMAT).ok()
}

fn is_hex_color(value: &str) -> bool {
    let digits = value.trim().strip_prefix('#').unwrap_or(value.trim());
    digits.len() == 6 && digits.chars().all(|c| c.is_ascii_hexdigit())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
