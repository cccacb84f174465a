//! Error types for ghconf-core.

use std::path::PathBuf;

use thiserror::Error;

/// A desired-state document that parsed but breaks a semantic rule.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// A milestone has an empty (or whitespace-only) title.
    #[error("milestone at index {index} has an empty title")]
    EmptyMilestoneTitle { index: usize },

    /// A label has an empty (or whitespace-only) name.
    #[error("label at index {index} has an empty name")]
    EmptyLabelName { index: usize },

    /// `due_on` is not a `YYYY-MM-DD` date.
    #[error("milestone '{title}': due_on '{value}' is not a YYYY-MM-DD date")]
    InvalidDueDate { title: String, value: String },

    /// `color` is not six hex digits (optionally prefixed with `#`).
    #[error("label '{name}': color '{value}' is not a 6-digit hex color")]
    InvalidColor { name: String, value: String },

    /// Two milestones share a title.
    #[error("duplicate milestone title '{title}'")]
    DuplicateMilestone { title: String },

    /// Two labels share a name under case-insensitive comparison.
    #[error("duplicate label name '{second}' (conflicts with '{first}')")]
    DuplicateLabel { first: String, second: String },

    /// A repository entry is empty.
    #[error("repository at index {index} is empty")]
    EmptyRepository { index: usize },
}

/// All errors that can arise while loading a desired-state document.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The file could not be read.
    #[error("I/O error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// YAML parse error, including missing required fields and unknown
    /// milestone states. Carries line context from serde_yaml.
    #[error("failed to parse configuration at {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },

    /// The document parsed but is not a valid desired state.
    #[error("invalid configuration at {path}: {source}")]
    Validation {
        path: PathBuf,
        #[source]
        source: ValidationError,
    },
}
