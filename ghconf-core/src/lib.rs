//! ghconf core library — domain types, desired-state loading, errors.
//!
//! - [`types`] — desired and remote milestone/label types
//! - [`config`] — YAML load + validation into [`DesiredState`]
//! - [`error`] — [`ConfigError`], [`ValidationError`]

pub mod config;
pub mod error;
pub mod types;

pub use error::{ConfigError, ValidationError};
pub use types::{
    normalize_color, DesiredState, LabelSpec, MilestoneSpec, MilestoneState, RemoteLabel,
    RemoteMilestone, RepoName,
};
