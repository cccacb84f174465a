//! # ghconf-github
//!
//! GitHub REST transport for the reconciliation pipeline. [`GitHubClient`]
//! implements [`ghconf_sync::RemoteState`].

pub mod client;
mod wire;

pub use client::{GitHubClient, DEFAULT_API_URL};
