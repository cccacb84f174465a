//! GitHub REST wire formats and their conversion to domain types.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use ghconf_core::{LabelSpec, MilestoneSpec, MilestoneState, RemoteLabel, RemoteMilestone};
use ghconf_sync::RemoteError;

// ---------------------------------------------------------------------------
// Responses
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
pub(crate) struct WireRepo {
    pub full_name: String,
}

#[derive(Debug, Deserialize)]
pub(crate) struct WireMilestone {
    pub number: u64,
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    pub state: MilestoneState,
    #[serde(default)]
    pub due_on: Option<DateTime<Utc>>,
}

impl From<WireMilestone> for RemoteMilestone {
    fn from(m: WireMilestone) -> Self {
        RemoteMilestone {
            number: m.number,
            title: m.title,
            description: m.description.unwrap_or_default(),
            state: m.state,
            due_on: m.due_on.map(|d| d.date_naive()),
        }
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct WireLabel {
    pub name: String,
    pub color: String,
    #[serde(default)]
    pub description: Option<String>,
}

impl From<WireLabel> for RemoteLabel {
    fn from(l: WireLabel) -> Self {
        RemoteLabel {
            name: l.name,
            color: l.color,
            description: l.description.unwrap_or_default(),
        }
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct RateLimit {
    pub resources: RateResources,
}

#[derive(Debug, Deserialize)]
pub(crate) struct RateResources {
    pub core: CoreRate,
}

#[derive(Debug, Deserialize)]
pub(crate) struct CoreRate {
    pub limit: u64,
    pub remaining: u64,
    /// Unix seconds.
    pub reset: i64,
}

#[derive(Debug, Deserialize)]
struct ApiMessage {
    message: String,
}

// ---------------------------------------------------------------------------
// Requests
// ---------------------------------------------------------------------------

#[derive(Debug, Serialize, PartialEq, Eq)]
pub(crate) struct MilestonePayload<'a> {
    pub title: &'a str,
    pub description: &'a str,
    pub state: MilestoneState,
    /// `null` clears an existing due date on update.
    pub due_on: Option<String>,
}

impl<'a> From<&'a MilestoneSpec> for MilestonePayload<'a> {
    fn from(spec: &'a MilestoneSpec) -> Self {
        MilestonePayload {
            title: &spec.title,
            description: &spec.description,
            state: spec.state,
            due_on: spec.due_on.map(due_timestamp),
        }
    }
}

#[derive(Debug, Serialize, PartialEq, Eq)]
pub(crate) struct CreateLabelPayload<'a> {
    pub name: &'a str,
    pub color: &'a str,
    pub description: &'a str,
}

impl<'a> From<&'a LabelSpec> for CreateLabelPayload<'a> {
    fn from(spec: &'a LabelSpec) -> Self {
        CreateLabelPayload {
            name: &spec.name,
            color: &spec.color,
            description: &spec.description,
        }
    }
}

#[derive(Debug, Serialize, PartialEq, Eq)]
pub(crate) struct UpdateLabelPayload<'a> {
    pub new_name: &'a str,
    pub color: &'a str,
    pub description: &'a str,
}

impl<'a> From<&'a LabelSpec> for UpdateLabelPayload<'a> {
    fn from(spec: &'a LabelSpec) -> Self {
        UpdateLabelPayload {
            new_name: &spec.name,
            color: &spec.color,
            description: &spec.description,
        }
    }
}

/// Due dates are sent as the last second of the day, UTC.
pub(crate) fn due_timestamp(date: NaiveDate) -> String {
    format!("{}T23:59:59Z", date.format("%Y-%m-%d"))
}

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

/// Map a non-success HTTP status to a [`RemoteError`].
pub(crate) fn status_error(status: u16, body: &str, resource: &str) -> RemoteError {
    match status {
        401 => RemoteError::AuthenticationFailed,
        403 => RemoteError::Forbidden {
            resource: resource.to_string(),
        },
        404 => RemoteError::NotFound {
            resource: resource.to_string(),
        },
        _ => RemoteError::Rejected {
            status,
            message: serde_json::from_str::<ApiMessage>(body)
                .map(|m| m.message)
                .unwrap_or_else(|_| body.trim().to_string()),
        },
    }
}
