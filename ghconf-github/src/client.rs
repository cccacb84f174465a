//! Blocking GitHub REST client implementing [`RemoteState`].

use std::time::Duration;

use chrono::Utc;
use serde::{de::DeserializeOwned, Serialize};

use ghconf_core::{LabelSpec, MilestoneSpec, RemoteLabel, RemoteMilestone, RepoName};
use ghconf_sync::{RemoteError, RemoteState};

use crate::wire::{
    status_error, CreateLabelPayload, MilestonePayload, RateLimit, UpdateLabelPayload,
    WireLabel, WireMilestone, WireRepo,
};

pub const DEFAULT_API_URL: &str = "https://api.github.com";

const PER_PAGE: &str = "100";
const LOW_RATE_LIMIT: u64 = 100;

/// GitHub REST v3 client.
///
/// Every call goes through one `ureq::Agent`, which bounds connect and read
/// times; failures are returned as-is without retrying.
#[derive(Clone)]
pub struct GitHubClient {
    agent: ureq::Agent,
    base_url: String,
    token: String,
}

impl GitHubClient {
    pub fn new(token: impl Into<String>) -> Self {
        let agent = ureq::AgentBuilder::new()
            .timeout_connect(Duration::from_secs(10))
            .timeout_read(Duration::from_secs(30))
            .user_agent(concat!("ghconf/", env!("CARGO_PKG_VERSION")))
            .build();
        Self {
            agent,
            base_url: DEFAULT_API_URL.to_string(),
            token: token.into(),
        }
    }

    /// Point the client at another API root (GitHub Enterprise, tests).
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    // -----------------------------------------------------------------------
    // Request plumbing
    // -----------------------------------------------------------------------

    fn request(&self, method: &str, path: &str) -> ureq::Request {
        self.agent
            .request(method, &format!("{}{}", self.base_url, path))
            .set("Authorization", &format!("token {}", self.token))
            .set("Accept", "application/vnd.github.v3+json")
    }

    fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T, RemoteError> {
        let response = self
            .request("GET", path)
            .call()
            .map_err(|e| map_error(e, path))?;
        decode(response, path)
    }

    fn send<B: Serialize>(&self, method: &str, path: &str, body: &B) -> Result<(), RemoteError> {
        tracing::debug!(method, path, "sending request");
        self.request(method, path)
            .send_json(body)
            .map(drop)
            .map_err(|e| map_error(e, path))
    }

    fn delete(&self, path: &str) -> Result<(), RemoteError> {
        tracing::debug!(path, "sending DELETE");
        self.request("DELETE", path)
            .call()
            .map(drop)
            .map_err(|e| map_error(e, path))
    }

    /// GET every page of `path` (100 per page) until an empty page.
    fn paginate<T: DeserializeOwned>(
        &self,
        path: &str,
        params: &[(&str, &str)],
    ) -> Result<Vec<T>, RemoteError> {
        let mut items = Vec::new();
        for page in 1.. {
            let page_str = page.to_string();
            let mut request = self.request("GET", path);
            for (key, value) in params {
                request = request.query(key, value);
            }
            let response = request
                .query("per_page", PER_PAGE)
                .query("page", &page_str)
                .call()
                .map_err(|e| map_error(e, path))?;

            if let Some(remaining) = response.header("x-ratelimit-remaining") {
                tracing::debug!(path, page, remaining, "rate limit remaining");
            }

            let batch: Vec<T> = decode(response, path)?;
            tracing::debug!(path, page, count = batch.len(), "fetched page");
            if batch.is_empty() {
                break;
            }
            items.extend(batch);
        }
        Ok(items)
    }
}

impl RemoteState for GitHubClient {
    fn verify_access(&self) -> Result<(), RemoteError> {
        let limits: RateLimit = self.get_json("/rate_limit")?;
        let core = limits.resources.core;
        let reset_in = (core.reset - Utc::now().timestamp()).max(0);
        tracing::debug!(
            remaining = core.remaining,
            limit = core.limit,
            reset_in_secs = reset_in,
            "rate limit: {}/{} requests remaining",
            core.remaining,
            core.limit
        );
        if core.remaining < LOW_RATE_LIMIT {
            tracing::warn!(
                remaining = core.remaining,
                reset_in_secs = reset_in,
                "GitHub API rate limit is low: {} requests remaining, resets in {reset_in}s",
                core.remaining
            );
        }
        Ok(())
    }

    fn list_repositories(&self, owner: Option<&str>) -> Result<Vec<RepoName>, RemoteError> {
        let path = match owner {
            Some(org) => {
                tracing::info!(organization = org, "fetching repositories for organization {org}");
                format!("/orgs/{}/repos", urlencoding::encode(org))
            }
            None => {
                tracing::info!("fetching repositories for the authenticated user");
                "/user/repos".to_string()
            }
        };
        let repos: Vec<WireRepo> = self.paginate(&path, &[])?;
        Ok(repos
            .into_iter()
            .map(|r| RepoName::from(r.full_name))
            .collect())
    }

    fn list_milestones(&self, repo: &RepoName) -> Result<Vec<RemoteMilestone>, RemoteError> {
        let wire: Vec<WireMilestone> =
            self.paginate(&format!("/repos/{repo}/milestones"), &[("state", "all")])?;
        Ok(wire.into_iter().map(RemoteMilestone::from).collect())
    }

    fn list_labels(&self, repo: &RepoName) -> Result<Vec<RemoteLabel>, RemoteError> {
        let wire: Vec<WireLabel> = self.paginate(&format!("/repos/{repo}/labels"), &[])?;
        Ok(wire.into_iter().map(RemoteLabel::from).collect())
    }

    fn create_milestone(&self, repo: &RepoName, spec: &MilestoneSpec) -> Result<(), RemoteError> {
        self.send(
            "POST",
            &format!("/repos/{repo}/milestones"),
            &MilestonePayload::from(spec),
        )
    }

    fn update_milestone(
        &self,
        repo: &RepoName,
        number: u64,
        spec: &MilestoneSpec,
    ) -> Result<(), RemoteError> {
        self.send(
            "PATCH",
            &format!("/repos/{repo}/milestones/{number}"),
            &MilestonePayload::from(spec),
        )
    }

    fn delete_milestone(&self, repo: &RepoName, number: u64) -> Result<(), RemoteError> {
        self.delete(&format!("/repos/{repo}/milestones/{number}"))
    }

    fn create_label(&self, repo: &RepoName, spec: &LabelSpec) -> Result<(), RemoteError> {
        self.send(
            "POST",
            &format!("/repos/{repo}/labels"),
            &CreateLabelPayload::from(spec),
        )
    }

    fn update_label(
        &self,
        repo: &RepoName,
        current_name: &str,
        spec: &LabelSpec,
    ) -> Result<(), RemoteError> {
        self.send(
            "PATCH",
            &format!("/repos/{repo}/labels/{}", urlencoding::encode(current_name)),
            &UpdateLabelPayload::from(spec),
        )
    }

    fn delete_label(&self, repo: &RepoName, name: &str) -> Result<(), RemoteError> {
        self.delete(&format!("/repos/{repo}/labels/{}", urlencoding::encode(name)))
    }
}

fn map_error(err: ureq::Error, resource: &str) -> RemoteError {
    match err {
        ureq::Error::Status(status, response) => {
            let body = response.into_string().unwrap_or_default();
            status_error(status, &body, resource)
        }
        ureq::Error::Transport(transport) => RemoteError::Transport(transport.to_string()),
    }
}

fn decode<T: DeserializeOwned>(response: ureq::Response, resource: &str) -> Result<T, RemoteError> {
    response
        .into_json()
        .map_err(|e| RemoteError::Decode(format!("{resource}: {e}")))
}
