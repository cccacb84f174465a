//! In-memory `RemoteState` for pipeline tests.
//!
//! Mutations really change the stored snapshot so a second run observes the
//! result of the first. Failures are injected per item key or per repository.

#![allow(dead_code)]

use std::cell::RefCell;
use std::collections::{BTreeMap, HashSet};

use chrono::NaiveDate;
use ghconf_core::{
    LabelSpec, MilestoneSpec, MilestoneState, RemoteLabel, RemoteMilestone, RepoName,
};
use ghconf_sync::{RemoteError, RemoteState};

#[derive(Debug, Default, Clone)]
pub struct RepoSnapshot {
    pub milestones: Vec<RemoteMilestone>,
    pub labels: Vec<RemoteLabel>,
}

#[derive(Default)]
pub struct FakeRemote {
    pub repos: RefCell<BTreeMap<RepoName, RepoSnapshot>>,
    /// Every mutation call, as `"<verb> <repo> <key>"`.
    pub calls: RefCell<Vec<String>>,
    /// Owner passed to the last `list_repositories` call.
    pub listed_owner: RefCell<Option<Option<String>>>,
    /// Mutations on these item keys are rejected with 422.
    pub reject_keys: HashSet<String>,
    /// Reading these repositories fails with 403.
    pub forbidden: HashSet<RepoName>,
    pub reject_token: bool,
    pub listing_fails: bool,
    pub rate_limit_probe_fails: bool,
}

impl FakeRemote {
    pub fn with_repo(self, repo: &str, snapshot: RepoSnapshot) -> Self {
        self.repos.borrow_mut().insert(RepoName::from(repo), snapshot);
        self
    }

    pub fn snapshot(&self, repo: &str) -> RepoSnapshot {
        self.repos
            .borrow()
            .get(&RepoName::from(repo))
            .cloned()
            .unwrap_or_default()
    }

    pub fn mutation_count(&self) -> usize {
        self.calls.borrow().len()
    }

    fn mutate(&self, verb: &str, repo: &RepoName, key: &str) -> Result<(), RemoteError> {
        self.calls.borrow_mut().push(format!("{verb} {repo} {key}"));
        if self.reject_keys.contains(key) {
            return Err(RemoteError::Rejected {
                status: 422,
                message: "Validation Failed".into(),
            });
        }
        if !self.repos.borrow().contains_key(repo) {
            return Err(RemoteError::NotFound {
                resource: repo.to_string(),
            });
        }
        Ok(())
    }

    fn read(&self, repo: &RepoName) -> Result<RepoSnapshot, RemoteError> {
        if self.forbidden.contains(repo) {
            return Err(RemoteError::Forbidden {
                resource: repo.to_string(),
            });
        }
        self.repos
            .borrow()
            .get(repo)
            .cloned()
            .ok_or_else(|| RemoteError::NotFound {
                resource: repo.to_string(),
            })
    }

    fn with_snapshot<T>(&self, repo: &RepoName, f: impl FnOnce(&mut RepoSnapshot) -> T) -> T {
        let mut repos = self.repos.borrow_mut();
        let snapshot = repos.entry(repo.clone()).or_default();
        f(snapshot)
    }
}

impl RemoteState for FakeRemote {
    fn verify_access(&self) -> Result<(), RemoteError> {
        if self.reject_token {
            Err(RemoteError::AuthenticationFailed)
        } else if self.rate_limit_probe_fails {
            Err(RemoteError::Transport("connection reset".into()))
        } else {
            Ok(())
        }
    }

    fn list_repositories(&self, owner: Option<&str>) -> Result<Vec<RepoName>, RemoteError> {
        *self.listed_owner.borrow_mut() = Some(owner.map(str::to_string));
        if self.listing_fails {
            return Err(RemoteError::NotFound {
                resource: owner.unwrap_or("user").to_string(),
            });
        }
        Ok(self.repos.borrow().keys().cloned().collect())
    }

    fn list_milestones(&self, repo: &RepoName) -> Result<Vec<RemoteMilestone>, RemoteError> {
        Ok(self.read(repo)?.milestones)
    }

    fn list_labels(&self, repo: &RepoName) -> Result<Vec<RemoteLabel>, RemoteError> {
        Ok(self.read(repo)?.labels)
    }

    fn create_milestone(&self, repo: &RepoName, spec: &MilestoneSpec) -> Result<(), RemoteError> {
        self.mutate("create_milestone", repo, &spec.title)?;
        self.with_snapshot(repo, |s| {
            let number = s.milestones.iter().map(|m| m.number).max().unwrap_or(0) + 1;
            s.milestones.push(RemoteMilestone {
                number,
                title: spec.title.clone(),
                description: spec.description.clone(),
                state: spec.state,
                due_on: spec.due_on,
            });
        });
        Ok(())
    }

    fn update_milestone(
        &self,
        repo: &RepoName,
        number: u64,
        spec: &MilestoneSpec,
    ) -> Result<(), RemoteError> {
        self.mutate("update_milestone", repo, &spec.title)?;
        self.with_snapshot(repo, |s| {
            if let Some(m) = s.milestones.iter_mut().find(|m| m.number == number) {
                m.title = spec.title.clone();
                m.description = spec.description.clone();
                m.state = spec.state;
                m.due_on = spec.due_on;
            }
        });
        Ok(())
    }

    fn delete_milestone(&self, repo: &RepoName, number: u64) -> Result<(), RemoteError> {
        let title = self
            .snapshot(repo.as_str())
            .milestones
            .into_iter()
            .find(|m| m.number == number)
            .map(|m| m.title)
            .unwrap_or_default();
        self.mutate("delete_milestone", repo, &title)?;
        self.with_snapshot(repo, |s| s.milestones.retain(|m| m.number != number));
        Ok(())
    }

    fn create_label(&self, repo: &RepoName, spec: &LabelSpec) -> Result<(), RemoteError> {
        self.mutate("create_label", repo, &spec.name)?;
        self.with_snapshot(repo, |s| {
            s.labels.push(RemoteLabel {
                name: spec.name.clone(),
                color: spec.color.clone(),
                description: spec.description.clone(),
            });
        });
        Ok(())
    }

    fn update_label(
        &self,
        repo: &RepoName,
        current_name: &str,
        spec: &LabelSpec,
    ) -> Result<(), RemoteError> {
        self.mutate("update_label", repo, &spec.name)?;
        self.with_snapshot(repo, |s| {
            if let Some(l) = s.labels.iter_mut().find(|l| l.name == current_name) {
                l.name = spec.name.clone();
                l.color = spec.color.clone();
                l.description = spec.description.clone();
            }
        });
        Ok(())
    }

    fn delete_label(&self, repo: &RepoName, name: &str) -> Result<(), RemoteError> {
        self.mutate("delete_label", repo, name)?;
        self.with_snapshot(repo, |s| s.labels.retain(|l| l.name != name));
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Builders
// ---------------------------------------------------------------------------

pub fn milestone(title: &str, due_on: Option<&str>) -> MilestoneSpec {
    MilestoneSpec {
        title: title.to_string(),
        description: String::new(),
        state: MilestoneState::Open,
        due_on: due_on.map(|d| NaiveDate::parse_from_str(d, "%Y-%m-%d").expect("date")),
    }
}

pub fn remote_milestone(number: u64, title: &str) -> RemoteMilestone {
    RemoteMilestone {
        number,
        title: title.to_string(),
        description: String::new(),
        state: MilestoneState::Open,
        due_on: None,
    }
}

pub fn label(name: &str, color: &str) -> LabelSpec {
    LabelSpec {
        name: name.to_string(),
        color: color.to_string(),
        description: String::new(),
    }
}

pub fn remote_label(name: &str, color: &str) -> RemoteLabel {
    RemoteLabel {
        name: name.to_string(),
        color: color.to_string(),
        description: String::new(),
    }
}
