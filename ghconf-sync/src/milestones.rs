//! Milestone reconciliation.

use std::collections::{HashMap, HashSet};

use ghconf_core::{MilestoneSpec, RemoteMilestone};

use crate::plan::MilestonePlan;

/// Diff desired milestones against a remote snapshot.
///
/// Milestones match on exact title. Only `description`, `state` and `due_on`
/// are compared; any difference re-sends the whole spec. Remote milestones
/// without a desired counterpart are deleted only when `prune` is set.
pub fn reconcile(desired: &[MilestoneSpec], remote: &[RemoteMilestone], prune: bool) -> MilestonePlan {
    let by_title: HashMap<&str, &RemoteMilestone> =
        remote.iter().map(|m| (m.title.as_str(), m)).collect();

    let mut plan = MilestonePlan::default();
    for spec in desired {
        match by_title.get(spec.title.as_str()) {
            None => plan.to_create.push(spec.clone()),
            Some(existing) if differs(spec, existing) => {
                plan.to_update.push((spec.clone(), (*existing).clone()));
            }
            Some(_) => plan.unchanged += 1,
        }
    }

    if prune {
        let wanted: HashSet<&str> = desired.iter().map(|m| m.title.as_str()).collect();
        plan.to_delete = remote
            .iter()
            .filter(|m| !wanted.contains(m.title.as_str()))
            .cloned()
            .collect();
    }

    plan
}

fn differs(spec: &MilestoneSpec, remote: &RemoteMilestone) -> bool {
    spec.description != remote.description
        || spec.state != remote.state
        || spec.due_on != remote.due_on
}
