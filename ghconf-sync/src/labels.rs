//! Label reconciliation.
//!
//! Label names are unique per repository under case-insensitive comparison,
//! so matching is case-insensitive. A remote `Bug` matched by a desired `bug`
//! is the same label: it is updated when color or description differ (and
//! then takes the desired casing), otherwise left unchanged. It is never
//! deleted and recreated.

use std::collections::{HashMap, HashSet};

use ghconf_core::{normalize_color, LabelSpec, RemoteLabel};

use crate::plan::{Conflict, LabelPlan};

/// Diff desired labels against a remote snapshot.
///
/// A desired label that matches several remote labels is recorded as a
/// [`Conflict`] and left alone; those remote labels are never pruned.
pub fn reconcile(desired: &[LabelSpec], remote: &[RemoteLabel], prune: bool) -> LabelPlan {
    let mut by_name: HashMap<String, Vec<&RemoteLabel>> = HashMap::new();
    for label in remote {
        by_name.entry(fold(&label.name)).or_default().push(label);
    }

    let mut plan = LabelPlan::default();
    for spec in desired {
        match by_name.get(&fold(&spec.name)).map(Vec::as_slice) {
            None | Some([]) => plan.to_create.push(spec.clone()),
            Some([existing]) => {
                if differs(spec, existing) {
                    plan.to_update.push((spec.clone(), (*existing).clone()));
                } else {
                    plan.unchanged += 1;
                }
            }
            Some(matches) => plan.conflicts.push(Conflict {
                key: spec.name.clone(),
                candidates: matches.iter().map(|l| l.name.clone()).collect(),
            }),
        }
    }

    if prune {
        let wanted: HashSet<String> = desired.iter().map(|l| fold(&l.name)).collect();
        plan.to_delete = remote
            .iter()
            .filter(|l| !wanted.contains(&fold(&l.name)))
            .cloned()
            .collect();
    }

    plan
}

fn fold(name: &str) -> String {
    name.to_lowercase()
}

/// Only color and description are compared; name casing alone is not a
/// difference.
fn differs(spec: &LabelSpec, remote: &RemoteLabel) -> bool {
    normalize_color(&spec.color) != normalize_color(&remote.color)
        || spec.description != remote.description
}
