//! `ghconf plan` — show per-repository plans without applying them.

use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Args;
use ghconf_sync::pipeline::{self, RepositoryFailure};
use ghconf_sync::plan::PlanItem;
use ghconf_sync::{ItemKind, Plan, RepositoryPlan};

use super::{RemoteArgs, EXIT_PARTIAL};

/// Arguments for `ghconf plan`.
#[derive(Args, Debug)]
pub struct PlanArgs {
    #[command(flatten)]
    pub remote: RemoteArgs,
}

impl PlanArgs {
    pub fn run(self) -> Result<ExitCode> {
        let desired = self.remote.load()?;
        let client = self.remote.client()?;
        let options = self.remote.options(true);
        self.remote.log_settings(&options);

        let plans = pipeline::plan(&client, &desired, &options).context("planning aborted")?;

        let mut needs_attention = false;
        let mut pending = 0;
        for entry in &plans {
            match entry {
                Ok(plan) => {
                    needs_attention |= has_conflicts(plan);
                    pending += pending_operations(plan);
                    print!("{}", render(plan));
                }
                Err(failure) => {
                    needs_attention = true;
                    print!("{}", render_failure(failure));
                }
            }
        }
        println!(
            "{pending} pending operations across {} repositories",
            plans.len()
        );

        Ok(if needs_attention {
            ExitCode::from(EXIT_PARTIAL)
        } else {
            ExitCode::SUCCESS
        })
    }
}

fn has_conflicts(plan: &RepositoryPlan) -> bool {
    plan.milestones.as_ref().is_some_and(|p| !p.conflicts.is_empty())
        || plan.labels.as_ref().is_some_and(|p| !p.conflicts.is_empty())
}

fn pending_operations(plan: &RepositoryPlan) -> usize {
    plan.milestones.as_ref().map_or(0, Plan::pending)
        + plan.labels.as_ref().map_or(0, Plan::pending)
}

// ---------------------------------------------------------------------------
// Rendering
// ---------------------------------------------------------------------------

fn render(plan: &RepositoryPlan) -> String {
    let mut out = format!("{}\n", plan.repository);
    render_kind(&mut out, ItemKind::Milestone, plan.milestones.as_ref());
    render_kind(&mut out, ItemKind::Label, plan.labels.as_ref());
    out
}

fn render_failure(failure: &RepositoryFailure) -> String {
    format!(
        "{}\n  ✗ could not read remote state: {}\n",
        failure.repository, failure.error
    )
}

fn render_kind<S, R>(out: &mut String, kind: ItemKind, plan: Option<&Plan<S, R>>)
where
    S: PlanItem,
    R: PlanItem,
{
    let Some(plan) = plan else {
        out.push_str(&format!("  {kind}s: not managed\n"));
        return;
    };
    out.push_str(&format!(
        "  {kind}s: {} to create, {} to update, {} to delete, {} unchanged\n",
        plan.to_create.len(),
        plan.to_update.len(),
        plan.to_delete.len(),
        plan.unchanged
    ));
    for conflict in &plan.conflicts {
        out.push_str(&format!(
            "    ! {kind} '{}' is ambiguous: matches {}\n",
            conflict.key,
            quoted(&conflict.candidates)
        ));
    }
    for spec in &plan.to_create {
        out.push_str(&format!("    + {kind} '{}'\n", spec.key()));
    }
    for (spec, current) in &plan.to_update {
        if spec.key() == current.key() {
            out.push_str(&format!("    ~ {kind} '{}'\n", spec.key()));
        } else {
            out.push_str(&format!(
                "    ~ {kind} '{}' (casing changed from '{}')\n",
                spec.key(),
                current.key()
            ));
        }
    }
    for current in &plan.to_delete {
        out.push_str(&format!("    - {kind} '{}'\n", current.key()));
    }
}

fn quoted(names: &[String]) -> String {
    names
        .iter()
        .map(|n| format!("'{n}'"))
        .collect::<Vec<_>>()
        .join(", ")
}
