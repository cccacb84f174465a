//! End-of-run summary printed by `ghconf apply --summary`.

use std::time::Duration;

use ghconf_sync::{KindStats, RunStatistics};

const RULE: &str = "============================================================";

pub fn render(stats: &RunStatistics, elapsed: Duration, dry_run: bool) -> String {
    let mut out = String::new();
    out.push_str(RULE);
    out.push('\n');
    if dry_run {
        out.push_str("SUMMARY (dry run, nothing was changed)\n");
    } else {
        out.push_str("SUMMARY\n");
    }
    out.push_str(&format!("Execution time:        {elapsed:.2?}\n"));
    out.push_str(&format!(
        "Repositories:          {}\n",
        stats.repositories.len()
    ));
    if stats.repository_failures > 0 {
        out.push_str(&format!(
            "Unreadable:            {}\n",
            stats.repository_failures
        ));
    }
    out.push_str(&format!("Successful operations: {}\n", stats.succeeded()));
    out.push_str(&format!("Failed operations:     {}\n", stats.failed()));
    out.push_str(&format!(
        "Total operations:      {}\n",
        stats.succeeded() + stats.failed()
    ));
    out.push_str(&"-".repeat(30));
    out.push('\n');
    kind_block(&mut out, "Milestones", &stats.milestones);
    kind_block(&mut out, "Labels", &stats.labels);
    out.push_str(RULE);
    out.push('\n');
    out
}

fn kind_block(out: &mut String, title: &str, kind: &KindStats) {
    out.push_str(&format!("{title}:\n"));
    out.push_str(&format!("  Created:   {}\n", kind.created));
    out.push_str(&format!("  Updated:   {}\n", kind.updated));
    out.push_str(&format!("  Deleted:   {}\n", kind.deleted));
    out.push_str(&format!("  Unchanged: {}\n", kind.unchanged));
    out.push_str(&format!("  Failed:    {}\n", kind.failed));
}

#[cfg(test)]
mod tests {
    use super::*;
    use ghconf_core::RepoName;

    #[test]
    fn summary_lists_totals_and_per_kind_counts() {
        let stats = RunStatistics {
            milestones: KindStats {
                created: 2,
                unchanged: 1,
                ..KindStats::default()
            },
            labels: KindStats {
                updated: 1,
                deleted: 3,
                failed: 1,
                ..KindStats::default()
            },
            repositories: vec![RepoName::from("acme/api"), RepoName::from("acme/web")],
            repository_failures: 0,
        };

        let text = render(&stats, Duration::from_millis(1500), false);
        assert!(text.contains("Repositories:          2"));
        assert!(text.contains("Successful operations: 6"));
        assert!(text.contains("Failed operations:     1"));
        assert!(text.contains("Total operations:      7"));
        assert!(text.contains("Milestones:\n  Created:   2"));
        assert!(text.contains("Labels:\n  Created:   0\n  Updated:   1\n  Deleted:   3"));
        assert!(!text.contains("Unreadable"));
        assert!(!text.contains("dry run"));
    }

    #[test]
    fn dry_run_and_repository_failures_are_called_out() {
        let stats = RunStatistics {
            repository_failures: 1,
            ..RunStatistics::default()
        };
        let text = render(&stats, Duration::ZERO, true);
        assert!(text.contains("dry run"));
        assert!(text.contains("Unreadable:            1"));
        assert!(text.contains("Failed operations:     1"));
    }
}
