//! `ghconf apply` — reconcile and apply the configuration.

use std::process::ExitCode;
use std::sync::atomic::AtomicBool;
use std::sync::Arc;
use std::time::Instant;

use anyhow::{Context, Result};
use clap::Args;
use ghconf_sync::pipeline;

use super::{exit_code, watch_interrupt, RemoteArgs};
use crate::summary;

/// Arguments for `ghconf apply`.
#[derive(Args, Debug)]
pub struct ApplyArgs {
    #[command(flatten)]
    pub remote: RemoteArgs,

    /// Log what would change without modifying any repository.
    #[arg(long)]
    pub dry_run: bool,

    /// Print summary statistics at the end.
    #[arg(long)]
    pub summary: bool,
}

impl ApplyArgs {
    pub fn run(self) -> Result<ExitCode> {
        let started = Instant::now();
        let desired = self.remote.load()?;
        let client = self.remote.client()?;
        let options = self.remote.options(self.dry_run);
        self.remote.log_settings(&options);

        let cancel = Arc::new(AtomicBool::new(false));
        watch_interrupt(Arc::clone(&cancel));

        let report = pipeline::run_with_cancel(&client, &desired, &options, &cancel)
            .context("run aborted")?;
        let elapsed = started.elapsed();

        if self.summary {
            print!(
                "{}",
                summary::render(&report.statistics, elapsed, options.dry_run)
            );
        }

        let stats = &report.statistics;
        if stats.failed() > 0 {
            tracing::warn!(
                failed = stats.failed(),
                "completed with {} failed operations in {elapsed:.1?}",
                stats.failed()
            );
        } else {
            tracing::info!("completed in {elapsed:.1?}");
        }
        Ok(exit_code(&report))
    }
}
