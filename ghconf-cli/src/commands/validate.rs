//! `ghconf validate` — check a configuration file offline.

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Args;
use ghconf_core::config;

/// Arguments for `ghconf validate`.
#[derive(Args, Debug)]
pub struct ValidateArgs {
    /// Path to the YAML configuration file.
    #[arg(short, long, value_name = "FILE")]
    pub config: PathBuf,
}

impl ValidateArgs {
    pub fn run(self) -> Result<ExitCode> {
        let desired = config::load(&self.config).context("configuration rejected")?;

        let targets = if desired.repositories.is_empty() {
            "all accessible repositories".to_string()
        } else {
            format!("{} repositories", desired.repositories.len())
        };
        println!(
            "✓ {} is valid: {} milestones, {} labels, {targets}",
            self.config.display(),
            desired.milestone_specs().len(),
            desired.label_specs().len(),
        );
        Ok(ExitCode::SUCCESS)
    }
}
