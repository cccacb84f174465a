//! Subcommands and the arguments they share.

pub mod apply;
pub mod plan;
pub mod validate;

use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use anyhow::{bail, Context, Result};
use clap::Args;

use ghconf_core::{config, DesiredState};
use ghconf_github::{GitHubClient, DEFAULT_API_URL};
use ghconf_sync::{RunOptions, RunOutcome, RunReport};

pub const EXIT_FATAL: u8 = 1;
pub const EXIT_PARTIAL: u8 = 2;
pub const EXIT_INTERRUPTED: u8 = 130;

/// Arguments for every subcommand that talks to GitHub.
#[derive(Args, Debug)]
pub struct RemoteArgs {
    /// Path to the YAML configuration file.
    #[arg(short, long, value_name = "FILE")]
    pub config: PathBuf,

    /// Organization owning the repositories (defaults to the token's user).
    #[arg(long)]
    pub organization: Option<String>,

    /// Remove milestones and labels not defined in the configuration.
    #[arg(long)]
    pub sync: bool,

    /// Remove only labels not defined in the configuration.
    #[arg(long)]
    pub sync_labels: bool,

    /// Remove only milestones not defined in the configuration.
    #[arg(long)]
    pub sync_milestones: bool,

    /// GitHub API root, for GitHub Enterprise.
    #[arg(long, env = "GITHUB_API_URL", default_value = DEFAULT_API_URL)]
    pub api_url: String,

    /// GitHub personal access token (or GITHUB_TOKEN, also read from .env).
    #[arg(long, env = "GITHUB_TOKEN", hide_env_values = true)]
    pub token: Option<String>,
}

impl RemoteArgs {
    pub fn load(&self) -> Result<DesiredState> {
        config::load(&self.config).context("configuration rejected")
    }

    pub fn client(&self) -> Result<GitHubClient> {
        let Some(token) = self.token.as_deref().filter(|t| !t.trim().is_empty()) else {
            bail!("no GitHub token: pass --token or set GITHUB_TOKEN (environment or .env)");
        };
        Ok(GitHubClient::new(token.trim()).with_base_url(&self.api_url))
    }

    pub fn options(&self, dry_run: bool) -> RunOptions {
        RunOptions {
            dry_run,
            sync_milestones: self.sync || self.sync_milestones,
            sync_labels: self.sync || self.sync_labels,
            organization: self.organization.clone(),
        }
    }

    /// Log the effective settings of this run.
    pub fn log_settings(&self, options: &RunOptions) {
        let config = self.config.display();
        tracing::info!(%config, "configuration file: {config}");
        match &options.organization {
            Some(org) => tracing::info!(organization = %org, "organization: {org}"),
            None => tracing::info!("organization: none, using the authenticated user's repositories"),
        }
        tracing::info!(dry_run = options.dry_run, "dry run: {}", options.dry_run);
        let pruned = match (options.sync_milestones, options.sync_labels) {
            (true, true) => "milestones and labels",
            (true, false) => "milestones",
            (false, true) => "labels",
            (false, false) => "",
        };
        if !pruned.is_empty() {
            tracing::info!("sync mode: removing {pruned} not defined in the configuration");
        }
        tracing::debug!(api_url = %self.api_url, "GitHub API root");
    }
}

/// Set `cancel` on the first Ctrl-C; a second one exits immediately.
pub fn watch_interrupt(cancel: Arc<AtomicBool>) {
    let installed = ctrlc::set_handler(move || {
        if cancel.swap(true, Ordering::SeqCst) {
            std::process::exit(i32::from(EXIT_INTERRUPTED));
        }
        eprintln!("interrupted: finishing the current repository (Ctrl-C again to abort)");
    });
    if let Err(err) = installed {
        tracing::warn!(error = %err, "could not install Ctrl-C handler");
    }
}

pub fn exit_code(report: &RunReport) -> ExitCode {
    if report.cancelled {
        return ExitCode::from(EXIT_INTERRUPTED);
    }
    match report.statistics.outcome() {
        RunOutcome::Clean => ExitCode::SUCCESS,
        RunOutcome::PartialFailure => ExitCode::from(EXIT_PARTIAL),
    }
}
