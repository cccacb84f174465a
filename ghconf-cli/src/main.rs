//! ghconf — keep GitHub milestones and labels in line with a YAML file.
//!
//! # Usage
//!
//! ```text
//! ghconf apply --config <file> [--organization <org>] [--dry-run] [--sync]
//!              [--sync-labels] [--sync-milestones] [--summary]
//! ghconf plan --config <file> [--organization <org>] [--sync] ...
//! ghconf validate --config <file>
//! ```
//!
//! Exit status: `0` clean, `2` finished with failures, `1` aborted,
//! `130` interrupted.

mod commands;
mod logging;
mod summary;

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};

use commands::{apply::ApplyArgs, plan::PlanArgs, validate::ValidateArgs, EXIT_FATAL};

// ---------------------------------------------------------------------------
// CLI entry point
// ---------------------------------------------------------------------------

#[derive(Parser, Debug)]
#[command(
    name = "ghconf",
    version,
    about = "Reconcile GitHub milestones and labels against a YAML configuration",
    long_about = None,
)]
struct Cli {
    /// Enable debug logging (RUST_LOG takes precedence).
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Also append log output to this file.
    #[arg(long, global = true, value_name = "PATH")]
    log_file: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Apply the configuration to every target repository.
    Apply(ApplyArgs),

    /// Show what `apply` would change in each repository.
    Plan(PlanArgs),

    /// Load and validate the configuration without contacting GitHub.
    Validate(ValidateArgs),
}

// ---------------------------------------------------------------------------
// Main
// ---------------------------------------------------------------------------

fn main() -> ExitCode {
    // A missing .env is fine; GITHUB_TOKEN may come from the environment.
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();
    if let Err(err) = logging::init(cli.verbose, cli.log_file.as_deref()) {
        eprintln!("error: {err:#}");
        return ExitCode::from(EXIT_FATAL);
    }

    let result = match cli.command {
        Commands::Apply(args) => args.run(),
        Commands::Plan(args) => args.run(),
        Commands::Validate(args) => args.run(),
    };

    match result {
        Ok(code) => code,
        Err(err) => {
            eprintln!("error: {err:#}");
            ExitCode::from(EXIT_FATAL)
        }
    }
}
