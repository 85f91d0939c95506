//! `irecon`: reconcile two invoice ledgers from the command line.

mod exit_codes;
mod export;
mod recon;

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use exit_codes::{EXIT_RECON_INVALID_CONFIG, EXIT_RECON_MISMATCH, EXIT_RECON_RUNTIME, EXIT_SUCCESS, EXIT_USAGE};
use recon::LabelArg;

#[derive(Parser)]
#[command(name = "irecon")]
#[command(about = "Reconcile two invoice ledgers: exact key pass, then fuzzy scoring")]
#[command(long_version = long_version())]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run reconciliation from a TOML config file
    #[command(after_help = "\
Examples:
  irecon run books-vs-portal.recon.toml
  irecon run books-vs-portal.recon.toml --json
  irecon run books-vs-portal.recon.toml --output result.json --csv result.csv
  irecon run books-vs-portal.recon.toml --labels legacy

Logging: set IRECON_LOG (e.g. IRECON_LOG=debug) to see per-pass counts.")]
    Run {
        /// Path to the .recon.toml config file
        config: PathBuf,

        /// Output JSON to stdout instead of only the human summary
        #[arg(long)]
        json: bool,

        /// Write JSON output to file (overrides [output].json)
        #[arg(long)]
        output: Option<PathBuf>,

        /// Write a flat CSV report to file (overrides [output].csv)
        #[arg(long)]
        csv: Option<PathBuf>,

        /// Remark label style for reports (overrides [output].labels)
        #[arg(long, value_enum)]
        labels: Option<LabelArg>,
    },

    /// Validate a recon config without running
    #[command(after_help = "\
Examples:
  irecon validate books-vs-portal.recon.toml")]
    Validate {
        /// Path to the .recon.toml config file
        config: PathBuf,
    },
}

fn long_version() -> &'static str {
    concat!(
        env!("CARGO_PKG_VERSION"),
        " (", env!("GIT_COMMIT_HASH"), ")",
        "\nengine:  invoice-recon ", env!("CARGO_PKG_VERSION"),
    )
}

fn init_logging() {
    let filter = EnvFilter::try_from_env("IRECON_LOG").unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging();

    let result = match cli.command {
        Commands::Run { config, json, output, csv, labels } => {
            recon::cmd_recon_run(config, json, output, csv, labels)
        }
        Commands::Validate { config } => recon::cmd_recon_validate(config),
    };

    match result {
        Ok(()) => ExitCode::from(EXIT_SUCCESS),
        Err(CliError { code, message, hint }) => {
            if !message.is_empty() {
                eprintln!("error: {}", message);
            }
            if let Some(hint) = hint {
                eprintln!("hint:  {}", hint);
            }
            ExitCode::from(code)
        }
    }
}

#[derive(Debug)]
pub struct CliError {
    pub code: u8,
    pub message: String,
    pub hint: Option<String>,
}

impl CliError {
    pub fn usage(msg: impl Into<String>) -> Self {
        Self { code: EXIT_USAGE, message: msg.into(), hint: None }
    }

    pub fn config(msg: impl Into<String>) -> Self {
        Self { code: EXIT_RECON_INVALID_CONFIG, message: msg.into(), hint: None }
    }

    pub fn runtime(msg: impl Into<String>) -> Self {
        Self { code: EXIT_RECON_RUNTIME, message: msg.into(), hint: None }
    }

    pub fn mismatch(msg: impl Into<String>) -> Self {
        Self { code: EXIT_RECON_MISMATCH, message: msg.into(), hint: None }
    }

    /// Add a hint to an existing error.
    pub fn with_hint(mut self, hint: impl Into<String>) -> Self {
        self.hint = Some(hint.into());
        self
    }
}
