//! Paw Haven CLI - Donation reports from the command line.
//!
//! # Usage
//!
//! ```bash
//! # Headline statistics from the live backend
//! paw-cli donations stats --utc-offset +02:00
//!
//! # Monthly chart from an exported JSON file, as of a fixed instant
//! paw-cli donations chart -g month --file donations.json --now 2026-10-14T12:00:00+02:00
//! ```
//!
//! # Commands
//!
//! - `donations stats` - Totals for all time, today and this week
//! - `donations chart` - Bucketed chart series

#![cfg_attr(not(test), forbid(unsafe_code))]

use std::path::PathBuf;

use clap::{Parser, Subcommand};

mod commands;

use commands::donations::ReportOptions;

#[derive(Parser)]
#[command(name = "paw-cli")]
#[command(author, version, about = "Paw Haven CLI tools")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Donation analytics reports
    Donations {
        #[command(subcommand)]
        report: DonationsReport,
    },
}

#[derive(Subcommand)]
enum DonationsReport {
    /// Print donation statistics as JSON
    Stats {
        #[command(flatten)]
        source: SourceArgs,
    },
    /// Print a chart series as JSON
    Chart {
        /// Bucket size (`day`, `week`, `month`, `year`)
        #[arg(short, long, default_value = "week")]
        granularity: String,

        #[command(flatten)]
        source: SourceArgs,
    },
}

#[derive(clap::Args)]
struct SourceArgs {
    /// Read donation rows from a JSON file instead of the backend
    #[arg(short, long)]
    file: Option<PathBuf>,

    /// Report as of this RFC 3339 instant instead of the current time
    #[arg(long)]
    now: Option<String>,

    /// Reporting timezone offset (e.g. +02:00)
    #[arg(long, env = "ANALYTICS_UTC_OFFSET")]
    utc_offset: Option<String>,
}

impl From<SourceArgs> for ReportOptions {
    fn from(args: SourceArgs) -> Self {
        Self {
            file: args.file,
            now: args.now,
            utc_offset: args.utc_offset,
        }
    }
}

#[tokio::main]
async fn main() {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let result: Result<(), Box<dyn std::error::Error>> = run(cli).await;

    if let Err(e) = result {
        tracing::error!("Command failed: {e}");
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    match cli.command {
        Commands::Donations { report } => match report {
            DonationsReport::Stats { source } => {
                commands::donations::stats(&source.into()).await?;
            }
            DonationsReport::Chart {
                granularity,
                source,
            } => {
                commands::donations::chart(&source.into(), &granularity).await?;
            }
        },
    }
    Ok(())
}
