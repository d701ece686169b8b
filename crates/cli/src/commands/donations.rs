//! Donation report commands.
//!
//! # Usage
//!
//! ```bash
//! paw-cli donations stats [--file PATH] [--now RFC3339] [--utc-offset +HH:MM]
//! paw-cli donations chart -g month [--file PATH] [--now RFC3339] [--utc-offset +HH:MM]
//! ```
//!
//! # Environment Variables
//!
//! - `SUPABASE_URL` - Backend project URL (live mode only)
//! - `SUPABASE_SERVICE_ROLE_KEY` - Backend service key (live mode only)
//! - `ANALYTICS_UTC_OFFSET` - Default reporting offset

use std::path::{Path, PathBuf};

use chrono::{DateTime, FixedOffset, Offset, Utc};
use serde::Serialize;
use thiserror::Error;

use paw_haven_admin::config::{ConfigError, SupabaseConfig, parse_utc_offset};
use paw_haven_admin::supabase::{DonationRow, SupabaseClient, SupabaseError};
use paw_haven_core::{
    AnalyticsError, DonationRecord, Granularity, build_chart_series, compute_stats,
};

/// Errors that can occur while producing a report.
#[derive(Debug, Error)]
pub enum ReportError {
    /// Donation file could not be read.
    #[error("Failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    /// Donation JSON could not be decoded.
    #[error("Invalid donation JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// `--now` is not an RFC 3339 timestamp.
    #[error("Invalid --now timestamp '{0}': expected RFC 3339")]
    InvalidNow(String),

    /// `--utc-offset` is not a valid offset.
    #[error("Invalid --utc-offset: {0}")]
    InvalidOffset(String),

    /// Unknown granularity.
    #[error(transparent)]
    Analytics(#[from] AnalyticsError),

    /// Backend settings missing or invalid.
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Backend request failed.
    #[error("Backend error: {0}")]
    Backend(#[from] SupabaseError),
}

/// Where donations come from and which instant to report against.
#[derive(Debug, Clone, Default)]
pub struct ReportOptions {
    pub file: Option<PathBuf>,
    pub now: Option<String>,
    pub utc_offset: Option<String>,
}

/// Print donation statistics.
///
/// # Errors
///
/// Returns an error if donations cannot be loaded or the options are invalid.
pub async fn stats(options: &ReportOptions) -> Result<(), ReportError> {
    let now = resolve_now(options.now.as_deref(), options.utc_offset.as_deref())?;
    let donations = load_donations(options.file.as_deref()).await?;

    tracing::info!(count = donations.len(), %now, "Computing donation stats");
    print_json(&compute_stats(&donations, &now))
}

/// Print a chart series.
///
/// # Errors
///
/// Returns an error for an unknown granularity, or if donations cannot be
/// loaded.
pub async fn chart(options: &ReportOptions, granularity: &str) -> Result<(), ReportError> {
    let granularity: Granularity = granularity.parse()?;
    let now = resolve_now(options.now.as_deref(), options.utc_offset.as_deref())?;
    let donations = load_donations(options.file.as_deref()).await?;

    tracing::info!(count = donations.len(), %now, %granularity, "Building chart series");
    print_json(&build_chart_series(&donations, &now, granularity))
}

/// Work out the reporting instant.
///
/// An explicit offset wins over the one carried by `--now`; without either,
/// reports are in UTC.
fn resolve_now(
    now: Option<&str>,
    utc_offset: Option<&str>,
) -> Result<DateTime<FixedOffset>, ReportError> {
    let offset = utc_offset
        .map(parse_utc_offset)
        .transpose()
        .map_err(ReportError::InvalidOffset)?;

    let instant = match now {
        Some(raw) => DateTime::parse_from_rfc3339(raw.trim())
            .map_err(|_| ReportError::InvalidNow(raw.to_string()))?,
        None => Utc::now().with_timezone(&offset.unwrap_or_else(|| Utc.fix())),
    };

    Ok(offset.map_or(instant, |offset| instant.with_timezone(&offset)))
}

/// Load completed donations from a file, or from the backend when no file
/// is given.
async fn load_donations(file: Option<&Path>) -> Result<Vec<DonationRecord>, ReportError> {
    match file {
        Some(path) => {
            let raw = tokio::fs::read_to_string(path)
                .await
                .map_err(|source| ReportError::Read {
                    path: path.to_path_buf(),
                    source,
                })?;
            records_from_json(&raw)
        }
        None => {
            let config = SupabaseConfig::from_env()?;
            let client = SupabaseClient::new(&config)?;
            Ok(client.completed_donations(None).await?)
        }
    }
}

/// Decode exported donation rows.
///
/// Exports made before statuses were tracked carry no `status`; those rows
/// count as completed.
fn records_from_json(raw: &str) -> Result<Vec<DonationRecord>, ReportError> {
    let rows: Vec<DonationRow> = serde_json::from_str(raw)?;
    let total = rows.len();

    let records: Vec<DonationRecord> = rows
        .into_iter()
        .filter(|row| row.status.is_none() || row.is_completed())
        .map(DonationRecord::from)
        .collect();

    tracing::debug!(total, kept = records.len(), "Loaded donation file");
    Ok(records)
}

#[allow(clippy::print_stdout)]
fn print_json<T: Serialize>(value: &T) -> Result<(), ReportError> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
