//! Paw Haven Core - Shared types and donation analytics.
//!
//! This crate provides the pieces shared by every Paw Haven component:
//! - `admin` - Back-office JSON API for donation reporting
//! - `cli` - Command-line tools for operators
//!
//! # Architecture
//!
//! The core crate contains only types and pure functions - no I/O, no
//! database access, no HTTP clients. Donation records are fetched by the
//! callers and handed in as plain slices.
//!
//! # Modules
//!
//! - [`types`] - Newtype wrappers for IDs, amounts, statuses and donations
//! - [`analytics`] - Summary statistics and chart series over donations

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod analytics;
pub mod types;

pub use analytics::{
    AnalyticsError, ChartPoint, DonationStats, Granularity, build_chart_series, compute_stats,
};
pub use types::*;
