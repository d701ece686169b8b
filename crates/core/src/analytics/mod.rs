//! Donation analytics.
//!
//! Pure functions over a slice of completed donations and a reference
//! instant ("now"). The timezone of `now` defines every day, week, month and
//! year boundary, so callers choose the reporting timezone explicitly and
//! tests can pin both the clock and the zone.
//!
//! - [`compute_stats`] - total, today, this week and average
//! - [`build_chart_series`] - fixed-length, zero-filled chart buckets
//!
//! Neither function filters by payment status: callers pass only donations
//! that are already [`PaymentStatus::Completed`](crate::PaymentStatus).

mod calendar;
mod error;
mod granularity;
mod series;
mod stats;

pub use error::AnalyticsError;
pub use granularity::Granularity;
pub use series::{ChartPoint, build_chart_series};
pub use stats::{DonationStats, compute_stats};
