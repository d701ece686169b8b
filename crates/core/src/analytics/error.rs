//! Analytics errors.

use thiserror::Error;

/// Errors raised at the analytics boundary.
///
/// The computations themselves are total; only parsing caller input can fail.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AnalyticsError {
    /// The requested chart granularity is not one of day, week, month, year.
    #[error("invalid granularity '{0}': expected one of day, week, month, year")]
    InvalidGranularity(String),
}
