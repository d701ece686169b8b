//! Chart bucket granularity.

use serde::{Deserialize, Serialize};

use super::AnalyticsError;

/// Width of one chart bucket.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Granularity {
    /// Last 7 calendar days, labelled by short weekday name.
    Day,
    /// Last 8 Monday-based weeks, labelled by the week's first day.
    #[default]
    Week,
    /// Last 6 calendar months, labelled by short month name.
    Month,
    /// Last 5 calendar years, labelled by the 4-digit year.
    Year,
}

impl Granularity {
    /// Every granularity, finest first.
    pub const ALL: [Self; 4] = [Self::Day, Self::Week, Self::Month, Self::Year];

    /// Number of buckets in the chart window.
    #[must_use]
    pub const fn bucket_count(&self) -> usize {
        match self {
            Self::Day => 7,
            Self::Week => 8,
            Self::Month => 6,
            Self::Year => 5,
        }
    }

    /// Lowercase name used in query strings and JSON.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Day => "day",
            Self::Week => "week",
            Self::Month => "month",
            Self::Year => "year",
        }
    }
}

impl std::fmt::Display for Granularity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Granularity {
    type Err = AnalyticsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "day" => Ok(Self::Day),
            "week" => Ok(Self::Week),
            "month" => Ok(Self::Month),
            "year" => Ok(Self::Year),
            _ => Err(AnalyticsError::InvalidGranularity(s.to_owned())),
        }
    }
}
