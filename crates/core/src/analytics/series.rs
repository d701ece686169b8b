//! Chart series over fixed, backward-looking windows.

use chrono::{DateTime, NaiveDate, NaiveDateTime, TimeZone};
use serde::{Deserialize, Serialize};

use super::{Granularity, calendar};
use crate::{Amount, DonationRecord};

/// One bar of the donations chart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChartPoint {
    /// Human-readable bucket label ("Mon", "Oct 12", "Aug", "2026").
    pub period: String,
    /// Sum of donations falling in the bucket.
    pub amount: Amount,
}

/// A chart bucket as a local-calendar date range.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Bucket {
    start: NaiveDate,
    /// Exclusive.
    end: NaiveDate,
}

impl Bucket {
    /// Day buckets match on calendar date; the wider buckets match the
    /// half-open wall-clock range `[start, end)`.
    fn contains(&self, granularity: Granularity, local: NaiveDateTime) -> bool {
        match granularity {
            Granularity::Day => local.date() == self.start,
            Granularity::Week | Granularity::Month | Granularity::Year => {
                calendar::midnight(self.start) <= local && local < calendar::midnight(self.end)
            }
        }
    }

    fn label(&self, granularity: Granularity) -> String {
        let format = match granularity {
            Granularity::Day => "%a",
            Granularity::Week => "%b %-d",
            Granularity::Month => "%b",
            Granularity::Year => "%Y",
        };
        self.start.format(format).to_string()
    }
}

/// Build the bucket for offset `back` (0 = current) ending at `today`.
fn bucket_at(granularity: Granularity, today: NaiveDate, back: u32) -> Bucket {
    match granularity {
        Granularity::Day => {
            let start = calendar::days_before(today, u64::from(back));
            Bucket {
                start,
                end: calendar::days_after(start, 1),
            }
        }
        Granularity::Week => {
            let start =
                calendar::days_before(calendar::start_of_week(today), 7 * u64::from(back));
            Bucket {
                start,
                end: calendar::days_after(start, 7),
            }
        }
        Granularity::Month => {
            let start = calendar::months_before(calendar::start_of_month(today), back);
            Bucket {
                start,
                end: calendar::months_after(start, 1),
            }
        }
        Granularity::Year => {
            let start = calendar::months_before(calendar::start_of_year(today), 12 * back);
            Bucket {
                start,
                end: calendar::months_after(start, 12),
            }
        }
    }
}

/// Bucket donations into a chart series ending with the bucket containing `now`.
///
/// The result always has exactly [`Granularity::bucket_count`] points,
/// ordered oldest first, with empty buckets reported as zero. Donations
/// outside the window are ignored.
///
/// | Granularity | Points | Label          |
/// |-------------|--------|----------------|
/// | day         | 7      | `Mon`          |
/// | week        | 8      | `Oct 12`       |
/// | month       | 6      | `Aug`          |
/// | year        | 5      | `2026`         |
#[must_use]
pub fn build_chart_series<Tz: TimeZone>(
    donations: &[DonationRecord],
    now: &DateTime<Tz>,
    granularity: Granularity,
) -> Vec<ChartPoint> {
    let tz = now.timezone();
    let today = now.date_naive();

    let local_times: Vec<(NaiveDateTime, Amount)> = donations
        .iter()
        .map(|d| (calendar::local_time(&d.created_at, &tz), d.amount))
        .collect();

    let buckets = u32::try_from(granularity.bucket_count()).unwrap_or(u32::MAX);

    (0..buckets)
        .rev()
        .map(|back| {
            let bucket = bucket_at(granularity, today, back);
            let amount = local_times
                .iter()
                .filter(|(local, _)| bucket.contains(granularity, *local))
                .map(|(_, amount)| *amount)
                .sum();

            ChartPoint {
                period: bucket.label(granularity),
                amount,
            }
        })
        .collect()
}
