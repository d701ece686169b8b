//! Summary statistics over completed donations.

use chrono::{DateTime, TimeZone};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::calendar;
use crate::{Amount, DonationRecord};

/// Headline numbers for the donations dashboard.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DonationStats {
    /// Sum of every donation.
    pub total: Amount,
    /// Sum of donations recorded since local midnight.
    pub today: Amount,
    /// Number of donations recorded since local midnight.
    pub today_count: usize,
    /// Sum of donations recorded since Monday 00:00 local time.
    pub this_week: Amount,
    /// Number of donations recorded since Monday 00:00 local time.
    pub this_week_count: usize,
    /// Mean donation, zero when there are none.
    pub average: Amount,
}

/// Compute [`DonationStats`] relative to `now`.
///
/// The timezone of `now` fixes where "today" and "this week" begin. Donations
/// dated after `now` still count towards today and this week.
///
/// # Example
///
/// ```
/// use chrono::{TimeZone, Utc};
/// use paw_haven_core::{Amount, DonationRecord, compute_stats};
///
/// let now = Utc.with_ymd_and_hms(2026, 10, 14, 15, 0, 0).unwrap();
/// let donations = vec![
///     DonationRecord::new("a", Amount::from_units(10), Utc.with_ymd_and_hms(2026, 10, 14, 9, 0, 0).unwrap()),
///     DonationRecord::new("b", Amount::from_units(25), Utc.with_ymd_and_hms(2026, 10, 8, 9, 0, 0).unwrap()),
/// ];
///
/// let stats = compute_stats(&donations, &now);
/// assert_eq!(stats.total, Amount::from_units(35));
/// assert_eq!(stats.today_count, 1);
/// ```
#[must_use]
pub fn compute_stats<Tz: TimeZone>(
    donations: &[DonationRecord],
    now: &DateTime<Tz>,
) -> DonationStats {
    let tz = now.timezone();
    let today = now.date_naive();
    let start_of_today = calendar::midnight(today);
    let start_of_week = calendar::midnight(calendar::start_of_week(today));

    let mut stats = DonationStats::default();

    for donation in donations {
        let local = calendar::local_time(&donation.created_at, &tz);

        stats.total += donation.amount;

        if local >= start_of_today {
            stats.today += donation.amount;
            stats.today_count += 1;
        }

        if local >= start_of_week {
            stats.this_week += donation.amount;
            stats.this_week_count += 1;
        }
    }

    stats.average = average(stats.total, donations.len());
    stats
}

fn average(total: Amount, count: usize) -> Amount {
    if count == 0 {
        return Amount::ZERO;
    }

    total
        .value()
        .checked_div(Decimal::from(count))
        .map_or(Amount::ZERO, Amount::new)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use chrono::{FixedOffset, Utc};

    fn plus_two() -> FixedOffset {
        FixedOffset::east_opt(2 * 3600).unwrap()
    }

    fn at(tz: &FixedOffset, y: i32, m: u32, d: u32, h: u32, min: u32) -> DateTime<FixedOffset> {
        tz.with_ymd_and_hms(y, m, d, h, min, 0).unwrap()
    }

    fn donation(id: &str, units: u32, created_at: DateTime<FixedOffset>) -> DonationRecord {
        DonationRecord::new(id, Amount::from_units(units), created_at.with_timezone(&Utc))
    }

    #[test]
    fn test_empty_input_is_all_zero() {
        let now = at(&plus_two(), 2026, 10, 14, 15, 0);
        let stats = compute_stats(&[], &now);

        assert_eq!(stats, DonationStats::default());
        assert_eq!(stats.average, Amount::ZERO);
    }

    #[test]
    fn test_today_and_previous_week() {
        // Wednesday 2026-10-14; the week started on Monday 2026-10-12
        let tz = plus_two();
        let now = at(&tz, 2026, 10, 14, 15, 0);
        let donations = vec![
            donation("a", 10, at(&tz, 2026, 10, 14, 9, 0)),
            donation("b", 25, at(&tz, 2026, 10, 8, 9, 0)),
        ];

        let stats = compute_stats(&donations, &now);

        assert_eq!(stats.total, Amount::from_units(35));
        assert_eq!(stats.today, Amount::from_units(10));
        assert_eq!(stats.today_count, 1);
        assert_eq!(stats.this_week, Amount::from_units(10));
        assert_eq!(stats.this_week_count, 1);
        assert_eq!(stats.average.value(), Decimal::new(175, 1));
    }

    #[test]
    fn test_six_days_ago_in_same_week() {
        // Sunday 2026-10-18; six days earlier is Monday 2026-10-12
        let tz = plus_two();
        let now = at(&tz, 2026, 10, 18, 15, 0);
        let donations = vec![
            donation("a", 10, at(&tz, 2026, 10, 18, 9, 0)),
            donation("b", 25, at(&tz, 2026, 10, 12, 9, 0)),
        ];

        let stats = compute_stats(&donations, &now);

        assert_eq!(stats.today, Amount::from_units(10));
        assert_eq!(stats.this_week, Amount::from_units(35));
        assert_eq!(stats.this_week_count, 2);
    }

    #[test]
    fn test_week_starts_at_monday_midnight() {
        let tz = plus_two();
        let now = at(&tz, 2026, 10, 14, 15, 0);
        let donations = vec![
            donation("sunday-late", 5, at(&tz, 2026, 10, 11, 23, 59)),
            donation("monday-midnight", 7, at(&tz, 2026, 10, 12, 0, 0)),
        ];

        let stats = compute_stats(&donations, &now);

        assert_eq!(stats.this_week, Amount::from_units(7));
        assert_eq!(stats.this_week_count, 1);
    }

    #[test]
    fn test_day_boundary_follows_reporting_timezone() {
        // 23:30 UTC on the 13th is already 01:30 on the 14th at +02:00
        let created = Utc.with_ymd_and_hms(2026, 10, 13, 23, 30, 0).unwrap();
        let donations = vec![DonationRecord::new("late", Amount::from_units(20), created)];

        let local_now = at(&plus_two(), 2026, 10, 14, 12, 0);
        assert_eq!(compute_stats(&donations, &local_now).today_count, 1);

        let utc_now = Utc.with_ymd_and_hms(2026, 10, 14, 12, 0, 0).unwrap();
        assert_eq!(compute_stats(&donations, &utc_now).today_count, 0);
    }

    #[test]
    fn test_null_amount_contributes_zero() {
        let json = r#"[
            {"id": "a", "amount": null, "created_at": "2026-10-14T08:00:00Z"},
            {"id": "b", "amount": "30", "created_at": "2026-10-14T09:00:00Z"}
        ]"#;
        let donations: Vec<DonationRecord> = serde_json::from_str(json).unwrap();
        let now = Utc.with_ymd_and_hms(2026, 10, 14, 15, 0, 0).unwrap();

        let stats = compute_stats(&donations, &now);

        assert_eq!(stats.total, Amount::from_units(30));
        assert_eq!(stats.today_count, 2);
        assert_eq!(stats.average, Amount::from_units(15));
    }

    #[test]
    fn test_oversized_amounts_saturate() {
        let json = r#"[
            {"id": "a", "amount": "79228162514264337593543950335", "created_at": "2026-10-14T08:00:00Z"},
            {"id": "b", "amount": "79228162514264337593543950335", "created_at": "2026-10-14T09:00:00Z"}
        ]"#;
        let donations: Vec<DonationRecord> = serde_json::from_str(json).unwrap();
        let now = Utc.with_ymd_and_hms(2026, 10, 14, 15, 0, 0).unwrap();

        let stats = compute_stats(&donations, &now);

        assert_eq!(stats.total.value(), Decimal::MAX);
        assert_eq!(stats.today.value(), Decimal::MAX);
        assert_eq!(stats.this_week.value(), Decimal::MAX);
        assert_eq!(stats.today_count, 2);
        assert!(stats.average <= stats.total);
    }

    #[test]
    fn test_subsets_and_idempotence() {
        let tz = plus_two();
        let now = at(&tz, 2026, 10, 14, 15, 0);
        let donations: Vec<DonationRecord> = (0..40)
            .map(|i| {
                let created = now.clone() - chrono::Duration::hours(i * 7);
                donation(&format!("d-{i}"), u32::try_from(i).unwrap() + 1, created)
            })
            .collect();

        let first = compute_stats(&donations, &now);
        let second = compute_stats(&donations, &now);

        assert_eq!(first, second);
        assert!(first.today <= first.this_week);
        assert!(first.this_week <= first.total);
        assert!(first.today_count <= first.this_week_count);

        let expected_average = first.total.value() / Decimal::from(donations.len());
        assert_eq!(first.average.value(), expected_average);
    }

    #[test]
    fn test_serializes_with_camel_case_keys() {
        let stats = DonationStats {
            total: Amount::from_units(35),
            today: Amount::from_units(10),
            today_count: 1,
            this_week: Amount::from_units(10),
            this_week_count: 1,
            average: Amount::new(Decimal::new(175, 1)),
        };

        let json = serde_json::to_value(stats).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "total": 35.0,
                "today": 10.0,
                "todayCount": 1,
                "thisWeek": 10.0,
                "thisWeekCount": 1,
                "average": 17.5
            })
        );
    }
}
