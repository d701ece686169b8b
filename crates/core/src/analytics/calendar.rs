//! Local-calendar boundary arithmetic.
//!
//! Boundaries are wall-clock values in the reporting timezone. Donations are
//! compared by their local wall-clock time, never by UTC instant.

use chrono::{DateTime, Datelike, Days, Months, NaiveDate, NaiveDateTime, TimeZone, Utc};

/// Wall-clock time of `instant` in `tz`.
pub(super) fn local_time<Tz: TimeZone>(instant: &DateTime<Utc>, tz: &Tz) -> NaiveDateTime {
    instant.with_timezone(tz).naive_local()
}

/// Local midnight of the given date.
pub(super) fn midnight(date: NaiveDate) -> NaiveDateTime {
    date.and_time(chrono::NaiveTime::MIN)
}

/// Most recent Monday on or before `date`.
///
/// With `d` the weekday index counted from Sunday = 0, the offset back to
/// Monday is `(d + 6) mod 7`.
pub(super) fn start_of_week(date: NaiveDate) -> NaiveDate {
    let from_sunday = date.weekday().num_days_from_sunday();
    days_before(date, u64::from((from_sunday + 6) % 7))
}

/// First day of the month containing `date`.
pub(super) fn start_of_month(date: NaiveDate) -> NaiveDate {
    days_before(date, u64::from(date.day0()))
}

/// January 1st of the year containing `date`.
pub(super) fn start_of_year(date: NaiveDate) -> NaiveDate {
    days_before(date, u64::from(date.ordinal0()))
}

/// Shift a date back by whole months, saturating at the calendar minimum.
pub(super) fn months_before(date: NaiveDate, months: u32) -> NaiveDate {
    date.checked_sub_months(Months::new(months)).unwrap_or(NaiveDate::MIN)
}

/// Shift a date forward by whole months, saturating at the calendar maximum.
pub(super) fn months_after(date: NaiveDate, months: u32) -> NaiveDate {
    date.checked_add_months(Months::new(months)).unwrap_or(NaiveDate::MAX)
}

/// Shift a date back by whole days, saturating at the calendar minimum.
pub(super) fn days_before(date: NaiveDate, days: u64) -> NaiveDate {
    date.checked_sub_days(Days::new(days)).unwrap_or(NaiveDate::MIN)
}

/// Shift a date forward by whole days, saturating at the calendar maximum.
pub(super) fn days_after(date: NaiveDate, days: u64) -> NaiveDate {
    date.checked_add_days(Days::new(days)).unwrap_or(NaiveDate::MAX)
}
