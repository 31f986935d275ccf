//! Date to seed conversion

use chrono::Datelike;

/// Upper bound on days in a year, used as the year stride
pub const MAX_YEAR_DAYS: i64 = 366;

/// Upper bound on days in a month, used as the month stride
pub const MAX_MONTH_DAYS: i64 = 31;

/// Derive the integer seed for a calendar date
///
/// `seed = year * 366 + month0 * 31 + day`, with a zero-based month. Distinct
/// within a year; cross-year collisions are possible and harmless, only
/// determinism matters.
///
/// # Examples
/// ```
/// use chrono::NaiveDate;
/// use disnumber::daily::seed_for_date;
///
/// let date = NaiveDate::from_ymd_opt(1970, 1, 1).unwrap();
/// assert_eq!(seed_for_date(&date), 1970 * 366 + 1);
/// ```
#[must_use]
pub fn seed_for_date<D: Datelike>(date: &D) -> i64 {
    i64::from(date.year()) * MAX_YEAR_DAYS
        + i64::from(date.month0()) * MAX_MONTH_DAYS
        + i64::from(date.day())
}
