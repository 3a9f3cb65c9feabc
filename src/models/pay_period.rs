//! Pay period model.
//!
//! This module contains the [`PayPeriod`] type describing one fortnight of
//! a payroll year, and the calendar arithmetic that places it.

use chrono::{Datelike, NaiveDate, Weekday};
use serde::{Deserialize, Serialize};

/// The number of calendar days in one fortnight.
pub const DAYS_IN_FORTNIGHT: i64 = 14;

/// One fortnightly pay period within a year.
///
/// Fortnight 1 starts on January 1st of the year; each subsequent fortnight
/// starts 14 days later. The final period of a year is truncated at
/// December 31st so that a period never spans two payroll years.
///
/// # Example
///
/// ```
/// use payrun_engine::models::PayPeriod;
/// use chrono::NaiveDate;
///
/// let period = PayPeriod::for_fortnight(1, 2025);
/// assert_eq!(period.start, NaiveDate::from_ymd_opt(2025, 1, 1).unwrap());
/// assert_eq!(period.end, NaiveDate::from_ymd_opt(2025, 1, 14).unwrap());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PayPeriod {
    /// The fortnight number within the year (1-based).
    pub fortnight: u32,
    /// The payroll year.
    pub year: i32,
    /// The first day of the period (inclusive).
    pub start: NaiveDate,
    /// The last day of the period (inclusive).
    pub end: NaiveDate,
}

impl PayPeriod {
    /// Computes the pay period for a fortnight number within a year.
    ///
    /// The caller is responsible for validating the fortnight number against
    /// the configured fortnights-per-year before using the period. A
    /// fortnight past the calendar range saturates to the end of the
    /// representable date range rather than panicking, so validation can
    /// happen after construction.
    pub fn for_fortnight(fortnight: u32, year: i32) -> Self {
        // NaiveDate construction only fails for out-of-range dates; Jan 1 and
        // Dec 31 of any representable year are always valid.
        let year_start = NaiveDate::from_ymd_opt(year, 1, 1).unwrap_or(NaiveDate::MIN);
        let year_end = NaiveDate::from_ymd_opt(year, 12, 31).unwrap_or(NaiveDate::MAX);

        let offset_days = u64::from(fortnight).saturating_sub(1) * 14;
        let start = year_start
            .checked_add_days(chrono::Days::new(offset_days))
            .unwrap_or(NaiveDate::MAX);
        let end = start
            .checked_add_days(chrono::Days::new(DAYS_IN_FORTNIGHT as u64 - 1))
            .unwrap_or(NaiveDate::MAX);
        let end = if end > year_end { year_end } else { end };

        Self {
            fortnight,
            year,
            start,
            end,
        }
    }

    /// Checks if a given date falls within this pay period (inclusive).
    pub fn contains_date(&self, date: NaiveDate) -> bool {
        date >= self.start && date <= self.end
    }

    /// Counts the working days (Monday to Friday) in the period.
    pub fn working_days(&self) -> u32 {
        let mut count = 0;
        let mut current = self.start;
        while current <= self.end {
            if !matches!(current.weekday(), Weekday::Sat | Weekday::Sun) {
                count += 1;
            }
            current = current + chrono::Days::new(1);
        }
        count
    }
}
