//! Years of professional experience shown in the hero stats.

use chrono::{Datelike, NaiveDate};

use crate::errors::{DeskError, Result};

/// Default career start.
#[must_use]
pub fn career_start() -> NaiveDate {
    NaiveDate::from_ymd_opt(2021, 1, 1).unwrap_or_default()
}

/// Builds a date, reporting impossible ones as [`DeskError::InvalidDate`].
pub fn date(year: i32, month: u32, day: u32) -> Result<NaiveDate> {
    NaiveDate::from_ymd_opt(year, month, day)
        .ok_or_else(|| DeskError::InvalidDate(format!("{year:04}-{month:02}-{day:02}")))
}

/// Whole years between `start` and `today`.
///
/// Calendar-year difference, minus one while this year's anniversary
/// (month and day of `start`) has not been reached yet.
#[must_use]
pub fn years_of_experience(start: NaiveDate, today: NaiveDate) -> i32 {
    let mut years = today.year() - start.year();
    if (today.month(), today.day()) < (start.month(), start.day()) {
        years -= 1;
    }
    years
}

#[must_use]
pub fn experience_label(years: i32) -> String {
    format!("{years}+")
}
