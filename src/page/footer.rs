use chrono::{Datelike, NaiveDate};

/// Copyright year for the footer.
#[must_use]
pub fn footer_year(today: NaiveDate) -> String {
    today.year().to_string()
}
