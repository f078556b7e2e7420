//! Portfolio page logic
//!
//! Everything the page glue computes, without touching the DOM, so it can
//! be tested natively. The browser side lives in `app::web`.

pub mod experience;
pub mod footer;
pub mod nav;
pub mod skills;

use chrono::NaiveDate;

pub use experience::{career_start, experience_label, years_of_experience};
pub use footer::footer_year;
pub use nav::{NAV_OFFSET, anchor_target, scroll_target};
pub use skills::{DotState, SkillLevel};

/// Today's local date.
#[cfg(not(target_arch = "wasm32"))]
#[must_use]
pub fn today() -> NaiveDate {
    chrono::Local::now().date_naive()
}

/// Today's local date, read from the browser clock.
#[cfg(target_arch = "wasm32")]
#[must_use]
pub fn today() -> NaiveDate {
    let now = js_sys::Date::new_0();
    NaiveDate::from_ymd_opt(now.get_full_year() as i32, now.get_month() + 1, now.get_date())
        .unwrap_or(NaiveDate::MIN)
}
