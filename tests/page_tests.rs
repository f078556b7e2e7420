//! Portfolio Page Logic Tests
//!
//! Tests for:
//! - Years of experience around the anniversary
//! - Experience label and footer year
//! - Skill attribute parsing, clamping and dot states
//! - Nav anchor targets and scroll offsets

use coder_desk::errors::DeskError;
use coder_desk::page::experience::date;
use coder_desk::page::{
    anchor_target, career_start, experience_label, footer_year, scroll_target, years_of_experience, DotState,
    SkillLevel, NAV_OFFSET,
};

// ============================================================================
// Experience Tests
// ============================================================================

#[test]
fn default_career_start() {
    assert_eq!(career_start(), date(2021, 1, 1).unwrap());
}

#[test]
fn years_count_from_anniversary() {
    let start = date(2021, 1, 1).unwrap();
    assert_eq!(years_of_experience(start, date(2021, 12, 31).unwrap()), 0);
    assert_eq!(years_of_experience(start, date(2022, 1, 1).unwrap()), 1);
    assert_eq!(years_of_experience(start, date(2026, 10, 19).unwrap()), 5);
}

#[test]
fn years_wait_for_mid_year_anniversary() {
    let start = date(2019, 6, 15).unwrap();
    assert_eq!(years_of_experience(start, date(2024, 6, 14).unwrap()), 4);
    assert_eq!(years_of_experience(start, date(2024, 6, 15).unwrap()), 5);
    assert_eq!(years_of_experience(start, date(2024, 7, 1).unwrap()), 5);
}

#[test]
fn leap_day_start() {
    let start = date(2020, 2, 29).unwrap();
    assert_eq!(years_of_experience(start, date(2021, 2, 28).unwrap()), 0);
    assert_eq!(years_of_experience(start, date(2021, 3, 1).unwrap()), 1);
}

#[test]
fn invalid_date_is_reported() {
    let err = date(2023, 2, 30).unwrap_err();
    assert!(matches!(err, DeskError::InvalidDate(ref s) if s == "2023-02-30"));
}

#[test]
fn experience_label_has_plus() {
    assert_eq!(experience_label(5), "5+");
    assert_eq!(experience_label(0), "0+");
}

#[test]
fn footer_shows_current_year() {
    assert_eq!(footer_year(date(2026, 10, 19).unwrap()), "2026");
}

// ============================================================================
// Skill Tests
// ============================================================================

#[test]
fn skill_dots_fill_from_the_left() {
    let skill = SkillLevel::parse("3", "5").unwrap();
    assert_eq!(skill, SkillLevel { level: 3, total: 5 });
    assert_eq!(
        skill.dots(),
        vec![
            DotState::Filled,
            DotState::Filled,
            DotState::Filled,
            DotState::Empty,
            DotState::Empty
        ]
    );
}

#[test]
fn skill_level_clamped_to_total() {
    let skill = SkillLevel::parse("9", "4").unwrap();
    assert_eq!(skill.level, 4);
    assert!(skill.dots().iter().all(|d| *d == DotState::Filled));
}

#[test]
fn skill_attributes_are_trimmed() {
    assert_eq!(SkillLevel::parse(" 2 ", "5\n").unwrap().level, 2);
}

#[test]
fn skill_zero_total_has_no_dots() {
    assert!(SkillLevel::parse("0", "0").unwrap().dots().is_empty());
}

#[test]
fn bad_skill_attributes_name_the_attribute() {
    match SkillLevel::parse("high", "5") {
        Err(DeskError::InvalidSkillAttribute { attribute, value }) => {
            assert_eq!(attribute, "data-level");
            assert_eq!(value, "high");
        }
        other => panic!("unexpected {other:?}"),
    }
    match SkillLevel::parse("3", "") {
        Err(DeskError::InvalidSkillAttribute { attribute, .. }) => assert_eq!(attribute, "data-total"),
        other => panic!("unexpected {other:?}"),
    }
    assert!(SkillLevel::parse("-1", "5").is_err());
}

#[test]
fn dot_class_names() {
    assert_eq!(DotState::Filled.class_name(), "level-dot filled");
    assert_eq!(DotState::Empty.class_name(), "level-dot empty");
}

// ============================================================================
// Nav Tests
// ============================================================================

#[test]
fn anchor_strips_hash() {
    assert_eq!(anchor_target("#projects"), "projects");
    assert_eq!(anchor_target("about"), "about");
}

#[test]
fn scroll_leaves_room_for_header() {
    assert!((scroll_target(800.0) - (800.0 - NAV_OFFSET)).abs() < f64::EPSILON);
    assert!((scroll_target(0.0) + 50.0).abs() < f64::EPSILON);
}
