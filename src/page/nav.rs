//! In-page navigation.

/// Pixels left above a section when scrolling to it (fixed header).
pub const NAV_OFFSET: f64 = 50.0;

/// Scroll position for a section whose top is at `offset_top`.
#[must_use]
pub fn scroll_target(offset_top: f64) -> f64 {
    offset_top - NAV_OFFSET
}

/// Element id a nav link points at: the `href` without its leading `#`.
#[must_use]
pub fn anchor_target(href: &str) -> &str {
    href.strip_prefix('#').unwrap_or(href)
}
