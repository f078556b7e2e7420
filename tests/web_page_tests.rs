//! Browser Page Glue Tests
//!
//! Tests for:
//! - Today's date read from the browser clock
//! - Experience label, footer year and skill dots written into the DOM
//! - Missing elements being skipped instead of failing
//!
//! Run with `wasm-pack test --headless --firefox`.

#![cfg(target_arch = "wasm32")]

use chrono::Datelike;
use wasm_bindgen_test::{wasm_bindgen_test, wasm_bindgen_test_configure};
use web_sys::{Document, Element};

use coder_desk::app::web::init_page;
use coder_desk::page::experience::date;
use coder_desk::page::{self, footer_year};

wasm_bindgen_test_configure!(run_in_browser);

fn document() -> Document {
    web_sys::window().unwrap().document().unwrap()
}

fn set_body(html: &str) {
    document().body().unwrap().set_inner_html(html);
}

fn select(selector: &str) -> Element {
    document().query_selector(selector).unwrap().unwrap()
}

// ============================================================================
// Clock Tests
// ============================================================================

#[wasm_bindgen_test]
fn today_matches_browser_year() {
    let year = js_sys::Date::new_0().get_full_year() as i32;
    assert_eq!(page::today().year(), year);
}

// ============================================================================
// DOM Tests
// ============================================================================

#[wasm_bindgen_test]
fn init_fills_page() {
    set_body(
        r#"<span class="stat-value">?</span>
           <span class="footer-year"></span>
           <div class="skill-level" data-level="2" data-total="4">
             <div class="level-dots"><span>old</span></div>
           </div>"#,
    );

    let start = date(2021, 1, 1).unwrap();
    init_page(start).unwrap();

    let today = page::today();
    let years = page::years_of_experience(start, today);
    assert_eq!(select(".stat-value").text_content().unwrap(), format!("{years}+"));
    assert_eq!(select(".footer-year").text_content().unwrap(), footer_year(today));

    let dots = select(".level-dots");
    assert_eq!(dots.child_element_count(), 4);
    assert_eq!(dots.query_selector_all(".level-dot.filled").unwrap().length(), 2);
    assert_eq!(dots.query_selector_all(".level-dot.empty").unwrap().length(), 2);
}

#[wasm_bindgen_test]
fn bad_skill_attribute_leaves_dots_alone() {
    set_body(
        r#"<div class="skill-level" data-level="many" data-total="4">
             <div class="level-dots"><span>old</span></div>
           </div>"#,
    );
    init_page(date(2021, 1, 1).unwrap()).unwrap();
    assert_eq!(select(".level-dots").child_element_count(), 1);
}

#[wasm_bindgen_test]
fn empty_page_is_not_an_error() {
    set_body("");
    assert!(init_page(date(2021, 1, 1).unwrap()).is_ok());
}
