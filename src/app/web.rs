//! Browser page glue.
//!
//! Wires the static portfolio page around the canvas: smooth scrolling for
//! the nav links, the experience counter, the footer year and the skill
//! dots. Every lookup is optional; a missing element is logged and the rest
//! of the glue keeps going.

use chrono::NaiveDate;
use wasm_bindgen::JsCast;
use wasm_bindgen::closure::Closure;
use web_sys::{Document, Element, Event, HtmlElement, ScrollBehavior, ScrollToOptions};

use crate::errors::{DeskError, Result};
use crate::page::{self, SkillLevel};

/// Runs every page initializer against the current document.
pub fn init_page(career_start: NaiveDate) -> Result<()> {
    let document = web_sys::window()
        .and_then(|w| w.document())
        .ok_or_else(|| DeskError::ElementNotFound("document".to_string()))?;

    let today = page::today();
    init_nav_scrolling(&document);
    update_experience(&document, career_start, today);
    update_footer_year(&document, today);
    init_skill_dots(&document);
    Ok(())
}

fn query_all(document: &Document, selector: &str) -> Vec<Element> {
    let Ok(nodes) = document.query_selector_all(selector) else {
        log::warn!("Invalid selector {selector}");
        return Vec::new();
    };
    (0..nodes.length())
        .filter_map(|i| nodes.get(i))
        .filter_map(|n| n.dyn_into::<Element>().ok())
        .collect()
}

fn found(selector: &str, result: std::result::Result<Option<Element>, wasm_bindgen::JsValue>) -> Option<Element> {
    let found = result.ok().flatten();
    if found.is_none() {
        log::warn!("Element {selector} not found");
    }
    found
}

fn init_nav_scrolling(document: &Document) {
    for anchor in query_all(document, "nav a") {
        let document = document.clone();
        let Some(href) = anchor.get_attribute("href") else {
            continue;
        };
        let on_click = Closure::<dyn FnMut(Event)>::new(move |event: Event| {
            event.prevent_default();
            let id = page::anchor_target(&href);
            let target = document
                .get_element_by_id(id)
                .and_then(|e| e.dyn_into::<HtmlElement>().ok());
            let (Some(target), Some(window)) = (target, web_sys::window()) else {
                log::warn!("Scroll target #{id} not found");
                return;
            };
            let options = ScrollToOptions::new();
            options.set_top(page::scroll_target(f64::from(target.offset_top())));
            options.set_behavior(ScrollBehavior::Smooth);
            window.scroll_to_with_scroll_to_options(&options);
        });
        if anchor
            .add_event_listener_with_callback("click", on_click.as_ref().unchecked_ref())
            .is_err()
        {
            log::warn!("Could not attach nav click listener");
        }
        // the listener lives as long as the page
        on_click.forget();
    }
}

fn update_experience(document: &Document, career_start: NaiveDate, today: NaiveDate) {
    if let Some(element) = found(".stat-value", document.query_selector(".stat-value")) {
        let years = page::years_of_experience(career_start, today);
        element.set_text_content(Some(&page::experience_label(years)));
    }
}

fn update_footer_year(document: &Document, today: NaiveDate) {
    if let Some(element) = found(".footer-year", document.query_selector(".footer-year")) {
        element.set_text_content(Some(&page::footer_year(today)));
    }
}

fn init_skill_dots(document: &Document) {
    for skill in query_all(document, ".skill-level[data-level]") {
        let level = skill.get_attribute("data-level").unwrap_or_default();
        let total = skill.get_attribute("data-total").unwrap_or_default();
        let parsed = match SkillLevel::parse(&level, &total) {
            Ok(parsed) => parsed,
            Err(e) => {
                log::warn!("{e}");
                continue;
            }
        };
        let Some(container) = found(".level-dots", skill.query_selector(".level-dots")) else {
            continue;
        };
        container.set_inner_html("");
        for dot in parsed.dots() {
            match document.create_element("span") {
                Ok(span) => {
                    span.set_class_name(dot.class_name());
                    if container.append_child(&span).is_err() {
                        log::warn!("Could not append skill dot");
                    }
                }
                Err(e) => log::warn!("Could not create skill dot: {e:?}"),
            }
        }
    }
}
