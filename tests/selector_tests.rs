// Host-side tests for the thumbnail strip view model.
// The main crate is wasm-only, so we include the pure-Rust modules directly.

#![allow(dead_code)]
mod selector {
    include!("../src/core/selector.rs");
}

use selector::*;

fn items(n: usize) -> Vec<SelectorItem> {
    (0..n)
        .map(|i| SelectorItem {
            label: format!("Room {i}"),
            image_url: format!("assets/r{i}.jpg"),
        })
        .collect()
}

fn has_class(classes: &str, name: &str) -> bool {
    classes.split_whitespace().any(|c| c == name)
}

#[test]
fn exactly_one_thumb_is_active() {
    let thumbs = strip_view(&items(4), 2, "Viewing");
    assert_eq!(thumbs.len(), 4);
    let active: Vec<usize> = thumbs.iter().filter(|t| t.active).map(|t| t.index).collect();
    assert_eq!(active, [2]);
    assert_eq!(thumbs[2].caption.as_deref(), Some("Viewing"));
    assert!(thumbs.iter().filter(|t| !t.active).all(|t| t.caption.is_none()));
    assert_eq!(thumbs[1].label, "Room 1");
    assert_eq!(thumbs[1].image_url, "assets/r1.jpg");
}

#[test]
fn out_of_range_current_highlights_nothing() {
    let thumbs = strip_view(&items(3), 3, "Viewing");
    assert!(thumbs.iter().all(|t| !t.active));
    assert!(strip_view(&[], 0, "Viewing").is_empty());
}

#[test]
fn rendering_is_idempotent() {
    let list = items(5);
    assert_eq!(strip_view(&list, 1, "Selected"), strip_view(&list, 1, "Selected"));
}

#[test]
fn active_styling() {
    let thumbs = strip_view(&items(2), 0, "Selected");
    let on = thumbs[0].button_class("variant");
    let off = thumbs[1].button_class("variant");
    assert!(has_class(&on, "variant-btn") && has_class(&off, "variant-btn"));
    assert!(has_class(&on, "active"));
    assert!(!has_class(&off, "active"));
    assert!(has_class(thumbs[0].frame_class(), "border-primary"));
    assert!(!has_class(thumbs[1].frame_class(), "border-primary"));
    assert!(has_class(thumbs[0].label_class(), "text-primary"));
}

#[test]
fn clicking_the_current_item_does_nothing() {
    assert_eq!(on_click(1, 1, 3), None);
    assert_eq!(on_click(1, 2, 3), Some(2));
    assert_eq!(on_click(1, 0, 3), Some(0));
    assert_eq!(on_click(1, 3, 3), None);
    assert_eq!(on_click(0, 0, 0), None);
}

#[test]
fn clicked_thumb_index_comes_from_its_attribute() {
    assert_eq!(THUMB_INDEX_ATTR, "data-index");
    assert_eq!(picked_index(Some("2"), 3), Some(2));
    assert_eq!(picked_index(Some(" 0 "), 3), Some(0));
    assert_eq!(picked_index(Some("3"), 3), None);
    assert_eq!(picked_index(Some("-1"), 3), None);
    assert_eq!(picked_index(Some("room"), 3), None);
    assert_eq!(picked_index(None, 3), None);
}

#[test]
fn rebuilt_strip_resolves_clicks_against_current_selection() {
    // one listener outlives every rebuild; the index alone decides the outcome
    let list = items(3);
    for current in 0..3 {
        let thumbs = strip_view(&list, current, "Viewing");
        for t in &thumbs {
            let picked = picked_index(Some(&t.index.to_string()), list.len());
            assert_eq!(picked, Some(t.index));
            let load = picked.and_then(|i| on_click(current, i, list.len()));
            assert_eq!(load.is_none(), t.active);
        }
    }
}
