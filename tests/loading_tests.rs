// Host-side tests for load sequencing and the progress overlay model.
// The main crate is wasm-only, so we include the pure-Rust modules directly.

#![allow(dead_code)]
mod constants {
    include!("../src/constants.rs");
}
mod loading {
    include!("../src/core/loading.rs");
}

use loading::*;

#[test]
fn only_the_latest_ticket_is_current() {
    let mut seq = LoadSequencer::new();
    let a = seq.begin();
    assert!(seq.is_current(a));
    let b = seq.begin();
    assert!(!seq.is_current(a));
    assert!(seq.is_current(b));
    assert!(b > a);
    assert_ne!(a.id(), b.id());
}

#[test]
fn stale_completion_is_ignored() {
    let mut loads = PanoramaLoads::new();
    assert_eq!(loads.status(), PanoramaStatus::Empty);
    let first = loads.request(0);
    let second = loads.request(1);

    // Second request finishes first, then the slow first one arrives
    assert!(loads.complete(second, 1));
    assert!(!loads.complete(first, 0));
    assert_eq!(loads.shown(), Some(1));
    assert_eq!(loads.status(), PanoramaStatus::Ready { room: 1 });
}

#[test]
fn slow_first_request_is_dropped_even_if_it_arrives_early() {
    let mut loads = PanoramaLoads::new();
    let first = loads.request(0);
    let second = loads.request(1);
    assert!(!loads.complete(first, 0));
    assert_eq!(loads.shown(), None);
    assert_eq!(
        loads.status(),
        PanoramaStatus::Loading {
            room: 1,
            ticket: second
        }
    );
    assert!(loads.complete(second, 1));
    assert_eq!(loads.shown(), Some(1));
}

#[test]
fn failure_keeps_the_previous_room() {
    let mut loads = PanoramaLoads::new();
    let t = loads.request(1);
    loads.complete(t, 1);
    let t = loads.request(2);
    assert!(loads.fail(t, 2));
    assert_eq!(loads.shown(), Some(1));
    assert_eq!(
        loads.status(),
        PanoramaStatus::Failed {
            room: 2,
            shown: Some(1)
        }
    );
}

#[test]
fn stale_failure_is_ignored() {
    let mut loads = PanoramaLoads::new();
    let old = loads.request(0);
    let new = loads.request(1);
    assert!(!loads.fail(old, 0));
    assert!(loads.is_current(new));
    assert!(matches!(loads.status(), PanoramaStatus::Loading { room: 1, .. }));
}

#[test]
fn percent_is_clamped_and_needs_a_total() {
    assert_eq!(percent(50.0, 200.0), Some(25.0));
    assert_eq!(percent(0.0, 10.0), Some(0.0));
    assert_eq!(percent(300.0, 200.0), Some(100.0));
    assert_eq!(percent(10.0, 0.0), None);
    assert_eq!(percent(10.0, -1.0), None);
    assert_eq!(percent(10.0, f64::NAN), None);
}

#[test]
fn progress_stages() {
    assert_eq!(ProgressStage::for_percent(0.0), ProgressStage::Home);
    assert_eq!(ProgressStage::for_percent(32.9), ProgressStage::Home);
    assert_eq!(ProgressStage::for_percent(33.0), ProgressStage::ViewInAr);
    assert_eq!(ProgressStage::for_percent(65.9), ProgressStage::ViewInAr);
    assert_eq!(ProgressStage::for_percent(66.0), ProgressStage::Apartment);
    assert_eq!(ProgressStage::for_percent(100.0), ProgressStage::Apartment);
    assert_eq!(ProgressStage::Home.icon(), "home");
    assert_eq!(ProgressStage::ViewInAr.icon(), "view_in_ar");
    assert_eq!(ProgressStage::Apartment.icon(), "apartment");
}

#[test]
fn percent_labels_round() {
    assert_eq!(percent_label(33.4), "33%");
    assert_eq!(percent_label(99.6), "100%");
    assert_eq!(percent_label(0.0), "0%");
}
