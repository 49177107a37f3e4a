use crate::constants::{SWIPE_EXIT_MS, SWIPE_EXIT_TRANSITION, SWIPE_SNAP_TRANSITION};
use crate::core::{OrientationController, SwipeEffect, SwipeGesture, SwipePhase};
use crate::dom;
use crate::input::{self, add_pointer_listener, pointer_sample};
use std::cell::RefCell;
use std::rc::Rc;
use web_sys as web;

const DRAGGING_CLASS: &str = "is-dragging";

/// Manual look-around on the panorama canvas. Only the primary pointer drags.
pub fn wire_panorama_drag(
    canvas: &web::HtmlCanvasElement,
    controller: Rc<RefCell<OrientationController>>,
) {
    // The browser must not pan or zoom the page under a look-around drag
    dom::set_style(canvas, "touch-action", "none");
    let target: &web::EventTarget = canvas.as_ref();

    let c = controller.clone();
    let el = canvas.clone();
    add_pointer_listener(target, "pointerdown", move |ev| {
        let p = pointer_sample(&ev);
        if p.primary && c.borrow_mut().begin_drag(p.x, p.y) {
            input::capture(&el, &ev);
            ev.prevent_default();
        }
    });

    let c = controller.clone();
    add_pointer_listener(target, "pointermove", move |ev| {
        let p = pointer_sample(&ev);
        if p.primary {
            c.borrow_mut().drag_to(p.x, p.y);
        }
    });

    for name in ["pointerup", "pointercancel"] {
        let c = controller.clone();
        let el = canvas.clone();
        add_pointer_listener(target, name, move |ev| {
            if ev.is_primary() && c.borrow().is_dragging() {
                c.borrow_mut().end_drag();
                input::release(&el, &ev);
            }
        });
    }
}

/// Everything a swipe card needs to act on its gesture outcome.
pub struct SwipeCardWiring {
    pub card: web::HtmlElement,
    pub target_url: String,
    /// Called after the exit animation with the card's key.
    pub on_discarded: Rc<dyn Fn(usize)>,
    pub key: usize,
}

fn apply_effect(card: &web::HtmlElement, w: &SwipeCardWiring, ev: &web::PointerEvent, fx: SwipeEffect) {
    match fx {
        SwipeEffect::DisableTransition => dom::set_style(card, "transition", "none"),
        SwipeEffect::Track { dx, rotation_deg } => {
            dom::set_style(card, "transform", &SwipeEffect::css_transform(dx, rotation_deg))
        }
        SwipeEffect::PreventDefault => {
            if ev.cancelable() {
                ev.prevent_default();
            }
        }
        SwipeEffect::SnapBack => {
            dom::set_style(card, "transition", SWIPE_SNAP_TRANSITION);
            dom::set_style(card, "transform", "");
        }
        SwipeEffect::Navigate => dom::navigate(&w.target_url),
        SwipeEffect::Discard(dir) => {
            log::info!("[swipe] card {} discarded {:?}", w.key, dir);
            dom::set_style(card, "transition", SWIPE_EXIT_TRANSITION);
            _ = card.class_list().add_1(dir.fly_out_class());
            let card = card.clone();
            let on_discarded = w.on_discarded.clone();
            let key = w.key;
            dom::set_timeout(SWIPE_EXIT_MS, move || {
                _ = card.class_list().remove_2("fly-out-right", "fly-out-left");
                for prop in ["transform", "opacity", "transition"] {
                    dom::set_style(&card, prop, "");
                }
                on_discarded(key);
            });
        }
    }
}

/// Mirror the gesture phase on the card so CSS can style a held card.
fn sync_phase_class(card: &web::HtmlElement, gesture: &SwipeGesture) {
    let cl = card.class_list();
    _ = if gesture.phase() == SwipePhase::Dragging {
        cl.add_1(DRAGGING_CLASS)
    } else {
        cl.remove_1(DRAGGING_CLASS)
    };
}

/// Attach the swipe state machine to one card.
///
/// Only Pointer Events are observed (they cover mouse and touch), and the
/// gesture belongs to the pointer that started it.
pub fn wire_swipe_card(wiring: SwipeCardWiring) {
    let card = wiring.card.clone();
    // Let the browser keep vertical scrolling; horizontal motion comes to us
    dom::set_style(&card, "touch-action", "pan-y");
    let target: web::EventTarget = card.clone().into();
    let gesture = Rc::new(RefCell::new(SwipeGesture::new()));
    let wiring = Rc::new(wiring);

    let g = gesture.clone();
    let w = wiring.clone();
    add_pointer_listener(&target, "pointerdown", move |ev| {
        let p = pointer_sample(&ev);
        let fx = g.borrow_mut().press(p.id, p.x, p.y);
        if !fx.is_empty() {
            input::capture(&w.card, &ev);
        }
        for e in fx {
            apply_effect(&w.card, &w, &ev, e);
        }
        sync_phase_class(&w.card, &g.borrow());
    });

    let g = gesture.clone();
    let w = wiring.clone();
    add_pointer_listener(&target, "pointermove", move |ev| {
        let p = pointer_sample(&ev);
        let fx = g.borrow_mut().motion(p.id, p.x, p.y);
        for e in fx {
            apply_effect(&w.card, &w, &ev, e);
        }
        sync_phase_class(&w.card, &g.borrow());
    });

    let g = gesture.clone();
    let w = wiring.clone();
    add_pointer_listener(&target, "pointerup", move |ev| {
        let (outcome, fx) = g.borrow_mut().release(ev.pointer_id());
        log::debug!("[swipe] card {} released: {:?}", w.key, outcome);
        input::release(&w.card, &ev);
        for e in fx {
            apply_effect(&w.card, &w, &ev, e);
        }
        sync_phase_class(&w.card, &g.borrow());
    });

    let g = gesture;
    let w = wiring;
    add_pointer_listener(&target, "pointercancel", move |ev| {
        let fx = g.borrow_mut().cancel();
        input::release(&w.card, &ev);
        for e in fx {
            apply_effect(&w.card, &w, &ev, e);
        }
        sync_phase_class(&w.card, &g.borrow());
    });
}
