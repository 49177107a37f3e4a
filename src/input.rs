use wasm_bindgen::JsCast;
use web_sys as web;

/// Client-space position and owner of one pointer event.
#[derive(Clone, Copy, Debug)]
pub struct PointerSample {
    pub id: i32,
    pub x: f64,
    pub y: f64,
    pub primary: bool,
}

#[inline]
pub fn pointer_sample(ev: &web::PointerEvent) -> PointerSample {
    PointerSample {
        id: ev.pointer_id(),
        x: ev.client_x() as f64,
        y: ev.client_y() as f64,
        primary: ev.is_primary(),
    }
}

/// Route subsequent moves of this pointer to `el` even when it leaves the element.
#[inline]
pub fn capture(el: &web::Element, ev: &web::PointerEvent) {
    _ = el.set_pointer_capture(ev.pointer_id());
}

#[inline]
pub fn release(el: &web::Element, ev: &web::PointerEvent) {
    if el.has_pointer_capture(ev.pointer_id()) {
        _ = el.release_pointer_capture(ev.pointer_id());
    }
}

/// Attach a pointer listener that may call `preventDefault` (non-passive).
pub fn add_pointer_listener(
    target: &web::EventTarget,
    event: &str,
    handler: impl FnMut(web::PointerEvent) + 'static,
) {
    let closure =
        wasm_bindgen::closure::Closure::wrap(Box::new(handler) as Box<dyn FnMut(web::PointerEvent)>);
    let opts = web::AddEventListenerOptions::new();
    opts.set_passive(false);
    _ = target.add_event_listener_with_callback_and_add_event_listener_options(
        event,
        closure.as_ref().unchecked_ref(),
        &opts,
    );
    closure.forget();
}
