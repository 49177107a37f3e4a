use crate::core::{percent_label, ProgressStage};
use crate::dom;
use wasm_bindgen::JsCast;
use web_sys as web;

const LOADING_OVERLAY: &str = "loading-overlay";
const TOAST_ID: &str = "toast-notification";

#[inline]
pub fn show_loading(document: &web::Document) {
    dom::set_hidden_by_id(document, LOADING_OVERLAY, false);
    set_progress(document, 0.0);
}

#[inline]
pub fn hide_loading(document: &web::Document) {
    dom::set_hidden_by_id(document, LOADING_OVERLAY, true);
}

/// Progress bar width, percent text and the three-stage icon.
pub fn set_progress(document: &web::Document, percent: f64) {
    if let Some(bar) = dom::by_id::<web::HtmlElement>(document, "progress-bar") {
        dom::set_style(&bar, "width", &format!("{percent}%"));
    }
    dom::set_text(document, "loading-progress", &percent_label(percent));
    dom::set_text(
        document,
        "loading-icon",
        ProgressStage::for_percent(percent).icon(),
    );
}

/// Blocking message for errors that end the page's purpose.
pub fn fatal(message: &str) {
    log::error!("{}", message);
    if let Some(w) = web::window() {
        _ = w.alert_with_message(message);
    }
    if let Some(doc) = dom::window_document() {
        hide_loading(&doc);
    }
}

/// Transient non-blocking error notification at the top of the page.
pub fn toast(message: &str, duration_ms: i32) {
    let Some(doc) = dom::window_document() else {
        return;
    };
    if let Some(old) = doc.get_element_by_id(TOAST_ID) {
        old.remove();
    }
    let Ok(el) = doc.create_element("div") else {
        return;
    };
    el.set_id(TOAST_ID);
    el.set_class_name(
        "fixed top-4 left-1/2 -translate-x-1/2 bg-red-500 text-white px-4 py-2 rounded-lg shadow-lg z-[9999] transition-all duration-300",
    );
    el.set_text_content(Some(message));
    if let Some(body) = doc.body() {
        _ = body.append_child(&el);
    }
    dom::set_timeout(duration_ms, move || el.remove());
}

/// Warn that AR needs HTTPS; removed after a few seconds.
pub fn insecure_context_banner(document: &web::Document) {
    let Ok(el) = document.create_element("div") else {
        return;
    };
    el.set_class_name(
        "fixed top-4 left-4 right-4 bg-red-500/90 text-white p-4 rounded-xl z-50 text-sm text-center backdrop-blur-md shadow-lg",
    );
    el.set_inner_html(
        "<strong>Warning:</strong> insecure connection (HTTP).<br>AR features may not work. Please use HTTPS or localhost.",
    );
    if let Some(body) = document.body() {
        _ = body.append_child(&el);
    }
    if let Some(html) = el.dyn_ref::<web::HtmlElement>() {
        let html = html.clone();
        dom::set_timeout(5000, move || html.remove());
    }
}
