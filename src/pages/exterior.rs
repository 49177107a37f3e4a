use super::Session;
use crate::assets::{self, js_err};
use crate::core::{on_click, strip_view, Exterior, Platform, ProjectError, SelectorItem};
use crate::overlay;
use crate::{dom, ui};
use std::cell::Cell;
use std::rc::Rc;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_futures::{spawn_local, JsFuture};
use web_sys as web;

struct ExteriorPage {
    session: Session,
    exterior: Exterior,
    document: web::Document,
    viewer: web::Element,
    current: Cell<usize>,
    platform: Platform,
}

fn detail_field(ev: &web::Event, key: &str) -> Option<JsValue> {
    let detail = ev.dyn_ref::<web::CustomEvent>()?.detail();
    js_sys::Reflect::get(&detail, &JsValue::from_str(key)).ok()
}

fn render_variant_strip(page: &ExteriorPage) {
    let items: Vec<SelectorItem> = page
        .exterior
        .variants
        .iter()
        .map(|v| SelectorItem {
            label: format!("{} Plan", v.name),
            image_url: page.session.project.asset_url(v.thumbnail_file()),
        })
        .collect();
    let thumbs = strip_view(&items, page.current.get(), "Selected");
    ui::render_strip(&page.document, "variant-selector", "variant", &thumbs);
}

fn wire_variant_strip(page: &Rc<ExteriorPage>) {
    let p = page.clone();
    ui::wire_strip(&page.document, "variant-selector", page.exterior.variants.len(), move |i| {
        if let Some(next) = on_click(p.current.get(), i, p.exterior.variants.len()) {
            load_variant(&p, next);
        }
    });
}

fn load_variant(page: &Rc<ExteriorPage>, index: usize) {
    let files = page.exterior.model_files(index);
    let project = &page.session.project;
    let android = project.asset_url(&files.android);
    let ios = project.asset_url(&files.ios);
    log::info!("[exterior] variant {} -> {} / {}", index, android, ios);
    _ = page.viewer.set_attribute("src", &android);
    _ = page.viewer.set_attribute("ios-src", &ios);
    page.current.set(index);
    render_variant_strip(page);
    // USDZ is only fetched by Quick Look, so warm the cache on iOS only
    if page.platform == Platform::Ios {
        assets::prefetch(ios);
    }
}

fn listen(target: &web::Element, event: &str, handler: impl FnMut(web::Event) + 'static) {
    let closure = Closure::wrap(Box::new(handler) as Box<dyn FnMut(web::Event)>);
    _ = target.add_event_listener_with_callback(event, closure.as_ref().unchecked_ref());
    closure.forget();
}

fn activate_ar(viewer: &web::Element) {
    let f = js_sys::Reflect::get(viewer, &JsValue::from_str("activateAR"))
        .ok()
        .and_then(|f| f.dyn_into::<js_sys::Function>().ok());
    match f {
        Some(f) => {
            if let Err(e) = f.call0(viewer) {
                log::error!("[exterior] activateAR failed: {:?}", e);
                overlay::toast("AR could not be started", 3000);
            }
        }
        None => log::warn!("[exterior] model-viewer has no activateAR"),
    }
}

fn wire_viewer_events(page: &Rc<ExteriorPage>) {
    let doc = page.document.clone();
    listen(&page.viewer, "progress", move |ev| {
        if let Some(p) = detail_field(&ev, "totalProgress").and_then(|v| v.as_f64()) {
            overlay::set_progress(&doc, (p * 100.0).clamp(0.0, 100.0));
        }
    });

    let p = page.clone();
    listen(&page.viewer, "load", move |_ev| {
        let doc = &p.document;
        overlay::hide_loading(doc);
        if let Some(badge) = doc.get_element_by_id("status-badge") {
            badge.set_text_content(Some("Model ready"));
            _ = badge.class_list().remove_1("bg-primary/90");
            _ = badge.class_list().add_1("bg-green-500/90");
        }
        dom::set_hidden_by_id(doc, "ar-button", false);
        if let Some(scanning) = dom::by_id::<web::HtmlElement>(doc, "scanning-ui") {
            dom::set_timeout(1500, move || {
                dom::set_style(&scanning, "opacity", "0");
                dom::set_style(&scanning, "transition", "opacity 0.5s ease");
            });
        }
        log::info!("[exterior] model loaded");
    });

    let doc = page.document.clone();
    listen(&page.viewer, "error", move |ev| {
        log::error!("[exterior] model failed: {:?}", detail_field(&ev, "type"));
        overlay::hide_loading(&doc);
        overlay::toast("Model could not be loaded", 3000);
    });

    let doc = page.document.clone();
    listen(&page.viewer, "ar-status", move |ev| {
        let status = detail_field(&ev, "status").and_then(|v| v.as_string());
        log::info!("[exterior] ar-status {:?}", status);
        if matches!(
            status.as_deref(),
            Some("session-started" | "not-presenting" | "failed")
        ) {
            dom::set_hidden_by_id(&doc, "ar-loading-popup", true);
        }
    });

    let p = page.clone();
    dom::add_click_listener(&page.document, "ar-button", move || {
        dom::set_hidden_by_id(&p.document, "ar-loading-popup", false);
        activate_ar(&p.viewer);
    });
}

/// Ask for camera access up front so the AR hand-off does not stall on a prompt.
/// The stream is stopped immediately; only the outcome is logged.
async fn prime_camera_permission() -> anyhow::Result<()> {
    let window = web::window().ok_or_else(|| anyhow::anyhow!("no window"))?;
    let devices = window.navigator().media_devices().map_err(js_err)?;
    let constraints = web::MediaStreamConstraints::new();
    constraints.set_video(&JsValue::TRUE);
    let promise = devices
        .get_user_media_with_constraints(&constraints)
        .map_err(js_err)?;
    let stream: web::MediaStream = JsFuture::from(promise)
        .await
        .map_err(js_err)?
        .dyn_into()
        .map_err(js_err)?;
    for track in stream.get_tracks().iter() {
        if let Ok(track) = track.dyn_into::<web::MediaStreamTrack>() {
            track.stop();
        }
    }
    Ok(())
}

pub fn run(session: Session) -> anyhow::Result<()> {
    let window = web::window().ok_or_else(|| anyhow::anyhow!("no window"))?;
    let document = dom::window_document().ok_or_else(|| anyhow::anyhow!("no document"))?;
    if !window.is_secure_context() {
        log::warn!("[exterior] insecure context; AR may be unavailable");
        overlay::insecure_context_banner(&document);
    }

    let exterior = session
        .project
        .exterior
        .clone()
        .ok_or_else(|| ProjectError::NoExterior(session.project_id.clone()))?;
    let viewer = document
        .get_element_by_id("model-viewer")
        .ok_or_else(|| anyhow::anyhow!("missing #model-viewer"))?;

    let start = exterior.variant_index(session.query.variant.as_deref());
    let page = Rc::new(ExteriorPage {
        exterior,
        document,
        viewer,
        current: Cell::new(start),
        platform: Platform::from_user_agent(&dom::user_agent()),
        session,
    });

    wire_viewer_events(&page);
    wire_variant_strip(&page);
    load_variant(&page, start);

    spawn_local(async {
        match prime_camera_permission().await {
            Ok(()) => log::info!("[exterior] camera permission granted"),
            Err(e) => log::warn!("[exterior] camera permission not granted: {:?}", e),
        }
    });
    Ok(())
}
