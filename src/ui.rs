use crate::constants::MAP_VIEW_CONE_OFFSET_DEG;
use crate::core::{picked_index, Card, MapCoords, Thumb, THUMB_INDEX_ATTR};
use crate::dom;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

fn escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}

/// Attach the one click listener a thumbnail strip needs. It survives every
/// rebuild and calls `on_pick` with the clicked thumb's index; whether that loads
/// anything is the caller's decision.
pub fn wire_strip(
    document: &web::Document,
    container_id: &str,
    len: usize,
    on_pick: impl Fn(usize) + 'static,
) {
    let Some(container) = document.get_element_by_id(container_id) else {
        log::warn!("[ui] missing #{}", container_id);
        return;
    };
    let closure = Closure::wrap(Box::new(move |ev: web::Event| {
        let index = ev
            .target()
            .and_then(|t| t.dyn_into::<web::Element>().ok())
            .and_then(|el| el.closest(&format!("[{THUMB_INDEX_ATTR}]")).ok().flatten())
            .and_then(|btn| picked_index(btn.get_attribute(THUMB_INDEX_ATTR).as_deref(), len));
        if let Some(i) = index {
            on_pick(i);
        }
    }) as Box<dyn FnMut(_)>);
    _ = container.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
    closure.forget();
}

/// Rebuild a thumbnail strip from its view model. Idempotent; clicks are handled
/// by the listener from `wire_strip`.
pub fn render_strip(document: &web::Document, container_id: &str, kind: &str, thumbs: &[Thumb]) {
    let Some(container) = document.get_element_by_id(container_id) else {
        log::warn!("[ui] missing #{}", container_id);
        return;
    };
    container.set_inner_html("");
    for t in thumbs {
        let Ok(btn) = document.create_element("button") else {
            continue;
        };
        btn.set_class_name(&t.button_class(kind));
        let glow = if t.active {
            r#"<div class="absolute -inset-4 bg-primary/20 blur-xl rounded-full opacity-60"></div>"#
        } else {
            ""
        };
        let check = if t.active {
            r#"<div class="check-icon absolute top-1 right-1 bg-primary text-background-dark rounded-full p-0.5 shadow-sm"><span class="material-symbols-outlined text-[14px] font-bold block">check</span></div>"#
        } else {
            ""
        };
        let img_class = if t.active {
            "w-full h-full object-cover opacity-100 scale-110 transition-opacity"
        } else {
            "w-full h-full object-cover opacity-80 group-hover:opacity-100 transition-opacity"
        };
        let caption = t
            .caption
            .as_deref()
            .map(|c| format!(r#"<span class="text-[10px] text-white/50">{}</span>"#, escape(c)))
            .unwrap_or_default();
        btn.set_inner_html(&format!(
            r#"{glow}<div class="{frame}"><img class="{img_class}" src="{src}" alt="{label}"/><div class="floorplan-overlay absolute inset-0"></div>{check}</div><div class="flex flex-col items-center"><span class="{label_class}">{label}</span>{caption}</div>"#,
            frame = t.frame_class(),
            src = escape(&t.image_url),
            label = escape(&t.label),
            label_class = t.label_class(),
        ));
        _ = btn.set_attribute(THUMB_INDEX_ATTR, &t.index.to_string());
        _ = container.append_child(&btn);
    }
}

/// Build one swipe card element (not yet attached).
pub fn build_card(document: &web::Document, card: &Card, key: usize) -> Option<web::HtmlElement> {
    let el = document
        .create_element("div")
        .ok()?
        .dyn_into::<web::HtmlElement>()
        .ok()?;
    el.set_class_name("stack-card group");
    _ = el.set_attribute("data-key", &key.to_string());
    el.set_inner_html(&format!(
        r#"<div class="absolute inset-0 z-0 bg-cover bg-center transition-transform duration-700 group-hover:scale-105" style="background-image: url('{image}');"></div>
<div class="absolute inset-0 z-10 bg-gradient-to-t from-black/90 via-black/40 to-transparent"></div>
<div class="relative z-20 flex h-full flex-col justify-between p-5 pointer-events-none">
  <div class="self-end rounded-full bg-white/20 backdrop-blur-sm p-2 text-white opacity-0 group-hover:opacity-100 transition-opacity duration-300"><span class="material-symbols-outlined text-xl">arrow_outward</span></div>
  <div>
    <div class="flex items-center gap-2 mb-2"><span class="material-symbols-outlined text-primary text-2xl">{icon}</span><span class="text-xs font-bold uppercase tracking-wider text-primary">{subtitle}</span></div>
    <h3 class="text-2xl font-bold text-white font-display mb-1">{title}</h3>
    <p class="text-sm text-slate-300 font-body line-clamp-2">{desc}</p>
  </div>
</div>"#,
        image = escape(&card.image_url),
        icon = escape(&card.icon),
        subtitle = escape(&card.subtitle),
        title = escape(&card.title),
        desc = escape(&card.desc),
    ));
    Some(el)
}

/// Needle turns opposite to the heading so it keeps pointing north.
pub fn update_compass(document: &web::Document, heading_deg: f64) {
    if let Some(needle) = dom::by_id::<web::HtmlElement>(document, "compass-needle") {
        dom::set_style(&needle, "transform", &format!("rotate({}deg)", -heading_deg));
    }
}

pub fn update_view_cone(cone: &web::HtmlElement, lon_deg: f64) {
    dom::set_style(
        cone,
        "transform",
        &format!(
            "translate(-50%, -50%) rotate({}deg)",
            -lon_deg + MAP_VIEW_CONE_OFFSET_DEG
        ),
    );
}

pub fn update_user_marker(document: &web::Document, coords: &MapCoords) {
    if let Some(marker) = dom::by_id::<web::HtmlElement>(document, "user-marker") {
        dom::set_style(&marker, "left", &format!("{}%", coords.x));
        dom::set_style(&marker, "top", &format!("{}%", coords.y));
    }
}
