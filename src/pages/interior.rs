use super::Session;
use crate::core::{
    on_click, strip_view, ControlMode, LoadTicket, OrientationController, PanoramaLoads,
    PanoramaStatus, ProjectError, Room, SelectorItem,
};
use crate::frame::{self, FrameContext, SharedGpu};
use crate::overlay;
use crate::render::texture::decode_panorama;
use crate::{assets, dom, events, ui};
use std::cell::{Cell, RefCell};
use std::rc::Rc;
use wasm_bindgen_futures::spawn_local;
use web_sys as web;

// Used when WebGPU is unavailable and the device limit is unknown
const FALLBACK_MAX_TEXTURE_DIM: u32 = 8192;

/// Everything the interior view shares between callbacks.
struct InteriorPage {
    session: Session,
    document: web::Document,
    rooms: Vec<Room>,
    loads: RefCell<PanoramaLoads>,
    /// Room the selector highlights; follows successful loads.
    current: Cell<usize>,
    controller: Rc<RefCell<OrientationController>>,
    gpu: SharedGpu,
}

impl InteriorPage {
    fn selector_items(&self) -> Vec<SelectorItem> {
        self.rooms
            .iter()
            .map(|r| SelectorItem {
                label: r.name.clone(),
                image_url: self.session.project.asset_url(r.thumbnail_file()),
            })
            .collect()
    }
}

fn render_room_strip(page: &InteriorPage) {
    let thumbs = strip_view(&page.selector_items(), page.current.get(), "Viewing");
    ui::render_strip(&page.document, "room-selector", "room", &thumbs);
}

fn wire_room_strip(page: &Rc<InteriorPage>) {
    let p = page.clone();
    ui::wire_strip(&page.document, "room-selector", page.rooms.len(), move |i| {
        if let Some(next) = on_click(p.current.get(), i, p.rooms.len()) {
            load_room(&p, next);
        }
    });
}

fn load_room(page: &Rc<InteriorPage>, index: usize) {
    let Some(room) = page.rooms.get(index).cloned() else {
        return;
    };
    let url = page.session.project.asset_url(&room.tex);
    let ticket = page.loads.borrow_mut().request(index);
    log::info!("[panorama] loading room {} ({}) #{}", room.id, url, ticket.id());
    overlay::show_loading(&page.document);

    let page = page.clone();
    spawn_local(async move {
        let p = page.clone();
        let fetched = assets::fetch_bytes_with_progress(&url, move |pct| {
            if p.loads.borrow().is_current(ticket) {
                overlay::set_progress(&p.document, pct);
            }
        })
        .await;
        if !page.loads.borrow().is_current(ticket) {
            log::debug!("[panorama] dropping stale load #{}", ticket.id());
            return;
        }
        let max_dim = page
            .gpu
            .borrow()
            .as_ref()
            .map(|g| g.max_texture_dim())
            .unwrap_or(FALLBACK_MAX_TEXTURE_DIM);
        let decoded = fetched.and_then(|bytes| decode_panorama(&bytes, max_dim));
        finish_load(&page, ticket, index, &room, decoded);
    });
}

fn finish_load(
    page: &Rc<InteriorPage>,
    ticket: LoadTicket,
    index: usize,
    room: &Room,
    decoded: anyhow::Result<crate::render::texture::PanoramaImage>,
) {
    match decoded {
        Ok(img) => {
            if !page.loads.borrow_mut().complete(ticket, index) {
                return;
            }
            match page.gpu.borrow_mut().as_mut() {
                Some(gpu) => gpu.set_panorama(&img),
                None => log::warn!("[panorama] no GPU; room {} not drawn", room.id),
            }
            let shown = page.loads.borrow().shown();
            page.current.set(shown.unwrap_or(index));
            overlay::hide_loading(&page.document);
            dom::set_text(&page.document, "current-room-label", &room.name);
            ui::update_user_marker(&page.document, &room.map_coords);
            render_room_strip(page);
            log::info!("[panorama] room {} ready ({}x{})", room.id, img.width, img.height);
        }
        Err(e) => {
            if !page.loads.borrow_mut().fail(ticket, index) {
                return;
            }
            // Previous texture stays bound to the sphere
            let kept = match page.loads.borrow().status() {
                PanoramaStatus::Failed { shown, .. } => shown.and_then(|i| page.rooms.get(i)),
                _ => None,
            };
            log::error!(
                "[panorama] room {} failed: {:?}; still showing {:?}",
                room.id,
                e,
                kept.map(|r| r.id.as_str())
            );
            overlay::hide_loading(&page.document);
            dom::set_text(
                &page.document,
                "current-room-label",
                &format!("{} (failed to load)", room.name),
            );
            overlay::toast("Panorama could not be loaded", 3000);
        }
    }
}

/// Only the first choice counts; a late permission answer after "skip" is ignored.
fn choose_mode(page: &Rc<InteriorPage>, mode: ControlMode) {
    if !page.controller.borrow_mut().choose_mode(mode) {
        log::debug!("[orientation] control mode already chosen, ignoring {:?}", mode);
        return;
    }
    // Drag keeps working until the sensor delivers a real reading
    if mode == ControlMode::Gyroscope {
        let doc = page.document.clone();
        events::wire_device_orientation(page.controller.clone(), move |heading| {
            ui::update_compass(&doc, heading);
        });
    }
    dom::set_hidden_by_id(&page.document, "permission-screen", true);
}

fn wire_permission_buttons(page: &Rc<InteriorPage>) {
    let p = page.clone();
    dom::add_click_listener(&page.document, "btn-start-experience", move || {
        let p = p.clone();
        spawn_local(async move {
            let granted = events::request_orientation_permission().await;
            let mode = if granted {
                ControlMode::Gyroscope
            } else {
                log::info!("[orientation] no sensor permission, using drag");
                ControlMode::Drag
            };
            choose_mode(&p, mode);
        });
    });
    let p = page.clone();
    dom::add_click_listener(&page.document, "btn-skip-gyro", move || {
        choose_mode(&p, ControlMode::Drag);
    });
}

pub async fn run(session: Session) -> anyhow::Result<()> {
    let document = dom::window_document().ok_or_else(|| anyhow::anyhow!("no document"))?;
    let interior = session
        .project
        .interior
        .clone()
        .filter(|i| !i.rooms.is_empty())
        .ok_or_else(|| ProjectError::NoRooms(session.project_id.clone()))?;

    if let Some(plan) = interior.floorplan_image.as_deref().filter(|s| !s.is_empty()) {
        if let Some(img) = dom::by_id::<web::HtmlImageElement>(&document, "floorplan-img") {
            img.set_src(&session.project.asset_url(plan));
        }
    }

    let canvas: web::HtmlCanvasElement = dom::by_id(&document, "panorama-canvas")
        .ok_or_else(|| anyhow::anyhow!("missing #panorama-canvas"))?;
    dom::wire_canvas_resize(&canvas);

    let controller = Rc::new(RefCell::new(OrientationController::new()));
    events::wire_panorama_drag(&canvas, controller.clone());

    let gpu: SharedGpu = Rc::new(RefCell::new(frame::init_gpu(&canvas).await));
    if gpu.borrow().is_none() {
        overlay::toast("3D view is not supported on this browser", 4000);
    }

    let start = interior.start_room_index(session.query.room.as_deref());
    let page = Rc::new(InteriorPage {
        document: document.clone(),
        rooms: interior.rooms,
        loads: RefCell::new(PanoramaLoads::new()),
        current: Cell::new(start),
        controller: controller.clone(),
        gpu: gpu.clone(),
        session,
    });

    let frame_ctx = Rc::new(RefCell::new(FrameContext {
        controller,
        canvas,
        gpu,
        view_cone: dom::by_id(&document, "view-cone"),
        cursor_mode: None,
    }));
    frame::start_loop(frame_ctx);

    wire_permission_buttons(&page);
    wire_room_strip(&page);
    render_room_strip(&page);
    load_room(&page, start);
    Ok(())
}
