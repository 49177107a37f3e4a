use crate::camera::{aspect_of, Camera};
use crate::constants::CAMERA_ORBIT_RADIUS;
use crate::core::{ControlMode, OrientationController};
use crate::render;
use crate::{dom, ui};
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

pub type SharedGpu = Rc<RefCell<Option<render::GpuState<'static>>>>;

/// Per-frame state of the interior view: reads the latest orientation and draws.
pub struct FrameContext {
    pub controller: Rc<RefCell<OrientationController>>,
    pub canvas: web::HtmlCanvasElement,
    pub gpu: SharedGpu,
    pub view_cone: Option<web::HtmlElement>,
    /// Mode the canvas cursor was last styled for.
    pub cursor_mode: Option<ControlMode>,
}

impl FrameContext {
    pub fn frame(&mut self) {
        let (state, mode) = {
            let c = self.controller.borrow();
            (c.state(), c.mode())
        };
        // The gyroscope can take over mid-session on its first real reading
        if self.cursor_mode != Some(mode) {
            let cursor = match mode {
                ControlMode::Drag => "grab",
                ControlMode::Gyroscope => "default",
            };
            dom::set_style(&self.canvas, "cursor", cursor);
            self.cursor_mode = Some(mode);
        }
        if let Some(cone) = &self.view_cone {
            ui::update_view_cone(cone, state.lon);
        }

        let mut gpu_ref = self.gpu.borrow_mut();
        let Some(gpu) = gpu_ref.as_mut() else {
            return;
        };
        let (w, h) = (self.canvas.width(), self.canvas.height());
        gpu.resize_if_needed(w, h);
        let eye = self.controller.borrow().camera_position(CAMERA_ORBIT_RADIUS);
        let camera = Camera::looking_at_origin(eye, aspect_of(w, h));
        match gpu.render(&camera) {
            Ok(()) => {}
            Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => gpu.reconfigure(),
            Err(e) => log::warn!("[panorama] render error: {:?}", e),
        }
    }
}

pub async fn init_gpu(canvas: &web::HtmlCanvasElement) -> Option<render::GpuState<'static>> {
    // leak a canvas clone to satisfy 'static lifetime for surface
    let leaked_canvas = Box::leak(Box::new(canvas.clone()));
    match render::GpuState::new(leaked_canvas).await {
        Ok(g) => Some(g),
        Err(e) => {
            log::error!("WebGPU init error: {:?}", e);
            None
        }
    }
}

pub fn start_loop(frame_ctx: Rc<RefCell<FrameContext>>) {
    let tick: Rc<RefCell<Option<Closure<dyn FnMut()>>>> = Rc::new(RefCell::new(None));
    let tick_clone = tick.clone();
    *tick.borrow_mut() = Some(Closure::wrap(Box::new(move || {
        frame_ctx.borrow_mut().frame();
        if let (Some(w), Some(cb)) = (web::window(), tick_clone.borrow().as_ref()) {
            _ = w.request_animation_frame(cb.as_ref().unchecked_ref());
        }
    }) as Box<dyn FnMut()>));
    if let (Some(w), Some(cb)) = (web::window(), tick.borrow().as_ref()) {
        _ = w.request_animation_frame(cb.as_ref().unchecked_ref());
    }
}
