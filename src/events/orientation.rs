use crate::core::{OrientationController, OrientationSample};
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_futures::JsFuture;
use web_sys as web;

fn reflect_get(target: &JsValue, key: &str) -> Option<JsValue> {
    js_sys::Reflect::get(target, &JsValue::from_str(key))
        .ok()
        .filter(|v| !v.is_undefined() && !v.is_null())
}

/// Decide whether the gyroscope may drive the camera.
///
/// iOS 13+ exposes `DeviceOrientationEvent.requestPermission()`, which must be
/// called from a user gesture. Other browsers with the event need no prompt, even
/// without a sensor, so `true` only arms the gyroscope; drag stays active until a
/// real reading arrives. Never fails: any error means manual drag.
pub async fn request_orientation_permission() -> bool {
    let Some(window) = web::window() else {
        return false;
    };
    let Some(ctor) = reflect_get(&window, "DeviceOrientationEvent") else {
        log::info!("[orientation] no DeviceOrientationEvent, using drag");
        return false;
    };
    let Some(request) = reflect_get(&ctor, "requestPermission")
        .and_then(|f| f.dyn_into::<js_sys::Function>().ok())
    else {
        return true;
    };
    let promise = match request.call0(&ctor) {
        Ok(p) => js_sys::Promise::from(p),
        Err(e) => {
            log::warn!("[orientation] requestPermission threw: {:?}", e);
            return false;
        }
    };
    match JsFuture::from(promise).await {
        Ok(v) => {
            let granted = v.as_string().as_deref() == Some("granted");
            log::info!("[orientation] permission {:?}", v.as_string());
            granted
        }
        Err(e) => {
            log::warn!("[orientation] permission denied: {:?}", e);
            false
        }
    }
}

/// Feed `deviceorientation` events into the controller; `on_heading` receives the
/// normalised compass heading after each accepted sample.
pub fn wire_device_orientation(
    controller: Rc<RefCell<OrientationController>>,
    mut on_heading: impl FnMut(f64) + 'static,
) {
    let closure = Closure::wrap(Box::new(move |ev: web::DeviceOrientationEvent| {
        let compass = reflect_get(ev.as_ref(), "webkitCompassHeading").and_then(|v| v.as_f64());
        let Some(sample) = OrientationSample::from_device(ev.alpha(), ev.beta(), compass) else {
            return;
        };
        let heading = {
            let mut c = controller.borrow_mut();
            if !c.apply_sample(sample) {
                return;
            }
            c.state().compass_heading
        };
        on_heading(heading);
    }) as Box<dyn FnMut(_)>);
    if let Some(w) = web::window() {
        _ = w.add_event_listener_with_callback_and_bool(
            "deviceorientation",
            closure.as_ref().unchecked_ref(),
            true,
        );
    }
    closure.forget();
}
