use crate::core::{percent, Catalog};
use instant::Instant;
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_futures::JsFuture;
use web_sys as web;

thread_local! {
    // One descriptor fetch per page session
    static CATALOG: RefCell<Option<Rc<Catalog>>> = const { RefCell::new(None) };
}

#[inline]
pub fn js_err(e: JsValue) -> anyhow::Error {
    anyhow::anyhow!("{:?}", e)
}

/// Fetch and parse the project catalog, or return the cached copy.
pub async fn load_catalog(url: &str) -> anyhow::Result<Rc<Catalog>> {
    if let Some(c) = CATALOG.with(|c| c.borrow().clone()) {
        return Ok(c);
    }
    let t0 = Instant::now();
    let text = fetch_text(url).await?;
    let catalog = Rc::new(Catalog::from_json(&text)?);
    log::info!(
        "[assets] catalog {} loaded: {} projects in {:?}",
        url,
        catalog.len(),
        t0.elapsed()
    );
    CATALOG.with(|c| *c.borrow_mut() = Some(catalog.clone()));
    Ok(catalog)
}

pub async fn fetch_text(url: &str) -> anyhow::Result<String> {
    let window = web::window().ok_or_else(|| anyhow::anyhow!("no window"))?;
    let resp_value = JsFuture::from(window.fetch_with_str(url))
        .await
        .map_err(js_err)?;
    let resp: web::Response = resp_value.dyn_into().map_err(js_err)?;
    if !resp.ok() {
        anyhow::bail!("HTTP {} for {}", resp.status(), url);
    }
    let text = JsFuture::from(resp.text().map_err(js_err)?)
        .await
        .map_err(js_err)?;
    text.as_string()
        .ok_or_else(|| anyhow::anyhow!("non-text body for {}", url))
}

/// GET `url` as bytes, reporting percent complete while the body streams in.
///
/// Uses XHR rather than fetch because it exposes progress events.
pub async fn fetch_bytes_with_progress(
    url: &str,
    mut on_progress: impl FnMut(f64) + 'static,
) -> anyhow::Result<Vec<u8>> {
    let xhr = web::XmlHttpRequest::new().map_err(js_err)?;
    xhr.open_with_async("GET", url, true).map_err(js_err)?;
    xhr.set_response_type(web::XmlHttpRequestResponseType::Arraybuffer);

    let progress = Closure::wrap(Box::new(move |ev: web::ProgressEvent| {
        if ev.length_computable() {
            if let Some(p) = percent(ev.loaded(), ev.total()) {
                on_progress(p);
            }
        }
    }) as Box<dyn FnMut(_)>);
    xhr.set_onprogress(Some(progress.as_ref().unchecked_ref()));

    let xhr_done = xhr.clone();
    let finished = js_sys::Promise::new(&mut |resolve, _reject| {
        // loadend fires exactly once after load, error or abort
        let cb = Closure::once_into_js(move || {
            _ = resolve.call0(&JsValue::NULL);
        });
        xhr_done.set_onloadend(Some(cb.unchecked_ref()));
    });
    xhr.send().map_err(js_err)?;
    JsFuture::from(finished).await.map_err(js_err)?;
    xhr.set_onprogress(None);
    drop(progress);

    let status = xhr.status().map_err(js_err)?;
    if !(200..300).contains(&status) {
        anyhow::bail!("HTTP {} for {}", status, url);
    }
    let body = xhr.response().map_err(js_err)?;
    if body.is_null() || body.is_undefined() {
        anyhow::bail!("empty body for {}", url);
    }
    Ok(js_sys::Uint8Array::new(&body).to_vec())
}

/// Warm the HTTP cache for a large asset; the result is only logged.
pub fn prefetch(url: String) {
    wasm_bindgen_futures::spawn_local(async move {
        let Some(window) = web::window() else {
            return;
        };
        let init = web::RequestInit::new();
        init.set_mode(web::RequestMode::Cors);
        init.set_cache(web::RequestCache::ForceCache);
        match JsFuture::from(window.fetch_with_str_and_init(&url, &init)).await {
            Ok(_) => log::info!("[assets] preloaded {}", url),
            Err(e) => log::warn!("[assets] preload failed for {}: {:?}", url, e),
        }
    });
}
