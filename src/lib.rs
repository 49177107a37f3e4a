#![cfg(target_arch = "wasm32")]
use crate::config::{PageConfig, PageKind};
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::spawn_local;

mod assets;
mod camera;
mod config;
mod constants;
mod core;
mod dom;
mod events;
mod frame;
mod input;
mod overlay;
mod pages;
mod render;
mod ui;

#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    console_error_panic_hook::set_once();
    console_log::init_with_level(log::Level::Info).ok();
    log::info!("estate-view-web starting");

    spawn_local(async move {
        if let Err(e) = init().await {
            // Everything that reaches here leaves the page without a usable view
            overlay::fatal(&format!("Error: {e}"));
        }
    });
    Ok(())
}

async fn init() -> anyhow::Result<()> {
    let document = dom::window_document().ok_or_else(|| anyhow::anyhow!("no document"))?;
    let cfg = PageConfig::from_document(&document)?;
    log::info!("[init] page {:?}, catalog {}", cfg.page, cfg.catalog_url);

    let session = pages::Session::open(&cfg).await?;
    match cfg.page {
        PageKind::Select => pages::select::run(session),
        PageKind::Interior => pages::interior::run(session).await,
        PageKind::Exterior => pages::exterior::run(session),
    }
}
