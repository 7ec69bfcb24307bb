// ==================== Modules ====================
// ┌──────────────────────────────────────────────────────────────┐
// │ browser.rs     │ web_sys wrappers, JS errors -> anyhow        │
// │ engine/        │ geometry, Surface/Renderer, input, loop      │
// │ entity/        │ Entity, Player, Draw + Positioned            │
// │ camera.rs      │ smoothed follow -> scroll offset             │
// │ map.rs         │ scrolled background blit                     │
// │ config.rs      │ scene.json + defaults                        │
// │ scene.rs       │ owns everything, update -> draw per frame    │
// └──────────────────────────────────────────────────────────────┘
pub mod browser;
pub mod camera;
pub mod config;
pub mod engine;
pub mod entity;
pub mod map;
pub mod scene;

use anyhow::Result;
use config::SceneConfig;
use engine::input;
use engine::{AnimationFrames, GameLoop, Renderer};
use map::Map;
use scene::Scene;
use std::rc::Rc;
use wasm_bindgen::prelude::*;

// ==================== Main Functions ====================
/// Main entry for Webassembly module
/// - installs panic hook and console logger
/// - mounts canvas, loads config + background
/// - starts the animation loop
#[wasm_bindgen(start)]
pub fn main_js() -> Result<(), JsValue> {
    // setup better panic messages for debugging
    console_error_panic_hook::set_once();
    init_logging();

    // wasm has no threads, the scene runs as a local task
    browser::spawn_local(async move {
        if let Err(err) = run().await {
            log::error!("Scene failed to start : {:#}", err);
        }
    });

    Ok(())
}

fn init_logging() {
    let level = if cfg!(debug_assertions) {
        log::Level::Debug
    } else {
        log::Level::Info
    };
    // only fails when a logger is already installed
    if console_log::init_with_level(level).is_err() {
        log::warn!("Console logger was already installed");
    }
}

async fn run() -> Result<()> {
    let config = SceneConfig::load(SceneConfig::PATH).await;

    let canvas = browser::mount_canvas()?;
    let renderer = Renderer::new(canvas)?;
    let keys = input::prepare_input()?;

    // a missing background leaves a blank map, the scene still runs
    let background = match engine::load_image(&config.map.image).await {
        Ok(image) => image,
        Err(err) => {
            log::error!("Background unavailable : {:#}", err);
            browser::new_image()?
        }
    };
    let map = Map::new(config.map.size(), background);

    let scene = Scene::new(&config, map, renderer, keys);
    GameLoop::start(scene, Rc::new(AnimationFrames))?;
    log::info!("Scene started");

    Ok(())
}
