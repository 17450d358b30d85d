//! Boxfall core crate.
//!
//! A four-lane falling-box rhythm game: colored boxes scroll down a 480-unit
//! canvas and the player catches them at the finish line with `a s d f`,
//! scoring by timing accuracy. All gameplay is host-agnostic and natively
//! testable; the `web` module binds it to the browser (canvas 2D, keydown,
//! visibilitychange, `HtmlAudioElement`, `requestAnimationFrame`).

use wasm_bindgen::prelude::*;

pub mod audio;
pub mod config;
pub mod engine;
pub mod entity;
pub mod game;
pub mod input;
pub mod store;
pub mod surface;
pub mod ui;
pub mod web;

// Optional small allocator for size (feature gated)
#[cfg(feature = "wee_alloc")]
#[global_allocator]
static ALLOC: wee_alloc::WeeAlloc = wee_alloc::WeeAlloc::INIT;

#[wasm_bindgen(start)]
pub fn wasm_start() {
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();

    #[cfg(target_arch = "wasm32")]
    let _ = console_log::init_with_level(log::Level::Debug);
}

/// Entry point called from the page once the wasm module is loaded.
#[wasm_bindgen]
pub fn start_game() -> Result<(), JsValue> {
    web::start()
}
