//! Ambient motion engine.
//!
//! Pointer and scroll signals are sampled into framework-free stores; a
//! procedural noise field, a particle pool and a spring-driven cursor read
//! those stores from their own throttled animation loops and paint directly
//! to canvas/DOM overlays.
//!
//! `core`, `config` and `constants` are plain Rust and build on every target
//! (the host-side tests use them directly). Everything that touches the DOM
//! is wasm-only.

pub mod config;
pub mod constants;
pub mod core;
pub mod error;

#[cfg(target_arch = "wasm32")]
mod dom;
#[cfg(target_arch = "wasm32")]
mod events;
#[cfg(target_arch = "wasm32")]
mod frame;
#[cfg(target_arch = "wasm32")]
mod provider;
#[cfg(target_arch = "wasm32")]
mod render;

#[cfg(target_arch = "wasm32")]
pub use provider::{mount, JsSubscription, MotionHandle, MotionProvider};

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen::prelude::wasm_bindgen(start)]
pub fn start() -> Result<(), wasm_bindgen::JsValue> {
    console_error_panic_hook::set_once();
    console_log::init_with_level(log::Level::Info).ok();
    log::info!("ambient-motion ready");
    Ok(())
}
