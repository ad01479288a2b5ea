//! SensorBars Web - browser frontend
//!
//! Loads config, sensors and readings from the server, then shows the
//! selected reading as a row of colored 3D bars using Bevy and egui.

mod app;
mod dashboard;
mod network;
mod ui;

use wasm_bindgen::prelude::*;

/// Entry point for WASM module
#[wasm_bindgen(start)]
pub fn main() {
    // Set panic hook for better error messages
    console_error_panic_hook::set_once();

    // Initialize logging with filtering to reduce wgpu noise
    tracing_wasm::set_as_global_default_with_config(
        tracing_wasm::WASMLayerConfigBuilder::new()
            .set_max_level(tracing::Level::WARN)
            .build(),
    );

    app::run();
}
