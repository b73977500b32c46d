//! # Node Canvas
//!
//! A pannable, zoomable 2-D canvas hosting a fixed-bounds world of draggable,
//! rectangular nodes.
//!
//! ## Features
//! - Hover selection with first-inserted-wins hit testing
//! - Node dragging clamped to the world's bounds
//! - Grab-to-pan camera that never shows anything outside the world
//! - Scroll-wheel zoom around the pointer
//! - Node removal with the `Delete` key
//! - JSON startup configuration for the window, grid and initial nodes
//!
//! The core ([`World`], [`Camera`], [`FrameController`]) has no window
//! dependency; the eframe host lives in a private `ui` module.

#![warn(missing_docs)]
#![deny(unsafe_code)]

mod camera;
mod config;
mod constants;
mod error;
mod frame;
mod types;
mod ui;
mod world;

// Re-export public types and functions
pub use camera::Camera;
pub use config::{CanvasConfig, NodeConfig, WindowConfig};
pub use error::CanvasError;
pub use frame::{min_zoom_for, FrameController, FrameInput, Interaction};
pub use types::*;
pub use world::World;
use ui::CanvasApp;

/// Runs the canvas application with the given startup configuration.
///
/// This function validates the configuration, opens the window and starts the
/// main event loop. It returns when the window is closed.
///
/// # Returns
///
/// Returns `Ok(())` if the application runs successfully, or a
/// [`CanvasError`] if the configuration is invalid or the window fails to start.
///
/// # Example
///
/// ```no_run
/// use node_canvas::{run_app, CanvasConfig};
///
/// fn main() -> Result<(), node_canvas::CanvasError> {
///     run_app(CanvasConfig::default())
/// }
/// ```
pub fn run_app(config: CanvasConfig) -> Result<(), CanvasError> {
    let mut app = CanvasApp::from_config(&config)?;
    log::info!(
        "starting canvas: {} node(s), world bounds ±{}x±{}",
        app.world.nodes().len(),
        app.world.xmax(),
        app.world.ymax()
    );

    let options = eframe::NativeOptions {
        viewport: eframe::egui::ViewportBuilder::default()
            .with_title(config.window.title.clone())
            .with_inner_size([config.window.width, config.window.height])
            .with_resizable(true),
        ..Default::default()
    };
    eframe::run_native(
        &config.window.title,
        options,
        Box::new(move |cc| {
            app.restore_from_storage(cc.storage);
            Ok(Box::new(app))
        }),
    )?;
    log::info!("canvas closed");
    Ok(())
}
