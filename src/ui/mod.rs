//! User interface host for the canvas.
//!
//! This module wires the core world, camera and frame controller into eframe:
//! it samples egui input, runs one frame of interaction and paints the world.
//!
//! # Module Organization
//!
//! - `state` - The main `CanvasApp` and persisted view settings
//! - `canvas` - Input sampling and the per-frame canvas pass
//! - `rendering` - The renderer abstraction and grid/node drawing

mod canvas;
mod rendering;
mod state;

pub use state::{CanvasApp, ViewSettings, VIEW_SETTINGS_KEY};

use eframe::egui;

impl eframe::App for CanvasApp {
    /// Persist view settings between restarts.
    fn save(&mut self, storage: &mut dyn eframe::Storage) {
        match self.view.to_json() {
            Ok(json) => storage.set_string(VIEW_SETTINGS_KEY, json),
            Err(err) => log::error!("failed to serialize view settings: {err}"),
        }
    }

    /// Main update function called by egui for each frame.
    ///
    /// Handles the grid toggle and delete shortcuts, runs the canvas pass inside a
    /// margin-free central panel and schedules the next repaint at the
    /// configured frame rate.
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.handle_view_shortcuts(ctx);
        self.handle_node_shortcuts(ctx);

        if ctx.input(|i| i.viewport().close_requested()) {
            log::info!("close requested, shutting down");
        }

        egui::CentralPanel::default()
            .frame(egui::Frame::NONE.fill(crate::constants::BACKGROUND_COLOR))
            .show(ctx, |ui| {
                self.draw_canvas(ui);
            });

        ctx.request_repaint_after(self.frame_interval);
    }
}

impl CanvasApp {
    /// Handles keyboard shortcuts that change view settings (`G` toggles the grid).
    pub fn handle_view_shortcuts(&mut self, ctx: &egui::Context) {
        if ctx.input(|i| i.key_pressed(egui::Key::G)) {
            self.view.show_grid = !self.view.show_grid;
            log::debug!("grid {}", if self.view.show_grid { "shown" } else { "hidden" });
        }
    }

    /// `Delete` removes the node under the pointer.
    pub fn handle_node_shortcuts(&mut self, ctx: &egui::Context) {
        if !ctx.input(|i| i.key_pressed(egui::Key::Delete)) {
            return;
        }
        if let Some(index) = self.world.selection().index() {
            if let Some(node) = self.world.remove_node(index) {
                log::info!("deleted node {:?}", node.title());
            }
        }
    }
}
