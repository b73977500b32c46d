//! Canvas interaction: input sampling and the per-frame canvas pass.
//!
//! egui reports pointer positions in window coordinates; the canvas works in
//! screen space relative to its own top-left corner, so positions are shifted
//! by the canvas rect before they reach the frame controller.

use super::rendering::{render_world, EguiRenderer};
use super::state::CanvasApp;
use crate::frame::{FrameInput, Interaction};
use crate::types::PointerState;
use eframe::egui;

impl CanvasApp {
    /// Samples this frame's pointer, button, scroll and viewport state.
    ///
    /// When egui has no pointer position (the pointer left the window) the
    /// previous frame's position is reused so panning does not jump.
    ///
    /// # Arguments
    ///
    /// * `ui` - The egui UI context
    /// * `canvas_rect` - The screen-space rectangle of the canvas area
    pub fn sample_frame_input(&self, ui: &egui::Ui, canvas_rect: egui::Rect) -> FrameInput {
        let fallback = self.controller.previous_pointer().unwrap_or(egui::Pos2::ZERO);
        ui.input(|i| {
            let screen_pos = i
                .pointer
                .latest_pos()
                .map(|pos| (pos - canvas_rect.min).to_pos2())
                .unwrap_or(fallback);
            let hovered = i
                .pointer
                .hover_pos()
                .is_some_and(|pos| canvas_rect.contains(pos));
            FrameInput {
                pointer: PointerState {
                    screen_pos,
                    primary_down: i.pointer.primary_down(),
                    primary_pressed: i.pointer.primary_pressed(),
                },
                viewport_size: canvas_rect.size(),
                scroll_delta: if hovered { i.smooth_scroll_delta.y } else { 0.0 },
            }
        })
    }

    /// Runs one frame of canvas interaction and paints the result.
    pub fn draw_canvas(&mut self, ui: &mut egui::Ui) {
        let (response, painter) =
            ui.allocate_painter(ui.available_size(), egui::Sense::click_and_drag());
        let canvas_rect = response.rect;

        let input = self.sample_frame_input(ui, canvas_rect);
        let interaction = self
            .controller
            .step(&mut self.world, &mut self.camera, &input);
        self.view.zoom = self.camera.zoom;

        if interaction != self.last_interaction {
            log::trace!("interaction: {:?} -> {:?}", self.last_interaction, interaction);
            self.last_interaction = interaction;
        }
        match interaction {
            Interaction::Dragging | Interaction::Panning => {
                ui.ctx().set_cursor_icon(egui::CursorIcon::Grabbing)
            }
            Interaction::Hovering => ui.ctx().set_cursor_icon(egui::CursorIcon::Grab),
            Interaction::Idle => {}
        }

        let mut renderer = EguiRenderer::new(&painter, &self.camera, canvas_rect.min);
        render_world(&mut renderer, &self.world, self.view.show_grid);
    }
}
