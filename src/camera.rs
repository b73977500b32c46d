//! Camera transform, panning and bounds clamping.
//!
//! The camera maps between screen space (pixels from the viewport's top-left
//! corner) and world space. `target` is the world point shown at `offset`, the
//! viewport centre.

use crate::error::CanvasError;
use eframe::egui::{emath::Rot2, Pos2, Rect, Vec2};

/// The view transform of the canvas.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Camera {
    /// World point displayed at `offset`
    pub target: Pos2,
    /// Viewport centre in screen pixels
    pub offset: Pos2,
    /// Scale from world units to pixels (1.0 = one unit per pixel)
    pub zoom: f32,
    /// Rotation in degrees, kept at 0 by the canvas
    pub rotation: f32,
}

impl Camera {
    /// Creates a camera centred on the world origin at zoom 1.
    ///
    /// # Arguments
    ///
    /// * `viewport_size` - Size of the viewport in pixels
    pub fn new(viewport_size: Vec2) -> Self {
        Self {
            target: Pos2::ZERO,
            offset: (viewport_size * 0.5).to_pos2(),
            zoom: 1.0,
            rotation: 0.0,
        }
    }

    fn rotation(&self) -> Rot2 {
        Rot2::from_angle(self.rotation.to_radians())
    }

    /// Converts screen coordinates to world coordinates.
    pub fn screen_to_world(&self, screen_pos: Pos2) -> Pos2 {
        let scaled = (screen_pos - self.offset) / self.zoom;
        self.target + self.rotation().inverse() * scaled
    }

    /// Converts world coordinates to screen coordinates.
    pub fn world_to_screen(&self, world_pos: Pos2) -> Pos2 {
        self.offset + (self.rotation() * (world_pos - self.target)) * self.zoom
    }

    /// Moves `offset` to the centre of a resized viewport.
    pub fn recenter(&mut self, viewport_size: Vec2) {
        self.offset = (viewport_size * 0.5).to_pos2();
    }

    /// Grab-to-pan: moves the target opposite to the pointer while the primary
    /// button is held.
    ///
    /// # Arguments
    ///
    /// * `previous` - Pointer position in screen space last frame
    /// * `current` - Pointer position in screen space this frame
    /// * `primary_down` - Whether the primary button is held
    ///
    /// # Returns
    ///
    /// `true` if the camera panned.
    pub fn pan(&mut self, previous: Pos2, current: Pos2, primary_down: bool) -> bool {
        if !primary_down {
            return false;
        }
        let delta = previous - current;
        self.target = self.screen_to_world(self.offset + delta);
        true
    }

    /// World-space rectangle covered by a viewport of the given size.
    pub fn visible_world_rect(&self, viewport_size: Vec2) -> Rect {
        Rect::from_two_pos(
            self.screen_to_world(Pos2::ZERO),
            self.screen_to_world(viewport_size.to_pos2()),
        )
    }

    /// Shifts the target so the viewport never shows anything outside
    /// `-xmax..xmax` by `-ymax..ymax`.
    ///
    /// An axis on which the viewport is at least as wide as the world is
    /// centred on the origin instead. Calling this twice in a row leaves the
    /// target where the first call put it.
    pub fn clamp_to_world(&mut self, xmax: f32, ymax: f32, viewport_size: Vec2) {
        let visible = self.visible_world_rect(viewport_size);
        self.target.x = clamp_axis(self.target.x, visible.min.x, visible.max.x, xmax);

        let visible = self.visible_world_rect(viewport_size);
        self.target.y = clamp_axis(self.target.y, visible.min.y, visible.max.y, ymax);
    }

    /// Changes the zoom while keeping the world point under `screen_anchor` fixed.
    pub fn zoom_at(&mut self, screen_anchor: Pos2, zoom: f32) -> Result<(), CanvasError> {
        if !zoom.is_finite() || zoom <= 0.0 {
            return Err(CanvasError::InvalidZoom(zoom));
        }
        let before = self.screen_to_world(screen_anchor);
        self.zoom = zoom;
        let after = self.screen_to_world(screen_anchor);
        self.target += before - after;
        Ok(())
    }
}

fn clamp_axis(target: f32, low: f32, high: f32, max: f32) -> f32 {
    if high - low >= 2.0 * max {
        0.0
    } else if low < -max {
        target - (low + max)
    } else if high > max {
        target - (high - max)
    } else {
        target
    }
}
