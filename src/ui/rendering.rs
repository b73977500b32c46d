//! Canvas rendering for the grid and nodes.
//!
//! Drawing goes through [`CanvasRenderer`], whose primitives take world
//! coordinates. [`EguiRenderer`] maps them onto an `egui::Painter` through the
//! camera; tests substitute a recording renderer.

use crate::camera::Camera;
use crate::constants::*;
use crate::types::CanvasNode;
use crate::world::World;
use eframe::egui;
use eframe::epaint::StrokeKind;

/// Drawing primitives used by the canvas, in world coordinates.
pub trait CanvasRenderer {
    /// Draws a one-pixel line.
    fn draw_line(&mut self, from: egui::Pos2, to: egui::Pos2, color: egui::Color32);
    /// Fills a rectangle with rounded corners.
    fn draw_rounded_rect(&mut self, rect: egui::Rect, radius: f32, color: egui::Color32);
    /// Strokes the outline of a rectangle with rounded corners.
    fn draw_rounded_rect_outline(
        &mut self,
        rect: egui::Rect,
        radius: f32,
        thickness: f32,
        color: egui::Color32,
    );
    /// Draws text with its top-left corner at `pos`.
    fn draw_text(&mut self, text: &str, pos: egui::Pos2, size: f32, color: egui::Color32);
}

/// Renders onto an egui painter through the camera transform.
pub struct EguiRenderer<'a> {
    painter: &'a egui::Painter,
    camera: &'a Camera,
    /// Screen position of the viewport's top-left corner
    origin: egui::Pos2,
}

impl<'a> EguiRenderer<'a> {
    /// Creates a renderer for a canvas whose top-left corner is at `origin`.
    pub fn new(painter: &'a egui::Painter, camera: &'a Camera, origin: egui::Pos2) -> Self {
        Self {
            painter,
            camera,
            origin,
        }
    }

    fn to_screen(&self, world_pos: egui::Pos2) -> egui::Pos2 {
        self.camera.world_to_screen(world_pos) + self.origin.to_vec2()
    }

    fn rect_to_screen(&self, rect: egui::Rect) -> egui::Rect {
        egui::Rect::from_two_pos(self.to_screen(rect.min), self.to_screen(rect.max))
    }
}

impl CanvasRenderer for EguiRenderer<'_> {
    fn draw_line(&mut self, from: egui::Pos2, to: egui::Pos2, color: egui::Color32) {
        self.painter.line_segment(
            [self.to_screen(from), self.to_screen(to)],
            egui::Stroke::new(1.0, color),
        );
    }

    fn draw_rounded_rect(&mut self, rect: egui::Rect, radius: f32, color: egui::Color32) {
        self.painter
            .rect_filled(self.rect_to_screen(rect), radius * self.camera.zoom, color);
    }

    fn draw_rounded_rect_outline(
        &mut self,
        rect: egui::Rect,
        radius: f32,
        thickness: f32,
        color: egui::Color32,
    ) {
        let zoom = self.camera.zoom;
        self.painter.rect_stroke(
            self.rect_to_screen(rect),
            radius * zoom,
            egui::Stroke::new(thickness * zoom, color),
            StrokeKind::Inside,
        );
    }

    fn draw_text(&mut self, text: &str, pos: egui::Pos2, size: f32, color: egui::Color32) {
        self.painter.text(
            self.to_screen(pos),
            egui::Align2::LEFT_TOP,
            text,
            egui::FontId::proportional(size * self.camera.zoom),
            color,
        );
    }
}

/// Renders the grid (if enabled) and then every node in insertion order.
pub fn render_world(renderer: &mut impl CanvasRenderer, world: &World, show_grid: bool) {
    if show_grid {
        draw_grid(renderer, world);
    }

    let selected = world.selection().index();
    for (index, node) in world.nodes().iter().enumerate() {
        draw_node(renderer, node, selected == Some(index));
    }
}

/// Draws the world grid: vertical then horizontal lines, every major
/// interval in a lighter colour.
pub fn draw_grid(renderer: &mut impl CanvasRenderer, world: &World) {
    let grid = world.grid();
    let (xmax, ymax) = (world.xmax(), world.ymax());
    let line_color = |i: i32| {
        if i.rem_euclid(grid.major_grid_every) == 0 {
            GRID_MAJOR_COLOR
        } else {
            GRID_MINOR_COLOR
        }
    };

    for x in -grid.half_width_squares..grid.half_width_squares {
        let xpos = x as f32 * grid.square_size as f32;
        renderer.draw_line(egui::pos2(xpos, -ymax), egui::pos2(xpos, ymax), line_color(x));
    }

    for y in -grid.half_height_squares..grid.half_height_squares {
        let ypos = y as f32 * grid.square_size as f32;
        renderer.draw_line(egui::pos2(-xmax, ypos), egui::pos2(xmax, ypos), line_color(y));
    }
}

/// Draws one node: body, title bar, outline, title text and, when selected,
/// the selection outline on top.
pub fn draw_node(renderer: &mut impl CanvasRenderer, node: &CanvasNode, is_selected: bool) {
    let rect = node.rect();
    let radius = NODE_ROUNDNESS * rect.width().min(rect.height()) * 0.5;

    renderer.draw_rounded_rect(rect, radius, NODE_BACKGROUND_COLOR);

    // Title bar: rounded on top, squared off where it meets the body.
    let bar_height = NODE_TITLE_BAR_HEIGHT.min(rect.height());
    let bar = egui::Rect::from_min_size(rect.min, egui::vec2(rect.width(), bar_height));
    renderer.draw_rounded_rect(bar, radius, node.title_color);
    let bar_bottom = egui::Rect::from_min_max(
        egui::pos2(rect.min.x, rect.min.y + bar_height * 0.5),
        egui::pos2(rect.max.x, rect.min.y + bar_height),
    );
    renderer.draw_rounded_rect(bar_bottom, 0.0, node.title_color);

    renderer.draw_rounded_rect_outline(rect, radius, NODE_OUTLINE_THICKNESS, node.title_color);

    let inset = egui::vec2(NODE_TITLE_INSET.0, NODE_TITLE_INSET.1);
    renderer.draw_text(node.title(), rect.min + inset, NODE_TITLE_FONT_SIZE, NODE_TEXT_COLOR);

    if is_selected {
        renderer.draw_rounded_rect_outline(
            rect,
            radius,
            SELECTION_OUTLINE_THICKNESS,
            NODE_SELECTED_COLOR,
        );
    }
}
