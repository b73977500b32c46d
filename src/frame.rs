//! Per-frame orchestration of dragging, panning, zooming and clamping.
//!
//! One call to [`FrameController::step`] handles one frame of input. The order
//! is fixed: resize, zoom limits, scroll zoom, world drag/selection, camera
//! pan, camera clamp.
//! Dragging a node always takes priority over panning the camera.

use crate::camera::Camera;
use crate::constants::{MAX_ZOOM, MIN_ZOOM, ZOOM_STEP};
use crate::types::{PointerState, Selection};
use crate::world::World;
use eframe::egui::{Pos2, Vec2};
use log::debug;

/// Input sampled from the host for a single frame.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct FrameInput {
    /// Pointer position and primary button state
    pub pointer: PointerState,
    /// Size of the viewport in pixels
    pub viewport_size: Vec2,
    /// Vertical scroll distance this frame; positive zooms in
    pub scroll_delta: f32,
}

/// What the pointer ended up doing in a frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Interaction {
    /// A node is being dragged
    Dragging,
    /// The camera is being panned
    Panning,
    /// The pointer is over a node without dragging it
    Hovering,
    /// Nothing under the pointer and no button held
    Idle,
}

/// Carries pointer and viewport history between frames.
#[derive(Debug, Clone, Default)]
pub struct FrameController {
    previous_pointer: Option<Pos2>,
    viewport_size: Option<Vec2>,
}

impl FrameController {
    /// Creates a controller with no frame history.
    pub fn new() -> Self {
        Self::default()
    }

    /// Pointer position stored at the end of the last frame.
    pub fn previous_pointer(&self) -> Option<Pos2> {
        self.previous_pointer
    }

    /// Runs one frame of interaction against the world and camera.
    ///
    /// # Arguments
    ///
    /// * `world` - The world whose nodes may be selected or dragged
    /// * `camera` - The camera that may be zoomed, panned and clamped
    /// * `input` - Input sampled for this frame
    ///
    /// # Returns
    ///
    /// The interaction that resulted from this frame's input.
    pub fn step(&mut self, world: &mut World, camera: &mut Camera, input: &FrameInput) -> Interaction {
        let pointer = input.pointer.screen_pos;

        if self.viewport_size != Some(input.viewport_size) {
            debug!("viewport resized to {:?}", input.viewport_size);
            camera.recenter(input.viewport_size);
            self.viewport_size = Some(input.viewport_size);
        }

        // Restored or resized views may sit outside the zoom range.
        self.limit_zoom(world, camera, input.viewport_size);

        if input.scroll_delta != 0.0 {
            self.apply_zoom(world, camera, input);
        }

        let dragging = world.update(&input.pointer, camera);
        let panned = !dragging && {
            let previous = self.previous_pointer.unwrap_or(pointer);
            camera.pan(previous, pointer, input.pointer.primary_down)
        };

        camera.clamp_to_world(world.xmax(), world.ymax(), input.viewport_size);
        self.previous_pointer = Some(pointer);

        if dragging {
            Interaction::Dragging
        } else if panned {
            Interaction::Panning
        } else if world.selection() != Selection::Empty {
            Interaction::Hovering
        } else {
            Interaction::Idle
        }
    }

    fn limit_zoom(&self, world: &World, camera: &mut Camera, viewport_size: Vec2) {
        let floor = min_zoom_for(world, viewport_size);
        let zoom = if camera.zoom.is_finite() {
            camera.zoom.min(MAX_ZOOM).max(floor)
        } else {
            floor
        };
        if zoom != camera.zoom {
            camera.zoom = zoom;
            debug!("zoom limited to {zoom:.3}");
        }
    }

    fn apply_zoom(&self, world: &World, camera: &mut Camera, input: &FrameInput) {
        let step = if input.scroll_delta > 0.0 { ZOOM_STEP } else { -ZOOM_STEP };
        let floor = min_zoom_for(world, input.viewport_size);
        let zoom = (camera.zoom + step).min(MAX_ZOOM).max(floor);
        if (zoom - camera.zoom).abs() > f32::EPSILON && camera.zoom_at(input.pointer.screen_pos, zoom).is_ok() {
            debug!("zoom set to {zoom:.3}");
        }
    }
}

/// Smallest zoom at which the world still covers a viewport of the given size.
pub fn min_zoom_for(world: &World, viewport_size: Vec2) -> f32 {
    let fit_x = viewport_size.x / (2.0 * world.xmax());
    let fit_y = viewport_size.y / (2.0 * world.ymax());
    MIN_ZOOM.max(fit_x).max(fit_y)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{CanvasNode, GridSettings};
    use eframe::egui::{pos2, vec2};

    const VIEWPORT: Vec2 = Vec2::new(800.0, 600.0);

    struct Harness {
        world: World,
        camera: Camera,
        controller: FrameController,
    }

    impl Harness {
        fn new() -> Self {
            let mut world = World::new(GridSettings::default()).unwrap();
            world.add_node(CanvasNode::new("A", vec2(100.0, 100.0)).unwrap());
            world.add_node(
                CanvasNode::new("B", vec2(100.0, 100.0))
                    .unwrap()
                    .with_position(pos2(200.0, 0.0)),
            );
            Self {
                world,
                camera: Camera::new(VIEWPORT),
                controller: FrameController::new(),
            }
        }

        fn frame(&mut self, x: f32, y: f32, primary_down: bool, primary_pressed: bool) -> Interaction {
            self.frame_with_scroll(x, y, primary_down, primary_pressed, 0.0)
        }

        fn frame_with_scroll(
            &mut self,
            x: f32,
            y: f32,
            primary_down: bool,
            primary_pressed: bool,
            scroll_delta: f32,
        ) -> Interaction {
            let input = FrameInput {
                pointer: PointerState {
                    screen_pos: pos2(x, y),
                    primary_down,
                    primary_pressed,
                },
                viewport_size: VIEWPORT,
                scroll_delta,
            };
            self.controller.step(&mut self.world, &mut self.camera, &input)
        }
    }

    // Screen (400, 300) is world (0, 0) with the initial camera.

    #[test]
    fn hovering_selects_node_under_pointer() {
        let mut h = Harness::new();
        assert_eq!(h.frame(450.0, 350.0, false, false), Interaction::Hovering);
        assert_eq!(h.world.selection(), Selection::Node(0));
        assert_eq!(h.frame(100.0, 100.0, false, false), Interaction::Idle);
        assert_eq!(h.world.selection(), Selection::Empty);
    }

    #[test]
    fn dragging_a_node_does_not_pan() {
        let mut h = Harness::new();
        h.frame(450.0, 350.0, false, false);
        assert_eq!(h.frame(450.0, 350.0, true, true), Interaction::Dragging);
        assert_eq!(h.frame(480.0, 370.0, true, false), Interaction::Dragging);

        assert_eq!(h.camera.target, Pos2::ZERO);
        assert_eq!(h.world.node(0).unwrap().position(), pos2(30.0, 20.0));
    }

    #[test]
    fn dragging_over_another_node_keeps_selection() {
        let mut h = Harness::new();
        h.frame(450.0, 350.0, false, false);
        h.frame(450.0, 350.0, true, true);
        h.frame(650.0, 350.0, true, false);

        assert_eq!(h.world.selection(), Selection::Node(0));
    }

    #[test]
    fn dragging_empty_space_pans_camera() {
        let mut h = Harness::new();
        h.frame(100.0, 100.0, false, false);
        h.frame(100.0, 100.0, true, true);
        assert_eq!(h.frame(60.0, 90.0, true, false), Interaction::Panning);

        assert_eq!(h.camera.target, pos2(40.0, 10.0));
        assert_eq!(h.world.node(0).unwrap().position(), Pos2::ZERO);
    }

    #[test]
    fn panning_is_clamped_to_world() {
        let mut h = Harness::new();
        h.frame(0.0, 0.0, false, false);
        h.frame(0.0, 0.0, true, true);
        let mut x = 0.0;
        for _ in 0..50 {
            x += 200.0;
            h.frame(x, 0.0, true, false);
        }

        let visible = h.camera.visible_world_rect(VIEWPORT);
        assert!((visible.min.x + h.world.xmax()).abs() < 1e-2);
    }

    #[test]
    fn resize_recentres_offset() {
        let mut h = Harness::new();
        h.frame(0.0, 0.0, false, false);
        let input = FrameInput {
            pointer: PointerState::default(),
            viewport_size: vec2(1200.0, 900.0),
            scroll_delta: 0.0,
        };
        h.controller.step(&mut h.world, &mut h.camera, &input);
        assert_eq!(h.camera.offset, pos2(600.0, 450.0));
    }

    #[test]
    fn release_ends_drag() {
        let mut h = Harness::new();
        h.frame(450.0, 350.0, false, false);
        h.frame(450.0, 350.0, true, true);
        assert_eq!(h.frame(450.0, 350.0, false, false), Interaction::Hovering);
        assert!(!h.world.is_dragging());
    }

    #[test]
    fn scrolling_zooms_around_pointer() {
        let mut h = Harness::new();
        let before = h.camera.screen_to_world(pos2(500.0, 400.0));
        h.frame_with_scroll(500.0, 400.0, false, false, 10.0);

        assert!((h.camera.zoom - (1.0 + ZOOM_STEP)).abs() < 1e-6);
        let after = h.camera.screen_to_world(pos2(500.0, 400.0));
        assert!((after - before).length() < 1e-3);
    }

    #[test]
    fn zoom_out_stops_before_world_is_smaller_than_viewport() {
        let mut h = Harness::new();
        for _ in 0..200 {
            h.frame_with_scroll(400.0, 300.0, false, false, -10.0);
        }
        let floor = min_zoom_for(&h.world, VIEWPORT);
        assert!((h.camera.zoom - floor).abs() < 1e-6);
        let visible = h.camera.visible_world_rect(VIEWPORT);
        assert!(visible.width() <= 2.0 * h.world.xmax() + 1e-2);
    }

    #[test]
    fn growing_viewport_raises_zoom_to_floor() {
        let mut h = Harness::new();
        for _ in 0..200 {
            h.frame_with_scroll(400.0, 300.0, false, false, -10.0);
        }
        assert!((h.camera.zoom - 0.25).abs() < 1e-6);

        let large = vec2(1600.0, 1200.0);
        let input = FrameInput {
            pointer: PointerState::default(),
            viewport_size: large,
            scroll_delta: 0.0,
        };
        h.controller.step(&mut h.world, &mut h.camera, &input);

        assert!((h.camera.zoom - 0.5).abs() < 1e-6);
        let visible = h.camera.visible_world_rect(large);
        assert!(visible.width() <= 2.0 * h.world.xmax() + 1e-2);
        assert!(visible.height() <= 2.0 * h.world.ymax() + 1e-2);
    }

    #[test]
    fn out_of_range_zoom_is_limited_on_next_frame() {
        let mut h = Harness::new();
        h.camera.zoom = 0.01;
        h.frame(400.0, 300.0, false, false);
        assert_eq!(h.camera.zoom, min_zoom_for(&h.world, VIEWPORT));

        h.camera.zoom = 50.0;
        h.frame(400.0, 300.0, false, false);
        assert_eq!(h.camera.zoom, MAX_ZOOM);
    }
}
