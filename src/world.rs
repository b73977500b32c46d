//! The bounded world: node arena, hover selection and node dragging.
//!
//! The world owns every node and keeps each one inside `-xmax..xmax` by
//! `-ymax..ymax`. Selection follows the pointer every frame unless a drag is
//! in progress, in which case the dragged node stays selected.

use crate::camera::Camera;
use crate::error::CanvasError;
use crate::types::*;
use eframe::egui::{Pos2, Vec2};
use log::{debug, trace};

/// Fixed-bounds container of canvas nodes.
#[derive(Debug, Clone)]
pub struct World {
    grid: GridSettings,
    nodes: Vec<CanvasNode>,
    selection: Selection,
    drag: DragState,
}

impl World {
    /// Creates an empty world.
    ///
    /// # Arguments
    ///
    /// * `grid` - Grid layout; its half extents fix the world's bounds
    ///
    /// # Returns
    ///
    /// The world, or an error if any grid setting is not strictly positive.
    pub fn new(grid: GridSettings) -> Result<Self, CanvasError> {
        grid.validate()?;
        Ok(Self {
            grid,
            nodes: Vec::new(),
            selection: Selection::Empty,
            drag: DragState::Idle,
        })
    }

    /// Grid layout of this world.
    pub fn grid(&self) -> &GridSettings {
        &self.grid
    }

    /// Horizontal bound: the world spans `-xmax..xmax`.
    pub fn xmax(&self) -> f32 {
        self.grid.xmax()
    }

    /// Vertical bound: the world spans `-ymax..ymax`.
    pub fn ymax(&self) -> f32 {
        self.grid.ymax()
    }

    /// Adds a node, clamping its position into the world.
    ///
    /// # Returns
    ///
    /// The index of the newly added node.
    pub fn add_node(&mut self, mut node: CanvasNode) -> NodeIndex {
        node.position = self.clamp_position(node.position, node.size());
        self.nodes.push(node);
        self.nodes.len() - 1
    }

    /// Removes the node at `index`.
    ///
    /// Later nodes shift down by one, and the selection follows its node. If
    /// the removed node was selected the selection is cleared and any drag on
    /// it ends.
    ///
    /// # Returns
    ///
    /// The removed node, or `None` if `index` is out of range.
    pub fn remove_node(&mut self, index: NodeIndex) -> Option<CanvasNode> {
        if index >= self.nodes.len() {
            return None;
        }
        match self.selection {
            Selection::Node(selected) if selected == index => {
                self.drag = DragState::Idle;
                self.selection = Selection::Empty;
            }
            Selection::Node(selected) if selected > index => {
                self.selection = Selection::Node(selected - 1);
            }
            _ => {}
        }
        let node = self.nodes.remove(index);
        debug!("removed node {index} ({})", node.title());
        Some(node)
    }

    /// All nodes in insertion order.
    pub fn nodes(&self) -> &[CanvasNode] {
        &self.nodes
    }

    /// The node at `index`, if it exists.
    pub fn node(&self, index: NodeIndex) -> Option<&CanvasNode> {
        self.nodes.get(index)
    }

    /// Current selection.
    pub fn selection(&self) -> Selection {
        self.selection
    }

    /// The selected node, if any.
    pub fn selected_node(&self) -> Option<&CanvasNode> {
        self.selection.index().and_then(|index| self.nodes.get(index))
    }

    /// Current drag state.
    pub fn drag_state(&self) -> DragState {
        self.drag
    }

    /// Whether a node drag is in progress.
    pub fn is_dragging(&self) -> bool {
        matches!(self.drag, DragState::Dragging { .. })
    }

    /// Whether `point` lies strictly inside the world's bounds.
    pub fn in_bounds(&self, point: Pos2) -> bool {
        let (xmax, ymax) = (self.xmax(), self.ymax());
        point.x > -xmax && point.x < xmax && point.y > -ymax && point.y < ymax
    }

    /// Clamps a top-left position so a rectangle of `size` stays inside the world.
    ///
    /// Each axis saturates at `xmax - width` first and `-xmax` last, so a node
    /// wider than the world ends up flush with the left edge.
    pub fn clamp_position(&self, position: Pos2, size: Vec2) -> Pos2 {
        let (xmax, ymax) = (self.xmax(), self.ymax());
        // f32::clamp panics when min > max, which oversized nodes produce.
        Pos2::new(
            position.x.min(xmax - size.x).max(-xmax),
            position.y.min(ymax - size.y).max(-ymax),
        )
    }

    /// Moves a node to `position`, clamped into the world.
    ///
    /// # Returns
    ///
    /// The committed position, or `None` if `index` is out of range.
    pub fn set_node_position(&mut self, index: NodeIndex, position: Pos2) -> Option<Pos2> {
        let size = self.nodes.get(index)?.size();
        let clamped = self.clamp_position(position, size);
        let node = self.nodes.get_mut(index)?;
        node.position = clamped;
        Some(clamped)
    }

    /// Moves a node by `delta` world units, clamped into the world.
    pub fn move_node_by(&mut self, index: NodeIndex, delta: Vec2) -> Option<Pos2> {
        let position = self.nodes.get(index)?.position();
        self.set_node_position(index, position + delta)
    }

    /// Index of the first node, in insertion order, strictly containing `point`.
    pub fn hit_test(&self, point: Pos2) -> Option<NodeIndex> {
        self.nodes.iter().position(|node| node.contains(point))
    }

    /// Recomputes the hover selection from the pointer's world position.
    ///
    /// Overlapping nodes resolve to the earliest inserted one.
    pub fn update_selection(&mut self, pointer_world: Pos2) -> Selection {
        let selection = match self.hit_test(pointer_world) {
            Some(index) => Selection::Node(index),
            None => Selection::Empty,
        };
        if selection != self.selection {
            trace!("selection changed: {:?} -> {:?}", self.selection, selection);
        }
        self.selection = selection;
        selection
    }

    /// Runs one frame of drag handling, then hover selection if not dragging.
    ///
    /// # Arguments
    ///
    /// * `pointer` - Pointer state sampled this frame
    /// * `camera` - Camera used to map the pointer into world space
    ///
    /// # Returns
    ///
    /// `true` while a drag is in progress; the caller must then skip panning.
    pub fn update(&mut self, pointer: &PointerState, camera: &Camera) -> bool {
        let pointer_world = camera.screen_to_world(pointer.screen_pos);
        if self.update_drag(pointer, pointer_world, camera) {
            return true;
        }
        self.update_selection(pointer_world);
        false
    }

    fn update_drag(&mut self, pointer: &PointerState, pointer_world: Pos2, camera: &Camera) -> bool {
        let Some(index) = self.selection.index().filter(|&i| i < self.nodes.len()) else {
            self.end_drag();
            return false;
        };

        match self.drag {
            DragState::Idle if pointer.primary_pressed => {
                debug!("drag started on node {index}");
                self.drag = DragState::Dragging {
                    anchor: pointer.screen_pos,
                };
                true
            }
            DragState::Dragging { anchor } if pointer.primary_down => {
                let delta = pointer_world - camera.screen_to_world(anchor);
                self.move_node_by(index, delta);
                self.drag = DragState::Dragging {
                    anchor: pointer.screen_pos,
                };
                true
            }
            DragState::Dragging { .. } => {
                self.end_drag();
                false
            }
            DragState::Idle => false,
        }
    }

    fn end_drag(&mut self) {
        if let DragState::Dragging { .. } = self.drag {
            if let Some(node) = self.selected_node() {
                debug!("drag ended at {:?}", node.position());
            }
            self.drag = DragState::Idle;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use eframe::egui::{pos2, vec2};

    fn world() -> World {
        World::new(GridSettings {
            square_size: 20,
            major_grid_every: 5,
            half_width_squares: 80,
            half_height_squares: 80,
        })
        .unwrap()
    }

    fn node(title: &str, size: Vec2, position: Pos2) -> CanvasNode {
        CanvasNode::new(title, size).unwrap().with_position(position)
    }

    fn pointer(x: f32, y: f32, primary_down: bool, primary_pressed: bool) -> PointerState {
        PointerState {
            screen_pos: pos2(x, y),
            primary_down,
            primary_pressed,
        }
    }

    /// Camera whose screen space coincides with world space.
    fn identity_camera() -> Camera {
        Camera {
            target: Pos2::ZERO,
            offset: Pos2::ZERO,
            zoom: 1.0,
            rotation: 0.0,
        }
    }

    fn assert_within_bounds(world: &World) {
        for node in world.nodes() {
            let p = node.position();
            let s = node.size();
            assert!(p.x >= -world.xmax(), "{p:?}");
            assert!(p.y >= -world.ymax(), "{p:?}");
            if s.x <= 2.0 * world.xmax() {
                assert!(p.x <= world.xmax() - s.x, "{p:?}");
            }
            if s.y <= 2.0 * world.ymax() {
                assert!(p.y <= world.ymax() - s.y, "{p:?}");
            }
        }
    }

    #[test]
    fn test_world_bounds() {
        let world = world();
        assert_eq!(world.xmax(), 1600.0);
        assert_eq!(world.ymax(), 1600.0);
        assert!(world.in_bounds(pos2(0.0, 0.0)));
        assert!(world.in_bounds(pos2(1599.0, -1599.0)));
        assert!(!world.in_bounds(pos2(1600.0, 0.0)));
        assert!(!world.in_bounds(pos2(0.0, -1600.0)));
    }

    #[test]
    fn test_world_rejects_invalid_grid() {
        let result = World::new(GridSettings {
            half_height_squares: -3,
            ..GridSettings::default()
        });
        assert!(matches!(result, Err(CanvasError::InvalidWorldExtents { .. })));
    }

    #[test]
    fn test_drag_delta_clamps_to_left_edge() {
        let mut world = world();
        let index = world.add_node(node("A", vec2(200.0, 300.0), pos2(200.0, 300.0)));

        let committed = world.move_node_by(index, vec2(-2000.0, 0.0)).unwrap();

        assert_eq!(committed, pos2(-1600.0, 300.0));
        assert_eq!(world.node(index).unwrap().position(), pos2(-1600.0, 300.0));
    }

    #[test]
    fn test_oversized_node_clamps_to_lower_bound() {
        let mut world = world();
        let index = world.add_node(node("Huge", vec2(3200.0, 3200.0), Pos2::ZERO));

        world.move_node_by(index, vec2(100.0, 0.0));

        assert_eq!(world.node(index).unwrap().position().x, 1600.0 - 3200.0);
    }

    #[test]
    fn test_add_node_clamps_initial_position() {
        let mut world = world();
        let index = world.add_node(node("A", vec2(100.0, 100.0), pos2(5000.0, -5000.0)));
        assert_eq!(world.node(index).unwrap().position(), pos2(1500.0, -1600.0));
    }

    #[test]
    fn test_set_node_position_out_of_range_index() {
        let mut world = world();
        assert_eq!(world.set_node_position(3, Pos2::ZERO), None);
    }

    #[test]
    fn test_hit_test_prefers_earliest_node() {
        let mut world = world();
        let a = world.add_node(node("A", vec2(200.0, 200.0), pos2(0.0, 0.0)));
        let b = world.add_node(node("B", vec2(200.0, 200.0), pos2(100.0, 100.0)));

        assert_eq!(world.update_selection(pos2(150.0, 150.0)), Selection::Node(a));
        assert_eq!(world.update_selection(pos2(250.0, 250.0)), Selection::Node(b));
        assert_eq!(world.update_selection(pos2(-50.0, 0.0)), Selection::Empty);
        assert!(world.selected_node().is_none());
    }

    #[test]
    fn test_selected_node_lookup() {
        let mut world = world();
        world.add_node(node("A", vec2(100.0, 100.0), Pos2::ZERO));
        world.update_selection(pos2(50.0, 50.0));
        assert_eq!(world.selected_node().map(|n| n.title()), Some("A"));
    }

    #[test]
    fn test_press_on_selected_node_starts_drag_without_moving() {
        let mut world = world();
        let camera = identity_camera();
        let index = world.add_node(node("A", vec2(100.0, 100.0), Pos2::ZERO));

        assert!(!world.update(&pointer(50.0, 50.0, false, false), &camera));
        assert_eq!(world.selection(), Selection::Node(index));

        assert!(world.update(&pointer(50.0, 50.0, true, true), &camera));
        assert_eq!(
            world.drag_state(),
            DragState::Dragging {
                anchor: pos2(50.0, 50.0)
            }
        );
        assert_eq!(world.node(index).unwrap().position(), Pos2::ZERO);
    }

    #[test]
    fn test_drag_moves_node_by_frame_deltas() {
        let mut world = world();
        let camera = identity_camera();
        let index = world.add_node(node("A", vec2(100.0, 100.0), Pos2::ZERO));

        world.update(&pointer(50.0, 50.0, false, false), &camera);
        world.update(&pointer(50.0, 50.0, true, true), &camera);
        world.update(&pointer(70.0, 55.0, true, false), &camera);
        world.update(&pointer(100.0, 40.0, true, false), &camera);

        assert_eq!(world.node(index).unwrap().position(), pos2(50.0, -10.0));
    }

    #[test]
    fn test_drag_uses_camera_zoom() {
        let mut world = world();
        let camera = Camera {
            zoom: 2.0,
            ..identity_camera()
        };
        let index = world.add_node(node("A", vec2(100.0, 100.0), Pos2::ZERO));

        world.update(&pointer(100.0, 100.0, false, false), &camera);
        world.update(&pointer(100.0, 100.0, true, true), &camera);
        world.update(&pointer(140.0, 100.0, true, false), &camera);

        assert_eq!(world.node(index).unwrap().position(), pos2(20.0, 0.0));
    }

    #[test]
    fn test_selection_frozen_while_dragging() {
        let mut world = world();
        let camera = identity_camera();
        let a = world.add_node(node("A", vec2(100.0, 100.0), Pos2::ZERO));
        world.add_node(node("B", vec2(100.0, 100.0), pos2(500.0, 0.0)));

        world.update(&pointer(50.0, 50.0, false, false), &camera);
        world.update(&pointer(50.0, 50.0, true, true), &camera);
        // Jump the pointer over B while still holding the button.
        world.update(&pointer(550.0, 50.0, true, false), &camera);

        assert_eq!(world.selection(), Selection::Node(a));
        assert!(world.is_dragging());
    }

    #[test]
    fn test_release_ends_drag_and_rescans() {
        let mut world = world();
        let camera = identity_camera();
        world.add_node(node("A", vec2(100.0, 100.0), Pos2::ZERO));

        world.update(&pointer(50.0, 50.0, false, false), &camera);
        world.update(&pointer(50.0, 50.0, true, true), &camera);
        assert!(!world.update(&pointer(900.0, 900.0, false, false), &camera));

        assert!(!world.is_dragging());
        assert_eq!(world.selection(), Selection::Empty);
    }

    #[test]
    fn test_holding_button_onto_node_does_not_drag() {
        let mut world = world();
        let camera = identity_camera();
        let index = world.add_node(node("A", vec2(100.0, 100.0), Pos2::ZERO));

        world.update(&pointer(-50.0, 50.0, true, true), &camera);
        assert!(!world.update(&pointer(50.0, 50.0, true, false), &camera));
        assert!(!world.update(&pointer(80.0, 50.0, true, false), &camera));

        assert_eq!(world.node(index).unwrap().position(), Pos2::ZERO);
    }

    #[test]
    fn test_remove_selected_node_clears_selection_and_drag() {
        let mut world = world();
        let camera = identity_camera();
        world.add_node(node("A", vec2(100.0, 100.0), Pos2::ZERO));
        world.add_node(node("B", vec2(100.0, 100.0), pos2(500.0, 0.0)));

        world.update(&pointer(550.0, 50.0, false, false), &camera);
        world.update(&pointer(550.0, 50.0, true, true), &camera);
        assert!(world.is_dragging());

        let removed = world.remove_node(1).unwrap();
        assert_eq!(removed.title(), "B");
        assert_eq!(world.selection(), Selection::Empty);
        assert_eq!(world.drag_state(), DragState::Idle);
        assert!(world.selected_node().is_none());

        // Still holding the button over empty space must not move node A.
        assert!(!world.update(&pointer(600.0, 50.0, true, false), &camera));
        assert_eq!(world.node(0).unwrap().position(), Pos2::ZERO);
    }

    #[test]
    fn test_remove_lower_node_shifts_selection() {
        let mut world = world();
        let camera = identity_camera();
        world.add_node(node("A", vec2(100.0, 100.0), Pos2::ZERO));
        world.add_node(node("B", vec2(100.0, 100.0), pos2(500.0, 0.0)));

        world.update(&pointer(550.0, 50.0, false, false), &camera);
        world.update(&pointer(550.0, 50.0, true, true), &camera);

        world.remove_node(0);
        assert_eq!(world.selection(), Selection::Node(0));
        assert_eq!(world.selected_node().unwrap().title(), "B");
        assert!(world.is_dragging());

        // The drag carries on with B at its new index.
        world.update(&pointer(560.0, 50.0, true, false), &camera);
        assert_eq!(world.node(0).unwrap().position(), pos2(510.0, 0.0));
    }

    #[test]
    fn test_remove_higher_node_keeps_selection() {
        let mut world = world();
        let camera = identity_camera();
        world.add_node(node("A", vec2(100.0, 100.0), Pos2::ZERO));
        world.add_node(node("B", vec2(100.0, 100.0), pos2(500.0, 0.0)));

        world.update(&pointer(50.0, 50.0, false, false), &camera);
        world.remove_node(1);

        assert_eq!(world.selection(), Selection::Node(0));
        assert_eq!(world.nodes().len(), 1);
    }

    #[test]
    fn test_remove_out_of_range_index() {
        let mut world = world();
        world.add_node(node("A", vec2(100.0, 100.0), Pos2::ZERO));
        assert!(world.remove_node(1).is_none());
        assert_eq!(world.nodes().len(), 1);
    }

    #[test]
    fn test_world_rejects_overflowing_grid() {
        let grid = GridSettings {
            square_size: 50_000,
            half_width_squares: 50_000,
            ..GridSettings::default()
        };
        assert!(matches!(
            World::new(grid),
            Err(CanvasError::InvalidWorldExtents { .. })
        ));
    }

    #[test]
    fn test_drag_sequences_respect_bounds() {
        let mut world = world();
        let camera = identity_camera();
        world.add_node(node("A", vec2(200.0, 300.0), pos2(200.0, 300.0)));

        let steps = [
            vec2(-700.0, 0.0),
            vec2(0.0, 900.0),
            vec2(1300.0, -250.0),
            vec2(-90.0, -1700.0),
        ];
        let mut screen = pos2(300.0, 400.0);
        world.update(&pointer(screen.x, screen.y, false, false), &camera);
        world.update(&pointer(screen.x, screen.y, true, true), &camera);
        for _ in 0..10 {
            for step in steps {
                screen += step;
                world.update(&pointer(screen.x, screen.y, true, false), &camera);
                assert_within_bounds(&world);
            }
        }
        assert!(world.is_dragging());
    }
}
