//! Core data types for the canvas world.
//!
//! This module defines the node entity, the selection and drag states of the
//! world, the sampled pointer state and the grid settings that fix the world's
//! bounds.

use crate::error::CanvasError;
use eframe::egui::{Color32, Pos2, Rect, Vec2};
use serde::{Deserialize, Serialize};

/// Stable index of a node inside the world's node arena.
pub type NodeIndex = usize;

/// A rectangular, draggable entity placed in world space.
#[derive(Debug, Clone, PartialEq)]
pub struct CanvasNode {
    title: String,
    size: Vec2,
    /// Top-left corner in world units
    pub(crate) position: Pos2,
    /// Background colour of the title bar
    pub title_color: Color32,
}

impl CanvasNode {
    /// Creates a node at the world origin.
    ///
    /// # Arguments
    ///
    /// * `title` - Text shown in the node's title bar
    /// * `size` - Width and height in world units
    ///
    /// # Returns
    ///
    /// The node, or [`CanvasError::InvalidNodeSize`] if either dimension is
    /// not strictly positive.
    pub fn new(title: impl Into<String>, size: Vec2) -> Result<Self, CanvasError> {
        let valid = |v: f32| v.is_finite() && v > 0.0;
        if !valid(size.x) || !valid(size.y) {
            return Err(CanvasError::InvalidNodeSize {
                width: size.x,
                height: size.y,
            });
        }
        Ok(Self {
            title: title.into(),
            size,
            position: Pos2::ZERO,
            title_color: crate::constants::DEFAULT_TITLE_COLOR,
        })
    }

    /// Sets the initial position. The world clamps it when the node is added.
    pub fn with_position(mut self, position: Pos2) -> Self {
        self.position = position;
        self
    }

    /// Sets the title bar colour.
    pub fn with_title_color(mut self, color: Color32) -> Self {
        self.title_color = color;
        self
    }

    /// Title text.
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Width and height in world units.
    pub fn size(&self) -> Vec2 {
        self.size
    }

    /// Top-left corner in world units.
    pub fn position(&self) -> Pos2 {
        self.position
    }

    /// World-space bounding rectangle.
    pub fn rect(&self) -> Rect {
        Rect::from_min_size(self.position, self.size)
    }

    /// Whether `point` lies strictly inside the node's rectangle.
    ///
    /// Points on the border do not count as inside.
    pub fn contains(&self, point: Pos2) -> bool {
        let max = self.position + self.size;
        point.x > self.position.x && point.y > self.position.y && point.x < max.x && point.y < max.y
    }
}

/// The world's single selection slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Selection {
    /// Nothing is selected
    #[default]
    Empty,
    /// The node at this index is selected
    Node(NodeIndex),
}

impl Selection {
    /// The selected index, if any.
    pub fn index(self) -> Option<NodeIndex> {
        match self {
            Selection::Empty => None,
            Selection::Node(index) => Some(index),
        }
    }

    /// Whether a node is selected.
    pub fn is_some(self) -> bool {
        matches!(self, Selection::Node(_))
    }
}

/// Node drag state machine.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum DragState {
    /// No drag in progress
    #[default]
    Idle,
    /// A drag is in progress
    Dragging {
        /// Screen-space pointer position at the end of the previous frame
        anchor: Pos2,
    },
}

/// Pointer state sampled once per frame from the input provider.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct PointerState {
    /// Pointer position in screen space, relative to the viewport's top-left corner
    pub screen_pos: Pos2,
    /// Whether the primary button is held down
    pub primary_down: bool,
    /// Whether the primary button went down during this frame
    pub primary_pressed: bool,
}

/// Grid layout that fixes the world's bounds.
///
/// `square_size` and `major_grid_every` only affect grid drawing; the half
/// extents multiplied by `square_size` give the world's bounds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GridSettings {
    /// Side length of one grid square in world units
    pub square_size: i32,
    /// Number of squares between major grid lines
    pub major_grid_every: i32,
    /// Half-width of the world in squares
    pub half_width_squares: i32,
    /// Half-height of the world in squares
    pub half_height_squares: i32,
}

impl Default for GridSettings {
    fn default() -> Self {
        Self {
            square_size: crate::constants::SQUARE_SIZE,
            major_grid_every: crate::constants::MAJOR_GRID_EVERY,
            half_width_squares: crate::constants::HALF_WIDTH_SQUARES,
            half_height_squares: crate::constants::HALF_HEIGHT_SQUARES,
        }
    }
}

impl GridSettings {
    /// Checks that every setting is strictly positive and that the world's
    /// bounds fit in an `i32`.
    pub fn validate(&self) -> Result<(), CanvasError> {
        if self.square_size <= 0 {
            return Err(CanvasError::InvalidSquareSize(self.square_size));
        }
        if self.major_grid_every <= 0 {
            return Err(CanvasError::InvalidMajorGridEvery(self.major_grid_every));
        }
        let overflows = self.half_width_squares.checked_mul(self.square_size).is_none()
            || self.half_height_squares.checked_mul(self.square_size).is_none();
        if self.half_width_squares <= 0 || self.half_height_squares <= 0 || overflows {
            return Err(CanvasError::InvalidWorldExtents {
                half_width: self.half_width_squares,
                half_height: self.half_height_squares,
            });
        }
        Ok(())
    }

    /// Horizontal world bound: the world spans `-xmax..xmax`.
    pub fn xmax(&self) -> f32 {
        self.half_width_squares as f32 * self.square_size as f32
    }

    /// Vertical world bound: the world spans `-ymax..ymax`.
    pub fn ymax(&self) -> f32 {
        self.half_height_squares as f32 * self.square_size as f32
    }
}
