//! Shared application-wide constants.
//! Centralizes the default world, window and styling values.

use eframe::egui::Color32;

// World grid
/// Default side length of one grid square in world units.
pub const SQUARE_SIZE: i32 = 20;
/// Number of grid squares between major grid lines.
pub const MAJOR_GRID_EVERY: i32 = 5;
/// Default half-width of the world, in grid squares.
pub const HALF_WIDTH_SQUARES: i32 = 80;
/// Default half-height of the world, in grid squares.
pub const HALF_HEIGHT_SQUARES: i32 = 80;

// Window
/// Default window title.
pub const WINDOW_TITLE: &str = "Node Canvas";
/// Default window width in logical pixels.
pub const WINDOW_WIDTH: f32 = 800.0;
/// Default window height in logical pixels.
pub const WINDOW_HEIGHT: f32 = 600.0;
/// Frame-rate cap used to pace repaints.
pub const TARGET_FPS: u32 = 80;

// Zoom
/// Amount the zoom factor changes per scroll step.
pub const ZOOM_STEP: f32 = 0.025;
/// Lower zoom limit, further raised so the world always covers the viewport.
pub const MIN_ZOOM: f32 = 0.25;
/// Upper zoom limit.
pub const MAX_ZOOM: f32 = 5.0;

// Node drawing (world units)
/// Height of the coloured title bar at the top of a node.
pub const NODE_TITLE_BAR_HEIGHT: f32 = 40.0;
/// Offset of the title text from the node's top-left corner.
pub const NODE_TITLE_INSET: (f32, f32) = (15.0, 10.0);
/// Font size of the node title.
pub const NODE_TITLE_FONT_SIZE: f32 = 20.0;
/// Corner radius as a fraction of half the node's shorter side.
pub const NODE_ROUNDNESS: f32 = 0.2;
/// Thickness of the node outline.
pub const NODE_OUTLINE_THICKNESS: f32 = 5.0;
/// Thickness of the selection outline.
pub const SELECTION_OUTLINE_THICKNESS: f32 = 1.0;

// Colours
/// Canvas background.
pub const BACKGROUND_COLOR: Color32 = Color32::from_rgb(30, 30, 30);
/// Node body fill.
pub const NODE_BACKGROUND_COLOR: Color32 = Color32::from_rgb(46, 46, 46);
/// Outline drawn around the selected node.
pub const NODE_SELECTED_COLOR: Color32 = Color32::from_rgb(255, 150, 0);
/// Title bar colour for nodes that do not specify one.
pub const DEFAULT_TITLE_COLOR: Color32 = Color32::from_rgb(36, 36, 36);
/// Node title text.
pub const NODE_TEXT_COLOR: Color32 = Color32::WHITE;
/// Grid lines falling on a major interval.
pub const GRID_MAJOR_COLOR: Color32 = Color32::GRAY;
/// All other grid lines.
pub const GRID_MINOR_COLOR: Color32 = Color32::DARK_GRAY;
