//! Startup configuration for the canvas.
//!
//! A [`CanvasConfig`] describes the window, the world grid and the nodes placed
//! in the world at startup. It can be loaded from a JSON file; every field
//! falls back to its default when missing.

use crate::error::CanvasError;
use crate::types::{CanvasNode, GridSettings};
use crate::world::World;
use eframe::egui::{pos2, vec2, Color32, Vec2};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

/// Window settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WindowConfig {
    /// Window title
    pub title: String,
    /// Initial inner width in logical pixels
    pub width: f32,
    /// Initial inner height in logical pixels
    pub height: f32,
    /// Frame-rate cap used to pace repaints
    pub target_fps: u32,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            title: crate::constants::WINDOW_TITLE.to_string(),
            width: crate::constants::WINDOW_WIDTH,
            height: crate::constants::WINDOW_HEIGHT,
            target_fps: crate::constants::TARGET_FPS,
        }
    }
}

/// A node placed in the world at startup.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NodeConfig {
    /// Title text
    pub title: String,
    /// Width and height in world units
    pub size: (f32, f32),
    /// Top-left corner in world units
    #[serde(default)]
    pub position: (f32, f32),
    /// Title bar colour as RGB; the default dark grey when absent
    #[serde(default)]
    pub title_color: Option<[u8; 3]>,
}

impl NodeConfig {
    /// Builds the node described by this entry.
    pub fn build(&self) -> Result<CanvasNode, CanvasError> {
        let mut node = CanvasNode::new(self.title.clone(), vec2(self.size.0, self.size.1))?
            .with_position(pos2(self.position.0, self.position.1));
        if let Some([r, g, b]) = self.title_color {
            node = node.with_title_color(Color32::from_rgb(r, g, b));
        }
        Ok(node)
    }
}

/// Complete startup configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CanvasConfig {
    /// Window settings
    pub window: WindowConfig,
    /// World grid and bounds
    pub grid: GridSettings,
    /// Nodes added to the world in order
    pub nodes: Vec<NodeConfig>,
}

impl Default for CanvasConfig {
    fn default() -> Self {
        Self {
            window: WindowConfig::default(),
            grid: GridSettings::default(),
            nodes: vec![NodeConfig {
                title: "Çıkarma".to_string(),
                size: (200.0, 300.0),
                position: (0.0, 0.0),
                title_color: None,
            }],
        }
    }
}

impl CanvasConfig {
    /// Serialize the config to a JSON string
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Deserialize a config from a JSON string
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Reads and parses a JSON config file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, CanvasError> {
        let json = std::fs::read_to_string(path)?;
        Ok(Self::from_json(&json)?)
    }

    /// Time between repaints for the configured frame-rate cap.
    pub fn frame_interval(&self) -> Result<Duration, CanvasError> {
        if self.window.target_fps == 0 {
            return Err(CanvasError::InvalidFrameRate);
        }
        Ok(Duration::from_secs_f64(1.0 / f64::from(self.window.target_fps)))
    }

    /// Initial window size, which is also the first viewport size.
    pub fn viewport_size(&self) -> Result<Vec2, CanvasError> {
        let (width, height) = (self.window.width, self.window.height);
        if !(width.is_finite() && height.is_finite() && width > 0.0 && height > 0.0) {
            return Err(CanvasError::InvalidWindowSize { width, height });
        }
        Ok(vec2(width, height))
    }

    /// Validates the grid and builds the world with every configured node.
    pub fn build_world(&self) -> Result<World, CanvasError> {
        let mut world = World::new(self.grid)?;
        for node in &self.nodes {
            world.add_node(node.build()?);
        }
        Ok(world)
    }
}
