//! Application state management structures.
//!
//! This module contains the main application struct and the small set of view
//! settings that survive restarts. Node layouts are rebuilt from the startup
//! config each time and never persisted.

use crate::camera::Camera;
use crate::config::CanvasConfig;
use crate::error::CanvasError;
use crate::frame::{FrameController, Interaction};
use crate::world::World;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Storage key for persisted view settings.
pub const VIEW_SETTINGS_KEY: &str = "view_settings";

/// View preferences persisted between sessions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewSettings {
    /// Whether the grid should be drawn
    pub show_grid: bool,
    /// Last camera zoom level
    pub zoom: f32,
}

impl Default for ViewSettings {
    fn default() -> Self {
        Self {
            show_grid: true,
            zoom: 1.0,
        }
    }
}

impl ViewSettings {
    /// Serializes the settings to JSON.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Deserializes settings from JSON.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}

/// The main application structure holding the world, camera and frame state.
///
/// This struct implements the `eframe::App` trait; see the parent module.
pub struct CanvasApp {
    /// Nodes and bounds
    pub world: World,
    /// View transform
    pub camera: Camera,
    /// Pointer and viewport history between frames
    pub controller: FrameController,
    /// Persisted view preferences
    pub view: ViewSettings,
    /// Delay requested between repaints
    pub frame_interval: Duration,
    /// Interaction reported by the last frame
    pub last_interaction: Interaction,
}

impl CanvasApp {
    /// Builds the application from a startup config.
    ///
    /// # Returns
    ///
    /// The app, or the first validation error found in the config.
    pub fn from_config(config: &CanvasConfig) -> Result<Self, CanvasError> {
        let world = config.build_world()?;
        let frame_interval = config.frame_interval()?;
        let viewport = config.viewport_size()?;
        Ok(Self {
            world,
            camera: Camera::new(viewport),
            controller: FrameController::new(),
            view: ViewSettings::default(),
            frame_interval,
            last_interaction: Interaction::Idle,
        })
    }

    /// Applies view settings restored from storage, ignoring invalid values.
    pub fn restore_view(&mut self, view: ViewSettings) {
        if view.zoom.is_finite() && view.zoom > 0.0 {
            self.camera.zoom = view.zoom;
        } else {
            log::warn!("ignoring stored zoom {}", view.zoom);
        }
        self.view = ViewSettings {
            zoom: self.camera.zoom,
            ..view
        };
    }

    /// Loads view settings from eframe storage, if any were saved.
    pub fn restore_from_storage(&mut self, storage: Option<&dyn eframe::Storage>) {
        let Some(json) = storage.and_then(|s| s.get_string(VIEW_SETTINGS_KEY)) else {
            return;
        };
        match ViewSettings::from_json(&json) {
            Ok(view) => self.restore_view(view),
            Err(err) => log::warn!("failed to restore view settings: {err}"),
        }
    }
}
