//! Controller configuration

use crate::error::EngineResult;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Recognized controller options. Keys are camelCase on the wire so the
/// same JSON object works from the browser and from a file.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ControllerOptions {
    /// Vertical field of view in degrees
    pub field_of_view: f32,
    /// Render target size multiplier over the viewport size
    pub pixel_ratio: f32,
    pub enable_auto_rotate: bool,
    pub enable_pan: bool,
    pub enable_zoom: bool,
    /// Keep the camera above the lower part of the globe
    pub restrict_camera_angle: bool,
}

impl Default for ControllerOptions {
    fn default() -> Self {
        Self {
            field_of_view: 45.0,
            pixel_ratio: 1.0,
            enable_auto_rotate: true,
            enable_pan: false,
            enable_zoom: false,
            restrict_camera_angle: false,
        }
    }
}

impl ControllerOptions {
    pub fn from_json_str(json: &str) -> EngineResult<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn load(path: &Path) -> EngineResult<Self> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json_str(&json)
    }
}
