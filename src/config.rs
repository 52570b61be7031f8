//! Editor tuning knobs, loadable from JSON.
//!
//! Every field has a default, so a config file only needs the values it
//! overrides:
//!
//! ```json
//! { "node_width": 160, "add_node_chord": ["ctrl", "n"] }
//! ```

use crate::error::{EditorError, Result};
use crate::menu::parse_key_name;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Shortest sweep dash accepted, in screen px.
pub const MIN_SWEEP_DASH: f32 = 1.0;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EditorConfig {
    pub node_width: f32,
    pub node_height: f32,
    pub connector_width: f32,
    pub connector_height: f32,
    /// Incoming-connection cap for new nodes; 0 means unlimited.
    pub default_max_connections: u32,
    pub allow_self_connections: bool,
    /// Pointer travel (screen px) before a connector press becomes a drag.
    pub drag_threshold: f32,
    pub selection_start_margin: f32,
    pub selection_min_size: f32,
    pub zoom_min: f32,
    pub zoom_max: f32,
    /// Zoom factor applied per wheel notch.
    pub zoom_step: f32,
    /// Dash length of the sweep line, at least [`MIN_SWEEP_DASH`].
    pub sweep_dash: f32,
    pub sweep_gap: f32,
    /// Key names that open the canvas menu, e.g. `["shift", "a"]`.
    pub add_node_chord: Vec<String>,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            node_width: 120.0,
            node_height: 60.0,
            connector_width: 10.0,
            connector_height: 20.0,
            default_max_connections: 0,
            allow_self_connections: true,
            drag_threshold: 3.0,
            selection_start_margin: 10.0,
            selection_min_size: 5.0,
            zoom_min: 0.25,
            zoom_max: 4.0,
            zoom_step: 1.1,
            sweep_dash: 10.0,
            sweep_gap: 5.0,
            add_node_chord: vec!["shift".into(), "a".into()],
        }
    }
}

impl EditorConfig {
    pub fn from_json(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| EditorError::ConfigIo {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&text)
    }

    /// Reject values the editor cannot work with.
    pub fn validate(&self) -> Result<()> {
        let positive = [
            ("node_width", self.node_width),
            ("node_height", self.node_height),
            ("connector_width", self.connector_width),
            ("connector_height", self.connector_height),
            ("zoom_min", self.zoom_min),
            ("zoom_max", self.zoom_max),
            ("zoom_step", self.zoom_step),
        ];
        for (name, value) in positive {
            if !(value.is_finite() && value > 0.0) {
                return Err(invalid(format!("{} must be positive, got {}", name, value)));
            }
        }

        let non_negative = [
            ("drag_threshold", self.drag_threshold),
            ("selection_start_margin", self.selection_start_margin),
            ("selection_min_size", self.selection_min_size),
            ("sweep_gap", self.sweep_gap),
        ];
        for (name, value) in non_negative {
            if !(value.is_finite() && value >= 0.0) {
                return Err(invalid(format!("{} must not be negative, got {}", name, value)));
            }
        }

        if self.zoom_min > self.zoom_max {
            return Err(invalid(format!(
                "zoom_min {} is above zoom_max {}",
                self.zoom_min, self.zoom_max
            )));
        }
        if !(self.sweep_dash.is_finite() && self.sweep_dash >= MIN_SWEEP_DASH) {
            return Err(invalid(format!(
                "sweep_dash must be at least {}, got {}",
                MIN_SWEEP_DASH, self.sweep_dash
            )));
        }
        Ok(())
    }

    /// The add-node chord resolved to key characters.
    pub fn add_node_keys(&self) -> Result<Vec<char>> {
        self.add_node_chord.iter().map(|name| parse_key_name(name)).collect()
    }
}

fn invalid(reason: String) -> EditorError {
    EditorError::InvalidConfig(reason)
}
