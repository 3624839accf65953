/* This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/. */

//! Editor preferences, read from TOML.

use std::fmt;
use std::path::Path;

use serde::Deserialize;

/// Distance within which a click picks a node.
pub const DEFAULT_PICK_RADIUS: f32 = 14.0;

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct EditorPrefs {
    pub pick_radius: f32,
    /// Radius of the circle painted for each node.
    pub node_radius: f32,
    pub canvas_width: u32,
    pub canvas_height: u32,
}

impl Default for EditorPrefs {
    fn default() -> Self {
        Self {
            pick_radius: DEFAULT_PICK_RADIUS,
            node_radius: 5.0,
            canvas_width: 800,
            canvas_height: 600,
        }
    }
}

#[derive(Debug)]
pub enum PrefsError {
    Io(String),
    Parse(String),
}

impl fmt::Display for PrefsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PrefsError::Io(e) => write!(f, "IO error: {e}"),
            PrefsError::Parse(e) => write!(f, "invalid preferences: {e}"),
        }
    }
}

impl std::error::Error for PrefsError {}

impl EditorPrefs {
    pub fn from_toml_str(raw: &str) -> Result<Self, PrefsError> {
        let prefs: Self = toml::from_str(raw).map_err(|e| PrefsError::Parse(e.to_string()))?;
        prefs.validate()?;
        Ok(prefs)
    }

    pub fn load(path: &Path) -> Result<Self, PrefsError> {
        let raw = std::fs::read_to_string(path)
            .map_err(|e| PrefsError::Io(format!("{}: {e}", path.display())))?;
        Self::from_toml_str(&raw)
    }

    /// Override the pick radius, keeping the other values.
    pub fn with_pick_radius(mut self, pick_radius: f32) -> Result<Self, PrefsError> {
        self.pick_radius = pick_radius;
        self.validate()?;
        Ok(self)
    }

    fn validate(&self) -> Result<(), PrefsError> {
        for (name, value) in [
            ("pick_radius", self.pick_radius),
            ("node_radius", self.node_radius),
        ] {
            if !value.is_finite() || value <= 0.0 {
                return Err(PrefsError::Parse(format!(
                    "{name} must be a positive number, got {value}"
                )));
            }
        }
        Ok(())
    }
}
