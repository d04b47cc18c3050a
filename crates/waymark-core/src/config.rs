//! Session configuration.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid config JSON: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("At least one cancel key is required")]
    NoCancelKeys,
    #[error("Cancel keys must not be blank")]
    BlankCancelKey,
}

/// What a completed line drawing does to the existing mission.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum LineCompletion {
    /// The new line becomes the whole mission.
    #[default]
    Replace,
    /// The new line is added after the existing entries.
    Append,
}

/// Basis for leg lengths shown when previewing a freshly drawn polygon.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum DistanceBasis {
    /// Euclidean distance in the projected plane.
    #[default]
    Planar,
    /// Great-circle distance between geographic coordinates.
    Geographic,
}

/// Settings for an editing session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    /// Key names that abort an in-progress drawing.
    pub cancel_keys: Vec<String>,
    pub line_completion: LineCompletion,
    pub polygon_preview_basis: DistanceBasis,
    /// Show the drawing instructions prompt when drawing starts.
    pub show_instructions: bool,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            cancel_keys: vec!["Enter".to_string(), "Escape".to_string()],
            line_completion: LineCompletion::default(),
            polygon_preview_basis: DistanceBasis::default(),
            show_instructions: true,
        }
    }
}

impl SessionConfig {
    /// Parse and validate a config from JSON. Missing fields take their defaults.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.cancel_keys.is_empty() {
            return Err(ConfigError::NoCancelKeys);
        }
        if self.cancel_keys.iter().any(|k| k.trim().is_empty()) {
            return Err(ConfigError::BlankCancelKey);
        }
        Ok(())
    }

    /// Check whether a key name cancels drawing.
    pub fn is_cancel_key(&self, key: &str) -> bool {
        self.cancel_keys.iter().any(|k| k == key)
    }
}
