//! Host-tunable editor settings, parsed from JSON.

use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid editor configuration: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("undo depth must be at least 1")]
    ZeroUndoDepth,
}

/// Editor behaviour that hosts may tune.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct EditorConfig {
    /// Maximum number of undo steps kept.
    pub undo_depth: usize,
    /// Whether marquee selection also picks up annotations.
    pub marquee_includes_annotations: bool,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            undo_depth: 200,
            marquee_includes_annotations: false,
        }
    }
}

impl EditorConfig {
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: EditorConfig = serde_json::from_str(json)?;
        if config.undo_depth == 0 {
            return Err(ConfigError::ZeroUndoDepth);
        }
        Ok(config)
    }
}
