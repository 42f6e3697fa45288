// ============================================================================
// config.rs — Aviary
// Viewer configuration, optionally loaded from a JSON file.
// ============================================================================

use std::fs::File;

use serde::Deserialize;

use crate::error::ViewerError;
use crate::viewport::DEFAULT_PANEL_WIDTH;

/// Runtime viewer configuration. Every field has a default so a config file
/// only needs to name what it overrides.
#[derive(Clone, Debug, Deserialize)]
#[serde(default)]
pub struct ViewerConfig {
    /// Fixed logical canvas side; derived from the window when absent.
    pub logical_size: Option<u32>,
    /// Logical width reserved for the statistics panel.
    pub panel_width: u32,
    pub vsync: bool,

    // Demo engine population
    pub animals: usize,
    pub food: usize,
    pub seed: Option<u64>,
}

impl Default for ViewerConfig {
    fn default() -> Self {
        Self {
            logical_size: None,
            panel_width: DEFAULT_PANEL_WIDTH,
            vsync: true,
            animals: 32,
            food: 128,
            seed: None,
        }
    }
}

impl ViewerConfig {
    pub fn load(path: &str) -> Result<Self, ViewerError> {
        let file = File::open(path)
            .map_err(|e| ViewerError::Configuration(format!("cannot open {}: {}", path, e)))?;
        serde_json::from_reader(file)
            .map_err(|e| ViewerError::Configuration(format!("cannot parse {}: {}", path, e)))
    }
}
