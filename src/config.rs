use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::ConfigError;

/// Environment variable naming an alternative config file
pub const CONFIG_ENV_VAR: &str = "RASTER_PAINT_CONFIG";

/// Config file looked up in the working directory when the variable is unset
pub const DEFAULT_CONFIG_FILE: &str = "raster_paint.json";

/// Startup configuration for the paint application
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)] // if we add new fields, give them default values when deserializing old files
pub struct PaintConfig {
    /// Canvas width in pixels
    pub canvas_width: u32,
    /// Canvas height in pixels
    pub canvas_height: u32,
    /// Maximum number of snapshots kept on each history stack
    pub history_capacity: usize,
    /// Brush size at startup
    pub brush_size: u32,
    /// Lower bound of the size slider
    pub min_brush_size: u32,
    /// Upper bound of the size slider
    pub max_brush_size: u32,
    /// Width and height of the hue bar
    pub hue_bar_size: [u32; 2],
    /// Width and height of the saturation/value panel
    pub sv_panel_size: [u32; 2],
}

impl Default for PaintConfig {
    fn default() -> Self {
        Self {
            canvas_width: 800,
            canvas_height: 600,
            history_capacity: 50,
            brush_size: 5,
            min_brush_size: 1,
            max_brush_size: 50,
            hue_bar_size: [20, 200],
            sv_panel_size: [200, 200],
        }
    }
}

impl PaintConfig {
    /// Parse a config from JSON text and validate it
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Read and parse a config file
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    /// Load the configuration for this session.
    ///
    /// Missing files fall back to defaults silently, broken ones are logged
    /// and also fall back to defaults.
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load() -> Self {
        let path = std::env::var_os(CONFIG_ENV_VAR)
            .map(std::path::PathBuf::from)
            .unwrap_or_else(|| std::path::PathBuf::from(DEFAULT_CONFIG_FILE));

        if !path.exists() {
            log::debug!("No config file at {}, using defaults", path.display());
            return Self::default();
        }

        match Self::from_file(&path) {
            Ok(config) => {
                log::info!("Loaded config from {}", path.display());
                config
            }
            Err(err) => {
                log::error!("Ignoring config file {}: {}", path.display(), err);
                Self::default()
            }
        }
    }

    #[cfg(target_arch = "wasm32")]
    pub fn load() -> Self {
        Self::default()
    }

    /// Reject values the editor cannot work with
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.canvas_width == 0 || self.canvas_height == 0 {
            return Err(ConfigError::Invalid(format!(
                "canvas must not be empty ({}x{})",
                self.canvas_width, self.canvas_height
            )));
        }
        if self.history_capacity == 0 {
            return Err(ConfigError::Invalid("history_capacity must be at least 1".to_owned()));
        }
        if self.min_brush_size == 0 || self.min_brush_size > self.max_brush_size {
            return Err(ConfigError::Invalid(format!(
                "brush size range {}..={} is empty",
                self.min_brush_size, self.max_brush_size
            )));
        }
        if !(self.min_brush_size..=self.max_brush_size).contains(&self.brush_size) {
            return Err(ConfigError::Invalid(format!(
                "brush_size {} is outside {}..={}",
                self.brush_size, self.min_brush_size, self.max_brush_size
            )));
        }
        let panels = [self.hue_bar_size, self.sv_panel_size];
        if panels.iter().flatten().any(|&side| side == 0) {
            return Err(ConfigError::Invalid("picker panels must not be empty".to_owned()));
        }
        Ok(())
    }
}
