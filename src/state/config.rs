use crate::buffer::DEFAULT_SIZE;
use crate::color::Rgba;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors that can occur while loading a stored configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to parse config: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Invalid config: {0}")]
    Invalid(String),
}

pub type ConfigResult<T> = Result<T, ConfigError>;

/// Editor settings handed to a session at startup and handed back to the
/// host for persistence. The session never reads settings from anywhere else.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)] // if we add new fields, give them default values when deserializing old state
pub struct EditorConfig {
    pub canvas_width: usize,
    pub canvas_height: usize,
    /// On-screen size of one grid cell, in pixels
    pub cell_size: u32,
    pub min_cell_size: u32,
    pub max_cell_size: u32,
    /// Cell size change per wheel notch
    pub zoom_step: u32,
    /// Maximum number of undoable actions kept
    pub undo_capacity: usize,
    pub show_grid: bool,
    pub primary_color: Rgba,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            canvas_width: DEFAULT_SIZE,
            canvas_height: DEFAULT_SIZE,
            cell_size: 16,
            min_cell_size: 4,
            max_cell_size: 64,
            zoom_step: 2,
            undo_capacity: 50,
            show_grid: true,
            primary_color: Rgba::BLACK,
        }
    }
}

impl EditorConfig {
    pub fn from_json(json: &str) -> ConfigResult<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn to_json(&self) -> ConfigResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn validate(&self) -> ConfigResult<()> {
        if self.canvas_width == 0 || self.canvas_height == 0 {
            return Err(ConfigError::Invalid(format!(
                "canvas size {}x{} must be at least 1x1",
                self.canvas_width, self.canvas_height
            )));
        }
        if self.min_cell_size == 0 || self.min_cell_size > self.max_cell_size {
            return Err(ConfigError::Invalid(format!(
                "cell size range {}..={} is empty",
                self.min_cell_size, self.max_cell_size
            )));
        }
        if !(self.min_cell_size..=self.max_cell_size).contains(&self.cell_size) {
            return Err(ConfigError::Invalid(format!(
                "cell size {} outside {}..={}",
                self.cell_size, self.min_cell_size, self.max_cell_size
            )));
        }
        if self.zoom_step == 0 {
            return Err(ConfigError::Invalid("zoom step must be positive".to_owned()));
        }
        if self.undo_capacity == 0 {
            return Err(ConfigError::Invalid("undo capacity must be positive".to_owned()));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_fields_take_defaults() {
        let config = EditorConfig::from_json(r#"{ "show_grid": false }"#).unwrap();
        assert!(!config.show_grid);
        assert_eq!(config.undo_capacity, 50);
        assert_eq!(config.canvas_width, 64);
    }

    #[test]
    fn test_rejects_inverted_zoom_range() {
        let json = r#"{ "min_cell_size": 32, "max_cell_size": 8, "cell_size": 16 }"#;
        assert!(matches!(
            EditorConfig::from_json(json),
            Err(ConfigError::Invalid(_))
        ));
    }

    #[test]
    fn test_rejects_malformed_json() {
        assert!(matches!(
            EditorConfig::from_json("{ not json"),
            Err(ConfigError::Parse(_))
        ));
    }
}
