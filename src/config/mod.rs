//! Configuration file support for sketchboard.
//!
//! This module handles loading and validating user settings from the configuration file
//! located at `~/.config/sketchboard/config.toml`. Settings include the canvas size,
//! stroke defaults, toolbar layout, and where saved drawings go.
//!
//! If no config file exists, sensible defaults are used automatically.

pub mod enums;
pub mod types;

pub use enums::{ColorSpec, ToolbarPosition};
pub use types::{CanvasConfig, ExportConfig, ToolbarConfig};

use anyhow::{Context, Result};
use log::{debug, info};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Smallest and largest stroke width the size slider allows.
pub const LINE_WIDTH_RANGE: (f64, f64) = (1.0, 50.0);

/// Largest canvas edge accepted from configuration.
pub const MAX_CANVAS_EDGE: u32 = 8192;

/// Main configuration structure containing all user settings.
///
/// # Example TOML
/// ```toml
/// [canvas]
/// width = 500
/// height = 500
/// line_width = 5.0
/// line_color = "#000000"
/// background_color = "#ffffff"
///
/// [toolbar]
/// position = "top"
/// show_save_button = false
///
/// [export]
/// directory = "~/Pictures/Sketchboard"
/// filename_template = "sketch_%Y-%m-%d_%H%M%S"
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, Default, JsonSchema)]
pub struct Config {
    /// Canvas size and stroke defaults
    #[serde(default)]
    pub canvas: CanvasConfig,

    /// Control strip placement and visibility
    #[serde(default)]
    pub toolbar: ToolbarConfig,

    /// Output location for saved drawings
    #[serde(default)]
    pub export: ExportConfig,
}

impl Config {
    /// Validates and clamps all configuration values to acceptable ranges.
    ///
    /// Invalid values are replaced or clamped and a warning is logged.
    ///
    /// Validated ranges:
    /// - `width` / `height`: 1 - 8192 (0 falls back to the default)
    /// - `line_width`: 1.0 - 50.0
    /// - `line_color` / `background_color`: must parse, else the default is used
    pub fn validate_and_clamp(&mut self) {
        if self.canvas.width == 0 {
            log::warn!("Invalid canvas width 0, using {}", types::default_width());
            self.canvas.width = types::default_width();
        }
        if self.canvas.height == 0 {
            log::warn!("Invalid canvas height 0, using {}", types::default_height());
            self.canvas.height = types::default_height();
        }
        if self.canvas.width > MAX_CANVAS_EDGE || self.canvas.height > MAX_CANVAS_EDGE {
            log::warn!(
                "Canvas {}x{} exceeds {MAX_CANVAS_EDGE}px, clamping",
                self.canvas.width,
                self.canvas.height
            );
            self.canvas.width = self.canvas.width.min(MAX_CANVAS_EDGE);
            self.canvas.height = self.canvas.height.min(MAX_CANVAS_EDGE);
        }

        let (min_width, max_width) = LINE_WIDTH_RANGE;
        if !(min_width..=max_width).contains(&self.canvas.line_width) {
            log::warn!(
                "Invalid line_width {:.1}, clamping to {min_width}-{max_width} range",
                self.canvas.line_width
            );
            // NaN would survive clamp, so treat it as the default
            self.canvas.line_width = if self.canvas.line_width.is_nan() {
                types::default_line_width()
            } else {
                self.canvas.line_width.clamp(min_width, max_width)
            };
        }

        if self.canvas.line_color.to_color().is_none() {
            log::warn!(
                "Invalid line_color {:?}, falling back to black",
                self.canvas.line_color
            );
            self.canvas.line_color = types::default_line_color();
        }

        if self.canvas.background_color.to_color().is_none() {
            log::warn!(
                "Invalid background_color {:?}, falling back to white",
                self.canvas.background_color
            );
            self.canvas.background_color = types::default_background_color();
        }

        if self.export.filename_template.trim().is_empty() {
            log::warn!("Empty export filename_template, using default");
            self.export.filename_template = ExportConfig::default().filename_template;
        }
    }

    /// Returns the path to the configuration file.
    ///
    /// The config file is located at `~/.config/sketchboard/config.toml`.
    ///
    /// # Errors
    /// Returns an error if the config directory cannot be determined (e.g., HOME not set).
    pub fn get_config_path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .context("Could not find config directory")?
            .join("sketchboard");

        Ok(config_dir.join("config.toml"))
    }

    /// Loads configuration from the default location, or returns defaults if not found.
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::get_config_path()?)
    }

    /// Loads configuration from `config_path`, or returns defaults if the file is absent.
    ///
    /// All loaded values are validated and clamped to acceptable ranges.
    ///
    /// # Errors
    /// Returns an error if:
    /// - The file exists but cannot be read
    /// - The file exists but contains invalid TOML syntax
    pub fn load_from(config_path: &Path) -> Result<Self> {
        if !config_path.exists() {
            info!("Config file not found, using defaults");
            debug!("Expected config at: {}", config_path.display());
            return Ok(Self::default());
        }

        let config_str = fs::read_to_string(config_path)
            .with_context(|| format!("Failed to read config from {}", config_path.display()))?;

        let mut config: Config = toml::from_str(&config_str)
            .with_context(|| format!("Failed to parse config from {}", config_path.display()))?;

        config.validate_and_clamp();

        info!("Loaded config from {}", config_path.display());
        debug!("Config: {:?}", config);

        Ok(config)
    }

    /// Writes the bundled example config (with documentation comments) to `config_path`.
    ///
    /// # Errors
    /// Returns an error if:
    /// - A config file already exists at the target path
    /// - The config directory cannot be created
    /// - The file cannot be written
    pub fn create_default_file(config_path: &Path) -> Result<()> {
        if config_path.exists() {
            return Err(anyhow::anyhow!(
                "Config file already exists at {}",
                config_path.display()
            ));
        }

        if let Some(parent) = config_path.parent() {
            fs::create_dir_all(parent).context("Failed to create config directory")?;
        }

        let default_config = include_str!("../../config.example.toml");
        fs::write(config_path, default_config)
            .with_context(|| format!("Failed to write config to {}", config_path.display()))?;

        info!("Created default config at {}", config_path.display());
        Ok(())
    }

    /// JSON schema describing the configuration file.
    pub fn json_schema() -> schemars::Schema {
        schemars::schema_for!(Config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn defaults_match_documented_values() {
        let config = Config::default();
        assert_eq!(config.canvas.width, 500);
        assert_eq!(config.canvas.height, 500);
        assert_eq!(config.canvas.line_width, 5.0);
        assert_eq!(config.canvas.line_color, ColorSpec::from("#000000"));
        assert_eq!(config.canvas.background_color, ColorSpec::from("#ffffff"));
        assert_eq!(config.toolbar.position, ToolbarPosition::Top);
        assert!(config.toolbar.show_toolbar && config.toolbar.show_save_button);
    }

    #[test]
    fn validate_clamps_and_replaces_bad_values() {
        let mut config = Config::default();
        config.canvas.width = 0;
        config.canvas.height = 10_000;
        config.canvas.line_width = 80.0;
        config.canvas.line_color = ColorSpec::from("not-a-color");
        config.validate_and_clamp();

        assert_eq!(config.canvas.width, 500);
        assert_eq!(config.canvas.height, MAX_CANVAS_EDGE);
        assert_eq!(config.canvas.line_width, 50.0);
        assert_eq!(config.canvas.line_color, ColorSpec::from("#000000"));
    }

    #[test]
    fn load_from_missing_file_uses_defaults() {
        let temp = TempDir::new().unwrap();
        let config = Config::load_from(&temp.path().join("absent.toml")).unwrap();
        assert_eq!(config.canvas.width, 500);
    }

    #[test]
    fn load_from_partial_file_fills_defaults() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("config.toml");
        fs::write(
            &path,
            "[canvas]\nwidth = 320\nline_width = 0.2\n\n[toolbar]\nposition = \"bottom\"\nshow_redo_button = false\n",
        )
        .unwrap();

        let config = Config::load_from(&path).unwrap();
        assert_eq!(config.canvas.width, 320);
        assert_eq!(config.canvas.height, 500);
        assert_eq!(config.canvas.line_width, 1.0);
        assert_eq!(config.toolbar.position, ToolbarPosition::Bottom);
        assert!(!config.toolbar.show_redo_button);
        assert!(config.toolbar.show_undo_button);
    }

    #[test]
    fn load_from_rejects_invalid_toml() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("config.toml");
        fs::write(&path, "[canvas\nwidth = ").unwrap();
        assert!(Config::load_from(&path).is_err());
    }

    #[test]
    fn example_config_parses_and_creates_once() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("nested").join("config.toml");
        Config::create_default_file(&path).unwrap();
        let config = Config::load_from(&path).unwrap();
        assert_eq!(config.canvas.width, 500);
        assert!(Config::create_default_file(&path).is_err());
    }

    #[test]
    fn json_schema_lists_sections() {
        let schema = serde_json::to_value(Config::json_schema()).unwrap();
        let properties = schema.get("properties").unwrap();
        assert!(properties.get("canvas").is_some());
        assert!(properties.get("toolbar").is_some());
        assert!(properties.get("export").is_some());
    }
}
