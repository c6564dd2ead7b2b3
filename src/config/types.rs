//! Configuration type definitions.

use super::enums::{ColorSpec, ToolbarPosition};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Canvas and stroke defaults.
///
/// Controls the surface size and the drawing parameters a new surface starts
/// with. The toolbar color picker and size slider change the active values at
/// runtime without touching these defaults.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct CanvasConfig {
    /// Canvas width in pixels
    #[serde(default = "default_width")]
    pub width: u32,

    /// Canvas height in pixels
    #[serde(default = "default_height")]
    pub height: u32,

    /// Default stroke width in pixels (valid range: 1.0 - 50.0)
    #[serde(default = "default_line_width")]
    pub line_width: f64,

    /// Default stroke color (hex like "#000000", a palette name, or `[r, g, b]`)
    #[serde(default = "default_line_color")]
    pub line_color: ColorSpec,

    /// Fill color used for the blank canvas, clear, and image loads
    #[serde(default = "default_background_color")]
    pub background_color: ColorSpec,
}

impl Default for CanvasConfig {
    fn default() -> Self {
        Self {
            width: default_width(),
            height: default_height(),
            line_width: default_line_width(),
            line_color: default_line_color(),
            background_color: default_background_color(),
        }
    }
}

/// Control strip placement and per-control visibility.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct ToolbarConfig {
    /// Place the toolbar above ("top") or below ("bottom") the canvas
    #[serde(default)]
    pub position: ToolbarPosition,

    /// Show the toolbar at all; when false every control is hidden
    #[serde(default = "default_true")]
    pub show_toolbar: bool,

    #[serde(default = "default_true")]
    pub show_color_picker: bool,

    #[serde(default = "default_true")]
    pub show_size_slider: bool,

    #[serde(default = "default_true")]
    pub show_undo_button: bool,

    #[serde(default = "default_true")]
    pub show_redo_button: bool,

    #[serde(default = "default_true")]
    pub show_clear_button: bool,

    #[serde(default = "default_true")]
    pub show_save_button: bool,
}

impl Default for ToolbarConfig {
    fn default() -> Self {
        Self {
            position: ToolbarPosition::default(),
            show_toolbar: true,
            show_color_picker: true,
            show_size_slider: true,
            show_undo_button: true,
            show_redo_button: true,
            show_clear_button: true,
            show_save_button: true,
        }
    }
}

/// Where saved drawings are written.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct ExportConfig {
    /// Directory for saved drawings (`~/` is expanded)
    #[serde(default = "default_export_directory")]
    pub directory: String,

    /// Filename template (chrono format specifiers); `.png` is appended
    #[serde(default = "default_filename_template")]
    pub filename_template: String,
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            directory: default_export_directory(),
            filename_template: default_filename_template(),
        }
    }
}

// =============================================================================
// Default value functions
// =============================================================================

pub(crate) fn default_width() -> u32 {
    500
}

pub(crate) fn default_height() -> u32 {
    500
}

pub(crate) fn default_line_width() -> f64 {
    5.0
}

pub(crate) fn default_line_color() -> ColorSpec {
    ColorSpec::Name("#000000".to_string())
}

pub(crate) fn default_background_color() -> ColorSpec {
    ColorSpec::Name("#ffffff".to_string())
}

fn default_true() -> bool {
    true
}

fn default_export_directory() -> String {
    dirs::picture_dir()
        .map(|dir| dir.join("Sketchboard").to_string_lossy().into_owned())
        .unwrap_or_else(|| "~/Pictures/Sketchboard".to_string())
}

fn default_filename_template() -> String {
    "sketch_%Y-%m-%d_%H%M%S".to_string()
}
