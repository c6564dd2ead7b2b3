//! Configuration enum types.

use crate::draw::Color;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Where the control strip sits relative to the canvas.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Default, JsonSchema)]
#[serde(rename_all = "kebab-case")]
pub enum ToolbarPosition {
    /// Above the canvas
    #[default]
    Top,
    /// Below the canvas
    Bottom,
}

/// Color specification - a hex string, a named color, or RGB values.
///
/// # Examples
/// ```toml
/// # Hex color
/// line_color = "#000000"
///
/// # Named color
/// line_color = "red"
///
/// # Custom RGB color (0-255 per component)
/// line_color = [255, 128, 0]
/// ```
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, JsonSchema)]
#[serde(untagged)]
pub enum ColorSpec {
    /// `#rrggbb`, `#rgb`, or a palette name (red, green, blue, yellow, orange, pink, white, black)
    Name(String),
    /// RGB color as [red, green, blue] where each component is 0-255
    Rgb([u8; 3]),
}

impl ColorSpec {
    /// Converts the specification to a [`Color`], or `None` when the string
    /// is neither valid hex nor a known name.
    pub fn to_color(&self) -> Option<Color> {
        match self {
            ColorSpec::Name(name) if name.trim_start().starts_with('#') => Color::from_hex(name),
            ColorSpec::Name(name) => crate::util::name_to_color(name),
            ColorSpec::Rgb([r, g, b]) => Some(Color::from_rgb8(*r, *g, *b)),
        }
    }
}

impl From<&str> for ColorSpec {
    fn from(value: &str) -> Self {
        ColorSpec::Name(value.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::draw::{ORANGE, RED, WHITE};

    #[test]
    fn color_spec_variants_resolve() {
        assert_eq!(ColorSpec::from("#ffffff").to_color(), Some(WHITE));
        assert_eq!(ColorSpec::from("red").to_color(), Some(RED));
        assert_eq!(
            ColorSpec::Rgb([255, 128, 0]).to_color().map(|c| c.to_rgb8()),
            Some(ORANGE.to_rgb8())
        );
        assert_eq!(ColorSpec::from("#nothex").to_color(), None);
        assert_eq!(ColorSpec::from("mauve").to_color(), None);
    }

    #[test]
    fn toolbar_position_uses_kebab_case() {
        #[derive(Deserialize)]
        struct Wrapper {
            position: ToolbarPosition,
        }
        let parsed: Wrapper = toml::from_str("position = \"bottom\"").unwrap();
        assert_eq!(parsed.position, ToolbarPosition::Bottom);
    }
}
