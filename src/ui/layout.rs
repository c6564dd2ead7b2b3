//! Widget layout: control strip, bordered canvas wrapper, and hit-testing.
//!
//! Layout is fixed-metric (no font measurement) so that hit-testing is
//! deterministic and independent of the installed fonts.

use crate::config::{LINE_WIDTH_RANGE, ToolbarConfig, ToolbarPosition};
use crate::util::Rect;
use serde::{Deserialize, Serialize};

// ============================================================================
// Layout Constants (not configurable)
// ============================================================================

/// Canvas wrapper border width
pub const BORDER_WIDTH: f64 = 1.0;
/// Padding inside the toolbar strip
const TOOLBAR_PADDING: f64 = 10.0;
/// Edge length of square controls and height of every control
const CONTROL_SIZE: f64 = 30.0;
/// Horizontal gap between adjacent controls
const CONTROL_GAP: f64 = 6.0;
/// Space between the toolbar and the canvas wrapper
const TOOLBAR_MARGIN: f64 = 10.0;
/// "Size:" caption in front of the slider
const SLIDER_CAPTION_WIDTH: f64 = 34.0;
/// Slider track width
const SLIDER_TRACK_WIDTH: f64 = 80.0;
/// "NNpx" readout after the slider
const SLIDER_READOUT_WIDTH: f64 = 34.0;
/// Space between the slider track and its readout
const SLIDER_READOUT_GAP: f64 = 4.0;
/// Width of each push button
const BUTTON_WIDTH: f64 = 44.0;

/// Toolbar controls, in left-to-right order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Control {
    /// Cycles through the fixed palette; it cannot pick an off-palette color
    ColorPicker,
    SizeSlider,
    Undo,
    Redo,
    Clear,
    Save,
}

impl Control {
    /// Button caption (push buttons only).
    pub fn label(&self) -> &'static str {
        match self {
            Control::ColorPicker => "Color",
            Control::SizeSlider => "Size:",
            Control::Undo => "Undo",
            Control::Redo => "Redo",
            Control::Clear => "Clear",
            Control::Save => "Save",
        }
    }

    pub fn is_button(&self) -> bool {
        matches!(
            self,
            Control::Undo | Control::Redo | Control::Clear | Control::Save
        )
    }
}

/// Computed positions of every widget part, in client coordinates.
#[derive(Debug, Clone, PartialEq)]
pub struct Layout {
    /// Toolbar strip, when the toolbar is shown
    pub toolbar: Option<Rect>,
    /// Bordered region enclosing the canvas
    pub wrapper: Rect,
    /// Canvas pixel area (inside the border)
    pub canvas: Rect,
    controls: Vec<(Control, Rect)>,
}

impl Layout {
    /// Lays out a `width` x `height` canvas plus toolbar at `origin`.
    pub fn compute(origin: (f64, f64), width: u32, height: u32, toolbar: &ToolbarConfig) -> Self {
        let (ox, oy) = origin;
        let wrapper_w = width as f64 + BORDER_WIDTH * 2.0;
        let wrapper_h = height as f64 + BORDER_WIDTH * 2.0;
        let strip_h = TOOLBAR_PADDING * 2.0 + CONTROL_SIZE;

        let (toolbar_rect, wrapper) = if toolbar.show_toolbar {
            match toolbar.position {
                ToolbarPosition::Top => (
                    Some(Rect::new(ox, oy, wrapper_w, strip_h)),
                    Rect::new(ox, oy + strip_h + TOOLBAR_MARGIN, wrapper_w, wrapper_h),
                ),
                ToolbarPosition::Bottom => (
                    Some(Rect::new(
                        ox,
                        oy + wrapper_h + TOOLBAR_MARGIN,
                        wrapper_w,
                        strip_h,
                    )),
                    Rect::new(ox, oy, wrapper_w, wrapper_h),
                ),
            }
        } else {
            (None, Rect::new(ox, oy, wrapper_w, wrapper_h))
        };

        let canvas = Rect::new(
            wrapper.x + BORDER_WIDTH,
            wrapper.y + BORDER_WIDTH,
            width as f64,
            height as f64,
        );

        let controls = toolbar_rect
            .map(|strip| Self::place_controls(strip, toolbar))
            .unwrap_or_default();

        Self {
            toolbar: toolbar_rect,
            wrapper,
            canvas,
            controls,
        }
    }

    fn place_controls(strip: Rect, toolbar: &ToolbarConfig) -> Vec<(Control, Rect)> {
        let mut controls = Vec::new();
        let y = strip.y + TOOLBAR_PADDING;

        // Left group: picker and slider
        let mut x = strip.x + TOOLBAR_PADDING;
        if toolbar.show_color_picker {
            controls.push((
                Control::ColorPicker,
                Rect::new(x, y, CONTROL_SIZE, CONTROL_SIZE),
            ));
            x += CONTROL_SIZE + CONTROL_GAP;
        }
        if toolbar.show_size_slider {
            let track_x = x + SLIDER_CAPTION_WIDTH;
            controls.push((
                Control::SizeSlider,
                Rect::new(track_x, y, SLIDER_TRACK_WIDTH, CONTROL_SIZE),
            ));
        }

        // Right group: push buttons, right-aligned
        let buttons: Vec<Control> = [
            (toolbar.show_undo_button, Control::Undo),
            (toolbar.show_redo_button, Control::Redo),
            (toolbar.show_clear_button, Control::Clear),
            (toolbar.show_save_button, Control::Save),
        ]
        .into_iter()
        .filter_map(|(shown, control)| shown.then_some(control))
        .collect();

        if !buttons.is_empty() {
            let count = buttons.len() as f64;
            let group_w = count * BUTTON_WIDTH + (count - 1.0) * CONTROL_GAP;
            let mut x = strip.right() - TOOLBAR_PADDING - group_w;
            for control in buttons {
                controls.push((control, Rect::new(x, y, BUTTON_WIDTH, CONTROL_SIZE)));
                x += BUTTON_WIDTH + CONTROL_GAP;
            }
        }

        controls
    }

    /// Returns the control under a client coordinate, if any.
    pub fn hit_test(&self, x: f64, y: f64) -> Option<Control> {
        self.controls
            .iter()
            .find(|(_, rect)| rect.contains(x, y))
            .map(|(control, _)| *control)
    }

    /// Rectangle occupied by `control`, when it is shown.
    pub fn control_rect(&self, control: Control) -> Option<Rect> {
        self.controls
            .iter()
            .find(|(c, _)| *c == control)
            .map(|(_, rect)| *rect)
    }

    /// Shown controls with their rectangles, in layout order.
    pub fn controls(&self) -> impl Iterator<Item = (Control, Rect)> + '_ {
        self.controls.iter().copied()
    }

    /// Client position of canvas pixel (0, 0).
    pub fn canvas_origin(&self) -> (f64, f64) {
        (self.canvas.x, self.canvas.y)
    }

    /// Rectangle enclosing the toolbar and the wrapper.
    pub fn bounds(&self) -> Rect {
        match self.toolbar {
            Some(strip) => {
                let x = strip.x.min(self.wrapper.x);
                let y = strip.y.min(self.wrapper.y);
                let right = strip.right().max(self.wrapper.right());
                let bottom = strip.bottom().max(self.wrapper.bottom());
                Rect::new(x, y, right - x, bottom - y)
            }
            None => self.wrapper,
        }
    }

    /// Stroke width selected by a pointer at client `x` on the slider track.
    pub fn slider_value_at(&self, x: f64) -> Option<f64> {
        let track = self.control_rect(Control::SizeSlider)?;
        let (min, max) = LINE_WIDTH_RANGE;
        let t = ((x - track.x) / track.width).clamp(0.0, 1.0);
        Some((min + t * (max - min)).round())
    }

    /// Client X of the slider knob for a given stroke width.
    pub fn slider_knob_x(&self, width: f64) -> Option<f64> {
        let track = self.control_rect(Control::SizeSlider)?;
        let (min, max) = LINE_WIDTH_RANGE;
        let t = ((width - min) / (max - min)).clamp(0.0, 1.0);
        Some(track.x + t * track.width)
    }

    /// Caption area in front of the slider track.
    pub(crate) fn slider_caption(&self) -> Option<Rect> {
        let track = self.control_rect(Control::SizeSlider)?;
        Some(Rect::new(
            track.x - SLIDER_CAPTION_WIDTH,
            track.y,
            SLIDER_CAPTION_WIDTH,
            track.height,
        ))
    }

    /// Readout area after the slider track.
    pub(crate) fn slider_readout(&self) -> Option<Rect> {
        let track = self.control_rect(Control::SizeSlider)?;
        Some(Rect::new(
            track.right() + SLIDER_READOUT_GAP,
            track.y,
            SLIDER_READOUT_WIDTH,
            track.height,
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn layout(toolbar: ToolbarConfig) -> Layout {
        Layout::compute((0.0, 0.0), 400, 300, &toolbar)
    }

    #[test]
    fn top_toolbar_pushes_canvas_down() {
        let layout = layout(ToolbarConfig::default());
        let strip = layout.toolbar.unwrap();
        assert_eq!(strip, Rect::new(0.0, 0.0, 402.0, 50.0));
        assert_eq!(layout.wrapper, Rect::new(0.0, 60.0, 402.0, 302.0));
        assert_eq!(layout.canvas_origin(), (1.0, 61.0));
        assert_eq!(layout.bounds(), Rect::new(0.0, 0.0, 402.0, 362.0));
    }

    #[test]
    fn bottom_toolbar_sits_below_wrapper() {
        let layout = layout(ToolbarConfig {
            position: ToolbarPosition::Bottom,
            ..ToolbarConfig::default()
        });
        assert_eq!(layout.canvas_origin(), (1.0, 1.0));
        assert_eq!(layout.toolbar.unwrap().y, 312.0);
    }

    #[test]
    fn hidden_toolbar_has_no_controls() {
        let layout = Layout::compute(
            (30.0, 40.0),
            100,
            100,
            &ToolbarConfig {
                show_toolbar: false,
                ..ToolbarConfig::default()
            },
        );
        assert!(layout.toolbar.is_none());
        assert_eq!(layout.controls().count(), 0);
        assert_eq!(layout.canvas_origin(), (31.0, 41.0));
        assert_eq!(layout.bounds(), layout.wrapper);
    }

    #[test]
    fn every_shown_control_is_hit_at_its_center() {
        let layout = layout(ToolbarConfig::default());
        assert_eq!(layout.controls().count(), 6);
        for (control, rect) in layout.controls() {
            let (cx, cy) = rect.center();
            assert_eq!(layout.hit_test(cx, cy), Some(control));
        }
        let (cx, cy) = layout.canvas.center();
        assert_eq!(layout.hit_test(cx, cy), None);
    }

    #[test]
    fn hidden_controls_are_skipped() {
        let layout = layout(ToolbarConfig {
            show_color_picker: false,
            show_redo_button: false,
            show_save_button: false,
            ..ToolbarConfig::default()
        });
        let shown: Vec<Control> = layout.controls().map(|(c, _)| c).collect();
        assert_eq!(
            shown,
            vec![Control::SizeSlider, Control::Undo, Control::Clear]
        );
        assert!(shown.iter().skip(1).all(Control::is_button));
        // Slider moves to the left edge when the picker is hidden
        assert_eq!(layout.control_rect(Control::SizeSlider).unwrap().x, 44.0);
    }

    #[test]
    fn slider_maps_track_onto_width_range() {
        let layout = layout(ToolbarConfig::default());
        let track = layout.control_rect(Control::SizeSlider).unwrap();
        assert_eq!(layout.slider_value_at(track.x - 20.0), Some(1.0));
        assert_eq!(layout.slider_value_at(track.right() + 20.0), Some(50.0));
        assert_eq!(layout.slider_value_at(track.x + track.width / 2.0), Some(26.0));
        assert_eq!(layout.slider_knob_x(1.0), Some(track.x));
        assert_eq!(layout.slider_knob_x(50.0), Some(track.right()));
    }
}
