use super::types::SurfaceError;
use crate::config::{Config, LINE_WIDTH_RANGE, ToolbarConfig};
use crate::draw::{BLACK, Color, WHITE};
use crate::image::EncodedImage;
use std::fmt;

const DEFAULT_WIDTH: u32 = 500;
const DEFAULT_HEIGHT: u32 = 500;
const DEFAULT_LINE_WIDTH: f64 = 5.0;

/// Construction-time settings for a [`super::SketchSurface`].
///
/// Fixed once the surface exists; the toolbar only changes the active
/// [`super::DrawingParams`].
#[derive(Debug, Clone, PartialEq)]
pub struct SurfaceOptions {
    /// Canvas width in pixels
    pub width: u32,
    /// Canvas height in pixels
    pub height: u32,
    /// Initial stroke width
    pub line_width: f64,
    /// Initial stroke color
    pub line_color: Color,
    /// Fill used for the blank canvas, clear, and loads
    pub background_color: Color,
    /// Control strip placement and visibility
    pub toolbar: ToolbarConfig,
}

impl Default for SurfaceOptions {
    fn default() -> Self {
        Self {
            width: DEFAULT_WIDTH,
            height: DEFAULT_HEIGHT,
            line_width: DEFAULT_LINE_WIDTH,
            line_color: BLACK,
            background_color: WHITE,
            toolbar: ToolbarConfig::default(),
        }
    }
}

impl SurfaceOptions {
    /// Builds options from a loaded configuration file.
    pub fn from_config(config: &Config) -> Self {
        let canvas = &config.canvas;
        Self {
            width: canvas.width,
            height: canvas.height,
            line_width: canvas.line_width,
            line_color: canvas.line_color.to_color().unwrap_or(BLACK),
            background_color: canvas.background_color.to_color().unwrap_or(WHITE),
            toolbar: config.toolbar,
        }
    }

    pub fn with_size(mut self, width: u32, height: u32) -> Self {
        self.width = width;
        self.height = height;
        self
    }

    pub fn with_colors(mut self, line_color: Color, background_color: Color) -> Self {
        self.line_color = line_color;
        self.background_color = background_color;
        self
    }

    pub fn with_line_width(mut self, line_width: f64) -> Self {
        self.line_width = line_width;
        self
    }

    pub fn with_toolbar(mut self, toolbar: ToolbarConfig) -> Self {
        self.toolbar = toolbar;
        self
    }

    /// Replaces zero dimensions with the defaults and clamps the line width.
    pub(crate) fn sanitized(mut self) -> Self {
        if self.width == 0 {
            log::warn!("Surface width 0 is invalid, using {DEFAULT_WIDTH}");
            self.width = DEFAULT_WIDTH;
        }
        if self.height == 0 {
            log::warn!("Surface height 0 is invalid, using {DEFAULT_HEIGHT}");
            self.height = DEFAULT_HEIGHT;
        }
        let clamped = clamp_line_width(self.line_width);
        if clamped != self.line_width {
            log::warn!(
                "Line width {:.1} outside slider range, using {clamped:.1}",
                self.line_width
            );
            self.line_width = clamped;
        }
        self
    }
}

/// Clamps a stroke width into the slider range; NaN maps to the default.
pub fn clamp_line_width(width: f64) -> f64 {
    if width.is_nan() {
        return DEFAULT_LINE_WIDTH;
    }
    width.clamp(LINE_WIDTH_RANGE.0, LINE_WIDTH_RANGE.1)
}

/// Completion callback for [`super::SketchSurface::load_image`].
pub type LoadCallback = Box<dyn FnOnce()>;

/// Optional caller callbacks.
///
/// ```
/// use sketchboard::surface::SurfaceHooks;
/// let hooks = SurfaceHooks::new()
///     .on_save(|image| println!("saved {} bytes", image.len()))
///     .on_clear(|| println!("cleared"));
/// ```
#[derive(Default)]
pub struct SurfaceHooks {
    on_save: Option<Box<dyn FnMut(&EncodedImage)>>,
    on_clear: Option<Box<dyn FnMut()>>,
    on_draw: Option<Box<dyn FnMut()>>,
    on_error: Option<Box<dyn FnMut(&SurfaceError)>>,
}

impl SurfaceHooks {
    pub fn new() -> Self {
        Self::default()
    }

    /// Called by `save()` with the encoded drawing.
    pub fn on_save(mut self, hook: impl FnMut(&EncodedImage) + 'static) -> Self {
        self.on_save = Some(Box::new(hook));
        self
    }

    /// Called after `clear()` has committed its snapshot.
    pub fn on_clear(mut self, hook: impl FnMut() + 'static) -> Self {
        self.on_clear = Some(Box::new(hook));
        self
    }

    /// Called once per drawn stroke segment.
    pub fn on_draw(mut self, hook: impl FnMut() + 'static) -> Self {
        self.on_draw = Some(Box::new(hook));
        self
    }

    /// Called when a decode or snapshot commit fails asynchronously.
    pub fn on_error(mut self, hook: impl FnMut(&SurfaceError) + 'static) -> Self {
        self.on_error = Some(Box::new(hook));
        self
    }

    pub(crate) fn saved(&mut self, image: &EncodedImage) {
        if let Some(hook) = self.on_save.as_mut() {
            hook(image);
        }
    }

    pub(crate) fn cleared(&mut self) {
        if let Some(hook) = self.on_clear.as_mut() {
            hook();
        }
    }

    pub(crate) fn drew(&mut self) {
        if let Some(hook) = self.on_draw.as_mut() {
            hook();
        }
    }

    pub(crate) fn failed(&mut self, error: &SurfaceError) {
        if let Some(hook) = self.on_error.as_mut() {
            hook(error);
        }
    }
}

impl fmt::Debug for SurfaceHooks {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SurfaceHooks")
            .field("on_save", &self.on_save.is_some())
            .field("on_clear", &self.on_clear.is_some())
            .field("on_draw", &self.on_draw.is_some())
            .field("on_error", &self.on_error.is_some())
            .finish()
    }
}
