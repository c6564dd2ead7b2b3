//! History navigation, canvas-wide actions and tool controls.

use super::decode::DecodeJob;
use super::options::{LoadCallback, clamp_line_width};
use super::types::{StrokeState, SurfaceError};
use super::widget::{SketchSurface, blank_canvas};
use crate::draw::{Color, fill_background, next_in_palette};
use crate::image::{EncodedImage, ImageSource};
use crate::ui::{Control, Layout};

impl SketchSurface {
    /// Steps back one snapshot. No-op at the start of the history.
    ///
    /// The canvas is repainted once the snapshot has been decoded.
    pub fn undo(&mut self) -> Result<(), SurfaceError> {
        let Some(snapshot) = self.history.step_back() else {
            log::debug!("Nothing to undo");
            return Ok(());
        };
        log::debug!("Undo to snapshot {}", self.history.cursor());
        self.request_decode(ImageSource::Encoded(snapshot), DecodeJob::Restore)
    }

    /// Re-applies the most recently undone snapshot. No-op when nothing was undone.
    pub fn redo(&mut self) -> Result<(), SurfaceError> {
        let Some(snapshot) = self.history.step_forward() else {
            log::debug!("Nothing to redo");
            return Ok(());
        };
        log::debug!("Redo to snapshot {}", self.history.cursor());
        self.request_decode(ImageSource::Encoded(snapshot), DecodeJob::Restore)
    }

    /// Fills the canvas with the background color and records it.
    pub fn clear(&mut self) -> Result<(), SurfaceError> {
        self.apply_pending();
        {
            let ctx = self.context()?;
            fill_background(&ctx, self.options.background_color)?;
        }
        self.canvas.flush();
        self.commit_snapshot()?;
        log::info!("Canvas cleared");
        self.hooks.cleared();
        Ok(())
    }

    /// Encodes the canvas and hands it to the `on_save` hook.
    ///
    /// Pending decodes are applied first so the saved image matches the
    /// history cursor.
    pub fn save(&mut self) -> Result<EncodedImage, SurfaceError> {
        self.apply_pending();
        let image = self.drawing_data()?;
        log::info!("Saving drawing ({} bytes)", image.len());
        self.hooks.saved(&image);
        Ok(image)
    }

    /// Encodes the canvas as PNG without notifying anyone.
    pub fn drawing_data(&self) -> Result<EncodedImage, SurfaceError> {
        EncodedImage::encode(&self.canvas)
    }

    /// Replaces the drawing with an image, stretched to the canvas size.
    ///
    /// Returns as soon as the decode is queued. When it has been applied the
    /// result is committed to the history and `on_complete` runs. A source
    /// that cannot be decoded is reported through `on_error` instead.
    pub fn load_image(
        &mut self,
        source: impl Into<ImageSource>,
        on_complete: Option<LoadCallback>,
    ) -> Result<(), SurfaceError> {
        let source = source.into();
        log::info!("Loading image from {}", source.describe());
        self.request_decode(source, DecodeJob::Load { on_complete })
    }

    /// Reallocates the canvas at a new size and rescales the current drawing
    /// onto it.
    ///
    /// Any stroke in progress is dropped without being committed. Pending
    /// decodes are applied first, so a load still in flight is what gets
    /// rescaled.
    pub fn resize(&mut self, width: u32, height: u32) -> Result<(), SurfaceError> {
        if width == 0 || height == 0 {
            return Err(SurfaceError::InvalidDimensions { width, height });
        }
        self.apply_pending();

        if self.stroke.is_stroking() {
            log::debug!("Abandoning stroke in progress for resize");
        }
        self.stroke = StrokeState::Idle;
        self.slider_drag = false;

        let current = self.history.current().clone();
        self.canvas = blank_canvas(width, height, self.options.background_color)?;
        self.layout = Layout::compute(self.mount_origin, width, height, &self.options.toolbar);
        log::info!("Canvas resized to {width}x{height}");

        self.request_decode(ImageSource::Encoded(current), DecodeJob::Reload)
    }

    /// Sets the color used by subsequent strokes.
    pub fn set_line_color(&mut self, color: Color) {
        log::debug!("Line color set to {}", color.to_hex());
        self.params.color = color;
    }

    /// Sets the width used by subsequent strokes, clamped to the slider range.
    pub fn set_line_width(&mut self, width: f64) {
        let clamped = clamp_line_width(width);
        if clamped != width {
            log::warn!("Line width {width:.1} out of range, using {clamped:.1}");
        }
        log::debug!("Line width set to {clamped:.0}px");
        self.params.width = clamped;
    }

    /// Performs a toolbar control's action as if it had been clicked.
    ///
    /// The color picker advances to the next palette color; arbitrary colors
    /// go through [`SketchSurface::set_line_color`]. The size slider needs a
    /// position and is only adjusted through pointer input.
    pub fn activate(&mut self, control: Control) -> Result<(), SurfaceError> {
        log::debug!("Activating {control:?}");
        match control {
            Control::ColorPicker => {
                self.set_line_color(next_in_palette(self.params.color));
                Ok(())
            }
            Control::SizeSlider => Ok(()),
            Control::Undo => self.undo(),
            Control::Redo => self.redo(),
            Control::Clear => self.clear(),
            Control::Save => self.save().map(|_| ()),
        }
    }
}
