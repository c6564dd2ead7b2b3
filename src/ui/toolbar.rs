//! Widget rendering: control strip, bordered wrapper, and canvas pixels.

use super::layout::{BORDER_WIDTH, Control, Layout};
use crate::draw::{Color, WHITE};
use crate::surface::SketchSurface;
use crate::util::Rect;

// ============================================================================
// Widget Colors (not configurable)
// ============================================================================

/// Toolbar strip background (#f5f5f5)
const TOOLBAR_BG: [f64; 3] = [245.0 / 255.0, 245.0 / 255.0, 245.0 / 255.0];
/// Canvas wrapper border (#cccccc)
const BORDER_COLOR: [f64; 3] = [0.8, 0.8, 0.8];
/// Push button fill (#4caf50)
const BUTTON_COLOR: [f64; 3] = [76.0 / 255.0, 175.0 / 255.0, 80.0 / 255.0];
/// Caption and readout text
const LABEL_COLOR: [f64; 3] = [0.2, 0.2, 0.2];
/// Slider track fill
const TRACK_COLOR: [f64; 3] = [0.75, 0.75, 0.75];

const TRACK_HEIGHT: f64 = 4.0;
const KNOB_RADIUS: f64 = 7.0;
const LABEL_FONT_SIZE: f64 = 12.0;
/// Fallback character width when text measurement fails
const CHAR_WIDTH_ESTIMATE: f64 = 7.0;

/// Draws the whole widget in client coordinates.
///
/// `ctx` must cover at least [`Layout::bounds`]. Failures of individual
/// drawing calls are ignored; the canvas blit is the only fallible step.
pub fn render_view(ctx: &cairo::Context, surface: &SketchSurface) -> Result<(), cairo::Error> {
    let layout = surface.layout();

    if let Some(strip) = layout.toolbar {
        render_toolbar(ctx, layout, strip, surface);
    }

    // Border drawn on pixel centers so it covers exactly one pixel
    let wrapper = layout.wrapper;
    let [r, g, b] = BORDER_COLOR;
    ctx.set_source_rgb(r, g, b);
    ctx.set_line_width(BORDER_WIDTH);
    let inset = BORDER_WIDTH / 2.0;
    ctx.rectangle(
        wrapper.x + inset,
        wrapper.y + inset,
        wrapper.width - BORDER_WIDTH,
        wrapper.height - BORDER_WIDTH,
    );
    let _ = ctx.stroke();

    let (cx, cy) = layout.canvas_origin();
    ctx.save()?;
    ctx.set_source_surface(surface.canvas(), cx, cy)?;
    ctx.rectangle(cx, cy, layout.canvas.width, layout.canvas.height);
    ctx.fill()?;
    ctx.restore()
}

fn render_toolbar(ctx: &cairo::Context, layout: &Layout, strip: Rect, surface: &SketchSurface) {
    let [r, g, b] = TOOLBAR_BG;
    ctx.set_source_rgb(r, g, b);
    ctx.rectangle(strip.x, strip.y, strip.width, strip.height);
    let _ = ctx.fill();

    ctx.select_font_face("Sans", cairo::FontSlant::Normal, cairo::FontWeight::Bold);
    ctx.set_font_size(LABEL_FONT_SIZE);

    let params = surface.params();
    for (control, rect) in layout.controls() {
        match control {
            Control::ColorPicker => render_swatch(ctx, rect, params.color),
            Control::SizeSlider => render_slider(ctx, layout, rect, params.width),
            _ => render_button(ctx, rect, control.label()),
        }
    }
}

fn render_swatch(ctx: &cairo::Context, rect: Rect, color: Color) {
    color.apply(ctx);
    ctx.rectangle(rect.x, rect.y, rect.width, rect.height);
    let _ = ctx.fill();

    let [r, g, b] = BORDER_COLOR;
    ctx.set_source_rgb(r, g, b);
    ctx.set_line_width(1.0);
    ctx.rectangle(rect.x + 0.5, rect.y + 0.5, rect.width - 1.0, rect.height - 1.0);
    let _ = ctx.stroke();
}

fn render_slider(ctx: &cairo::Context, layout: &Layout, track: Rect, width: f64) {
    let mid_y = track.y + track.height / 2.0;

    let [r, g, b] = TRACK_COLOR;
    ctx.set_source_rgb(r, g, b);
    ctx.rectangle(track.x, mid_y - TRACK_HEIGHT / 2.0, track.width, TRACK_HEIGHT);
    let _ = ctx.fill();

    if let Some(knob_x) = layout.slider_knob_x(width) {
        let [r, g, b] = BUTTON_COLOR;
        ctx.set_source_rgb(r, g, b);
        ctx.arc(knob_x, mid_y, KNOB_RADIUS, 0.0, 2.0 * std::f64::consts::PI);
        let _ = ctx.fill();
    }

    let [r, g, b] = LABEL_COLOR;
    ctx.set_source_rgb(r, g, b);
    if let Some(caption) = layout.slider_caption() {
        show_label(ctx, caption, Control::SizeSlider.label(), false);
    }
    if let Some(readout) = layout.slider_readout() {
        show_label(ctx, readout, &format!("{}px", width as i32), false);
    }
}

fn render_button(ctx: &cairo::Context, rect: Rect, label: &str) {
    let [r, g, b] = BUTTON_COLOR;
    ctx.set_source_rgb(r, g, b);
    ctx.rectangle(rect.x, rect.y, rect.width, rect.height);
    let _ = ctx.fill();

    WHITE.apply(ctx);
    show_label(ctx, rect, label, true);
}

/// Draws `text` vertically centered in `rect`, optionally centered horizontally.
fn show_label(ctx: &cairo::Context, rect: Rect, text: &str, centered: bool) {
    let (text_width, text_height) = match ctx.text_extents(text) {
        Ok(ext) => (ext.width(), ext.height()),
        Err(e) => {
            log::warn!("Failed to measure label '{text}': {e}, using fallback width");
            (text.len() as f64 * CHAR_WIDTH_ESTIMATE, LABEL_FONT_SIZE)
        }
    };

    let x = if centered {
        rect.x + (rect.width - text_width) / 2.0
    } else {
        rect.x
    };
    let y = rect.y + (rect.height + text_height) / 2.0;
    ctx.move_to(x, y);
    let _ = ctx.show_text(text);
}
