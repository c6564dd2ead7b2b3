//! Cairo-based rendering functions for strokes and canvas fills.

use super::color::Color;

/// Fills the entire canvas with a solid color.
///
/// Uses the `Source` operator so that any prior content (including
/// translucent pixels) is replaced rather than blended.
///
/// # Arguments
/// * `ctx` - Cairo drawing context to render to
/// * `color` - Fill color
pub fn fill_background(ctx: &cairo::Context, color: Color) -> Result<(), cairo::Error> {
    ctx.save()?;
    ctx.set_operator(cairo::Operator::Source);
    color.apply(ctx);
    ctx.paint()?;
    ctx.restore()
}

fn set_stroke_style(ctx: &cairo::Context, color: Color, width: f64) {
    color.apply(ctx);
    ctx.set_line_width(width);
    ctx.set_line_cap(cairo::LineCap::Round);
    ctx.set_line_join(cairo::LineJoin::Round);
}

/// Renders a zero-length segment so a tap leaves a visible round mark.
pub fn render_dot(ctx: &cairo::Context, x: f64, y: f64, color: Color, width: f64) {
    set_stroke_style(ctx, color, width);
    ctx.move_to(x, y);
    ctx.line_to(x, y);
    let _ = ctx.stroke();
}

/// Renders one straight stroke segment with round caps and joins.
pub fn render_segment(
    ctx: &cairo::Context,
    from: (f64, f64),
    to: (f64, f64),
    color: Color,
    width: f64,
) {
    set_stroke_style(ctx, color, width);
    ctx.move_to(from.0, from.1);
    ctx.line_to(to.0, to.1);
    let _ = ctx.stroke();
}

/// Paints `image` with its top-left corner at the origin, at native size.
pub fn paint_image(ctx: &cairo::Context, image: &cairo::ImageSurface) -> Result<(), cairo::Error> {
    ctx.save()?;
    ctx.set_source_surface(image, 0.0, 0.0)?;
    ctx.paint()?;
    ctx.restore()
}

/// Paints `image` stretched to exactly cover a `width` x `height` target.
///
/// Aspect ratio is not preserved.
pub fn paint_image_scaled(
    ctx: &cairo::Context,
    image: &cairo::ImageSurface,
    width: f64,
    height: f64,
) -> Result<(), cairo::Error> {
    let (src_w, src_h) = (image.width() as f64, image.height() as f64);
    if src_w <= 0.0 || src_h <= 0.0 {
        return Ok(());
    }

    ctx.save()?;
    ctx.scale(width / src_w, height / src_h);
    ctx.set_source_surface(image, 0.0, 0.0)?;
    ctx.source().set_extend(cairo::Extend::Pad);
    ctx.rectangle(0.0, 0.0, src_w, src_h);
    ctx.fill()?;
    ctx.restore()
}
