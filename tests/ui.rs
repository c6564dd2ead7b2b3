use cairo::{Context, ImageSurface};
use sketchboard::config::{ToolbarConfig, ToolbarPosition};
use sketchboard::draw::RED;
use sketchboard::host::Document;
use sketchboard::input::PointerEvent;
use sketchboard::ui::{Control, render_view};
use sketchboard::{SketchSurface, SurfaceHooks, SurfaceOptions};

fn make_surface(runtime: &tokio::runtime::Runtime, toolbar: ToolbarConfig) -> SketchSurface {
    let document = Document::new().with_mount("board", 0.0, 0.0);
    SketchSurface::new(
        &document,
        "board",
        SurfaceOptions::default()
            .with_size(400, 300)
            .with_toolbar(toolbar),
        SurfaceHooks::default(),
        runtime.handle(),
    )
    .unwrap()
}

fn render(surface: &SketchSurface) -> ImageSurface {
    let bounds = surface.layout().bounds();
    let target = ImageSurface::create(
        cairo::Format::ARgb32,
        bounds.width as i32,
        bounds.height as i32,
    )
    .unwrap();
    {
        let ctx = Context::new(&target).unwrap();
        render_view(&ctx, surface).unwrap();
    }
    target.flush();
    target
}

/// Opaque RGB at `(x, y)`.
fn rgb_at(surface: &mut ImageSurface, x: i32, y: i32) -> [u8; 3] {
    let stride = surface.stride();
    let data = surface.data().unwrap();
    let offset = (y * stride + x * 4) as usize;
    let px = u32::from_ne_bytes(data[offset..offset + 4].try_into().unwrap());
    [(px >> 16) as u8, (px >> 8) as u8, px as u8]
}

fn assert_close(actual: [u8; 3], expected: [u8; 3]) {
    for (a, e) in actual.iter().zip(expected) {
        assert!(
            a.abs_diff(e) <= 1,
            "expected {expected:?}, got {actual:?}"
        );
    }
}

#[test]
fn render_view_draws_toolbar_border_and_canvas() {
    let runtime = tokio::runtime::Runtime::new().unwrap();
    let surface = make_surface(&runtime, ToolbarConfig::default());
    let mut view = render(&surface);
    assert_eq!((view.width(), view.height()), (402, 362));

    // Toolbar strip background
    assert_close(rgb_at(&mut view, 3, 3), [245, 245, 245]);
    // Wrapper border and blank canvas
    assert_close(rgb_at(&mut view, 0, 200), [204, 204, 204]);
    assert_close(rgb_at(&mut view, 401, 200), [204, 204, 204]);
    assert_close(rgb_at(&mut view, 200, 200), [255, 255, 255]);

    // Color swatch shows the current color
    let swatch = surface.layout().control_rect(Control::ColorPicker).unwrap();
    assert_close(
        rgb_at(&mut view, swatch.x as i32 + 5, swatch.y as i32 + 5),
        [0, 0, 0],
    );

    // Button corners are filled with the button color
    let undo = surface.layout().control_rect(Control::Undo).unwrap();
    assert_close(
        rgb_at(&mut view, undo.x as i32 + 2, undo.y as i32 + 2),
        [76, 175, 80],
    );
}

#[test]
fn render_view_reflects_drawing_and_params() {
    let runtime = tokio::runtime::Runtime::new().unwrap();
    let mut surface = make_surface(&runtime, ToolbarConfig::default());
    surface.set_line_color(RED);
    surface.set_line_width(10.0);
    surface.handle_pointer(PointerEvent::down(20.0, 20.0));
    surface.handle_pointer(PointerEvent::moved(200.0, 20.0));
    surface.handle_pointer(PointerEvent::up(200.0, 20.0));

    let mut view = render(&surface);
    let (ox, oy) = surface.layout().canvas_origin();
    assert_close(
        rgb_at(&mut view, ox as i32 + 100, oy as i32 + 20),
        [255, 0, 0],
    );

    let swatch = surface.layout().control_rect(Control::ColorPicker).unwrap();
    let (sx, sy) = swatch.center();
    assert_close(rgb_at(&mut view, sx as i32, sy as i32), [255, 0, 0]);
}

#[test]
fn bottom_toolbar_renders_below_canvas() {
    let runtime = tokio::runtime::Runtime::new().unwrap();
    let surface = make_surface(
        &runtime,
        ToolbarConfig {
            position: ToolbarPosition::Bottom,
            ..ToolbarConfig::default()
        },
    );
    let mut view = render(&surface);

    assert_close(rgb_at(&mut view, 200, 0), [204, 204, 204]);
    assert_close(rgb_at(&mut view, 3, 315), [245, 245, 245]);
}

#[test]
fn hidden_toolbar_renders_only_wrapper() {
    let runtime = tokio::runtime::Runtime::new().unwrap();
    let surface = make_surface(
        &runtime,
        ToolbarConfig {
            show_toolbar: false,
            ..ToolbarConfig::default()
        },
    );
    let mut view = render(&surface);

    assert_eq!((view.width(), view.height()), (402, 302));
    assert_close(rgb_at(&mut view, 0, 0), [204, 204, 204]);
    assert_close(rgb_at(&mut view, 1, 1), [255, 255, 255]);
}
