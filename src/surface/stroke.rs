//! Pointer state machine and host event routing.

use super::types::StrokeState;
use super::widget::SketchSurface;
use crate::draw::{render_dot, render_segment};
use crate::input::{
    EventResponse, MouseEvent, MouseEventKind, PointerEvent, PointerKind, TouchEvent, TouchPhase,
    pointer_from_mouse, pointer_from_touch,
};
use crate::ui::Control;

impl SketchSurface {
    /// Feeds one canvas-local pointer event to the stroke state machine.
    pub fn handle_pointer(&mut self, event: PointerEvent) {
        match (event.kind, self.stroke) {
            (PointerKind::Down, previous) => {
                if previous.is_stroking() {
                    log::debug!("Pointer down while stroking, restarting stroke");
                }
                self.begin_stroke(event.x, event.y);
            }
            (PointerKind::Move, StrokeState::Stroking { last_x, last_y }) => {
                self.extend_stroke((last_x, last_y), (event.x, event.y));
            }
            (PointerKind::Up | PointerKind::Leave, StrokeState::Stroking { .. }) => {
                self.finish_stroke();
            }
            // Moves, releases and leaves while idle
            _ => {}
        }
    }

    fn begin_stroke(&mut self, x: f64, y: f64) {
        self.apply_pending();
        self.stroke = StrokeState::Stroking {
            last_x: x,
            last_y: y,
        };
        match self.context() {
            Ok(ctx) => render_dot(&ctx, x, y, self.params.color, self.params.width),
            Err(e) => log::warn!("Skipping stroke start dot: {e}"),
        }
        log::debug!("Stroke started at ({x:.1}, {y:.1})");
    }

    fn extend_stroke(&mut self, from: (f64, f64), to: (f64, f64)) {
        match self.context() {
            Ok(ctx) => render_segment(&ctx, from, to, self.params.color, self.params.width),
            Err(e) => log::warn!("Skipping stroke segment: {e}"),
        }
        self.stroke = StrokeState::Stroking {
            last_x: to.0,
            last_y: to.1,
        };
        self.hooks.drew();
    }

    fn finish_stroke(&mut self) {
        self.stroke = StrokeState::Idle;
        self.canvas.flush();
        if let Err(e) = self.commit_snapshot() {
            self.report(&e);
        }
    }

    /// Routes a host mouse event in client coordinates.
    ///
    /// Presses on the toolbar activate controls; presses on the canvas start
    /// a stroke. Dragging out of the canvas ends the stroke as a leave.
    pub fn handle_mouse(&mut self, event: MouseEvent) -> EventResponse {
        let (x, y) = (event.client_x, event.client_y);
        let on_canvas = self.layout.canvas.contains(x, y);

        match event.kind {
            MouseEventKind::Down => {
                if let Some(control) = self.layout.hit_test(x, y) {
                    self.press_control(control, x);
                    EventResponse::Handled
                } else if on_canvas {
                    self.handle_pointer(pointer_from_mouse(&event, self.layout.canvas_origin()));
                    EventResponse::Handled
                } else {
                    EventResponse::Ignored
                }
            }
            MouseEventKind::Move => {
                if self.slider_drag {
                    self.drag_slider(x);
                    EventResponse::Handled
                } else if self.stroke.is_stroking() {
                    if on_canvas {
                        self.handle_pointer(pointer_from_mouse(&event, self.layout.canvas_origin()));
                    } else {
                        self.handle_pointer(PointerEvent::leave());
                    }
                    EventResponse::Handled
                } else {
                    EventResponse::Ignored
                }
            }
            MouseEventKind::Up => {
                if self.slider_drag {
                    self.slider_drag = false;
                    EventResponse::Handled
                } else if self.stroke.is_stroking() {
                    self.handle_pointer(pointer_from_mouse(&event, self.layout.canvas_origin()));
                    EventResponse::Handled
                } else {
                    EventResponse::Ignored
                }
            }
            MouseEventKind::Out => {
                self.slider_drag = false;
                if self.stroke.is_stroking() {
                    self.handle_pointer(PointerEvent::leave());
                    EventResponse::Handled
                } else {
                    EventResponse::Ignored
                }
            }
        }
    }

    /// Routes a host touch event, using only the first active touch.
    ///
    /// Touches on the canvas always ask the host to suppress its default
    /// handling so the page does not scroll under the finger.
    pub fn handle_touch(&mut self, event: TouchEvent) -> EventResponse {
        let origin = self.layout.canvas_origin();

        if event.phase == TouchPhase::Start {
            let Some(first) = event.touches.first() else {
                return EventResponse::Ignored;
            };
            let (x, y) = (first.client_x, first.client_y);
            if let Some(control) = self.layout.hit_test(x, y) {
                self.press_control(control, x);
                // Touch has no hover; a slider tap never becomes a drag
                self.slider_drag = false;
                return EventResponse::PreventDefault;
            }
            if !self.layout.canvas.contains(x, y) {
                return EventResponse::Ignored;
            }
        } else if !self.stroke.is_stroking() {
            return EventResponse::Ignored;
        }

        let Some(pointer) = pointer_from_touch(&event, origin) else {
            return EventResponse::PreventDefault;
        };
        let pointer = match pointer.kind {
            PointerKind::Move
                if !self
                    .layout
                    .canvas
                    .contains(pointer.x + origin.0, pointer.y + origin.1) =>
            {
                PointerEvent::leave()
            }
            _ => pointer,
        };
        self.handle_pointer(pointer);
        EventResponse::PreventDefault
    }

    fn press_control(&mut self, control: Control, x: f64) {
        if control == Control::SizeSlider {
            self.slider_drag = true;
            self.drag_slider(x);
            return;
        }
        if let Err(e) = self.activate(control) {
            self.report(&e);
        }
    }

    fn drag_slider(&mut self, x: f64) {
        if let Some(width) = self.layout.slider_value_at(x)
            && width != self.params.width
        {
            self.set_line_width(width);
        }
    }
}
