//! Generic input event types and mouse/touch normalization.
//!
//! Hosts deliver mouse and touch events in client coordinates. Both are
//! reduced to one [`PointerEvent`] stream in canvas-local coordinates, so the
//! stroke state machine cannot tell them apart.

use serde::{Deserialize, Serialize};

/// Unified pointer event kind seen by the stroke state machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PointerKind {
    /// Button pressed / finger placed
    Down,
    /// Pointer moved
    Move,
    /// Button released / finger lifted
    Up,
    /// Pointer left the canvas (or the gesture was cancelled)
    Leave,
}

/// Pointer event in canvas-local coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PointerEvent {
    pub kind: PointerKind,
    pub x: f64,
    pub y: f64,
}

impl PointerEvent {
    pub fn new(kind: PointerKind, x: f64, y: f64) -> Self {
        Self { kind, x, y }
    }

    pub fn down(x: f64, y: f64) -> Self {
        Self::new(PointerKind::Down, x, y)
    }

    pub fn moved(x: f64, y: f64) -> Self {
        Self::new(PointerKind::Move, x, y)
    }

    pub fn up(x: f64, y: f64) -> Self {
        Self::new(PointerKind::Up, x, y)
    }

    pub fn leave() -> Self {
        Self::new(PointerKind::Leave, 0.0, 0.0)
    }
}

/// Mouse event kind as delivered by the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum MouseEventKind {
    Down,
    Move,
    Up,
    /// Pointer left the widget
    Out,
}

/// Mouse event in client coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MouseEvent {
    pub kind: MouseEventKind,
    pub client_x: f64,
    pub client_y: f64,
}

impl MouseEvent {
    pub fn new(kind: MouseEventKind, client_x: f64, client_y: f64) -> Self {
        Self {
            kind,
            client_x,
            client_y,
        }
    }
}

/// Touch gesture phase as delivered by the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TouchPhase {
    Start,
    Move,
    End,
    Cancel,
}

/// One active touch point in client coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TouchPoint {
    pub client_x: f64,
    pub client_y: f64,
}

/// Touch event carrying every touch still active on the widget.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TouchEvent {
    pub phase: TouchPhase,
    #[serde(default)]
    pub touches: Vec<TouchPoint>,
}

impl TouchEvent {
    pub fn new(phase: TouchPhase, touches: impl IntoIterator<Item = (f64, f64)>) -> Self {
        Self {
            phase,
            touches: touches
                .into_iter()
                .map(|(client_x, client_y)| TouchPoint { client_x, client_y })
                .collect(),
        }
    }
}

/// What the host should do with an event after the surface has seen it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventResponse {
    /// Not for this surface; let the host handle it
    Ignored,
    /// Consumed by the surface
    Handled,
    /// Consumed, and the host's default action (e.g. scrolling) must be suppressed
    PreventDefault,
}

/// Translates a mouse event into canvas-local pointer coordinates.
///
/// `canvas_origin` is the client position of the canvas' top-left pixel.
pub fn pointer_from_mouse(event: &MouseEvent, canvas_origin: (f64, f64)) -> PointerEvent {
    let kind = match event.kind {
        MouseEventKind::Down => PointerKind::Down,
        MouseEventKind::Move => PointerKind::Move,
        MouseEventKind::Up => PointerKind::Up,
        MouseEventKind::Out => PointerKind::Leave,
    };
    PointerEvent::new(
        kind,
        event.client_x - canvas_origin.0,
        event.client_y - canvas_origin.1,
    )
}

/// Translates a touch event using its first active touch.
///
/// End and cancel carry no usable coordinates and map to up/leave at the
/// origin. Start or move without any active touch yields `None`.
pub fn pointer_from_touch(event: &TouchEvent, canvas_origin: (f64, f64)) -> Option<PointerEvent> {
    let first = event
        .touches
        .first()
        .map(|t| (t.client_x - canvas_origin.0, t.client_y - canvas_origin.1));

    match event.phase {
        TouchPhase::Start => first.map(|(x, y)| PointerEvent::down(x, y)),
        TouchPhase::Move => first.map(|(x, y)| PointerEvent::moved(x, y)),
        TouchPhase::End => Some(PointerEvent::up(0.0, 0.0)),
        TouchPhase::Cancel => Some(PointerEvent::leave()),
    }
}
