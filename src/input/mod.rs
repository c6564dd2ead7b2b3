//! Input event types and normalization.
//!
//! This module translates host mouse and touch events into the single
//! pointer stream consumed by the sketch surface's stroke state machine.

pub mod events;

pub use events::{
    EventResponse, MouseEvent, MouseEventKind, PointerEvent, PointerKind, TouchEvent, TouchPhase,
    TouchPoint, pointer_from_mouse, pointer_from_touch,
};
