//! The sketch surface: an embeddable freehand drawing widget.
//!
//! This module provides:
//! - Construction against a host mount point
//! - The pointer state machine and mouse/touch routing
//! - Snapshot-based undo/redo
//! - Clear, save, image load and resize
//! - Off-thread image decoding with in-order completion

mod actions;
mod widget;
mod decode;
pub mod history;
pub mod options;
mod stroke;
pub mod types;

pub use widget::SketchSurface;
pub use history::History;
pub use options::{LoadCallback, SurfaceHooks, SurfaceOptions, clamp_line_width};
pub use types::{DrawingParams, StrokeState, SurfaceError};
