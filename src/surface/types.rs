//! Data types shared by the sketch surface.

use crate::draw::Color;
use thiserror::Error;

/// Errors produced by the sketch surface.
#[derive(Debug, Error)]
pub enum SurfaceError {
    #[error("mount point \"{0}\" not found")]
    MountPointNotFound(String),

    #[error("invalid canvas dimensions {width}x{height}")]
    InvalidDimensions { width: u32, height: u32 },

    #[error("Cairo error: {0}")]
    Cairo(#[from] cairo::Error),

    #[error("failed to encode canvas: {0}")]
    Encode(String),

    #[error("failed to decode image: {0}")]
    Decode(String),

    #[error("image source error: {0}")]
    Source(String),

    #[error("decode worker is not running")]
    DecoderUnavailable,
}

/// Active stroke parameters, changed only by the tool controls.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DrawingParams {
    /// Color used for the next dot or segment
    pub color: Color,
    /// Stroke width in pixels (always within the slider range)
    pub width: f64,
}

/// Pointer state machine.
///
/// `Idle` until a pointer-down lands on the canvas, `Stroking` until the
/// pointer is released or leaves the canvas.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum StrokeState {
    /// Not drawing; moves are ignored
    Idle,
    /// Pointer held down on the canvas
    Stroking {
        /// Canvas-local X of the last recorded point
        last_x: f64,
        /// Canvas-local Y of the last recorded point
        last_y: f64,
    },
}

impl StrokeState {
    pub fn is_stroking(&self) -> bool {
        matches!(self, StrokeState::Stroking { .. })
    }
}
