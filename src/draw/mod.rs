//! Rendering primitives (Cairo-based).
//!
//! This module defines the drawing types used by the sketch surface:
//! - [`Color`]: RGBA color representation with hex conversion and a palette
//! - Rendering functions for stroke segments, dots, fills and image painting

pub mod color;
pub mod render;

pub use color::{Color, next_in_palette};
pub use render::{fill_background, paint_image, paint_image_scaled, render_dot, render_segment};

#[allow(unused_imports)]
pub use color::{BLACK, BLUE, GREEN, ORANGE, PALETTE, PINK, RED, WHITE, YELLOW};
