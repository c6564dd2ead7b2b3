//! Library exports for the sketchboard drawing surface.
//!
//! Exposes the [`SketchSurface`] widget together with the configuration,
//! rendering and input modules it is built from, so hosts can embed the
//! surface and tools can share config validation with the main binary.

pub mod config;
pub mod draw;
pub mod export;
pub mod host;
pub mod image;
pub mod input;
pub mod script;
pub mod surface;
pub mod ui;
pub mod util;

pub use config::Config;
pub use surface::{SketchSurface, SurfaceError, SurfaceHooks, SurfaceOptions};
