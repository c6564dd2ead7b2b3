//! Toolbar layout, hit-testing and widget rendering.

pub mod layout;
mod toolbar;

pub use layout::{BORDER_WIDTH, Control, Layout};
pub use toolbar::render_view;
