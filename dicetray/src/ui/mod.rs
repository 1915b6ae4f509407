//! Terminal UI for dicetray
//!
//! - `layout`: splits the screen into panels
//! - `theme`: the color palette
//! - `render`: draws the whole frame from [`crate::app::App`]
//! - `widgets`: the individual panels

pub mod layout;
pub mod render;
pub mod theme;
pub mod widgets;

pub use render::{render, Overlay};
