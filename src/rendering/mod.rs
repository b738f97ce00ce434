//! # Rendering Module
//!
//! 2D drawing with macroquad: the map viewport, HUD and overlay screens.

pub mod display;
pub mod ui;

pub use display::*;
pub use ui::*;
