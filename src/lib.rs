//! Gesture-driven drawing: a fingertip stream becomes brush strokes on a
//! persistent canvas, and hovering on-screen buttons switches tools.

pub mod camera;
pub mod canvas;
pub mod config;
pub mod cooldown;
pub mod detector;
pub mod draw;
pub mod error;
pub mod gesture;
pub mod hint;
pub mod overlay;
pub mod palette;
pub mod recognize;
pub mod region;
pub mod stroke;
pub mod types;

pub use error::{Error, Result};
