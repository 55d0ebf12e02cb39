//! Color model shared between the scene and the line renderer.

pub mod color;

pub use color::Color;
