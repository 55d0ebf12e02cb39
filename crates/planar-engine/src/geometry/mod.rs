//! Plane construction and line geometry.
//!
//! Stateless: every function maps inputs to a new value.

mod error;
pub mod glyph;
mod plane;

pub use error::GeometryError;
pub use plane::{Plane, PlaneSpec};
