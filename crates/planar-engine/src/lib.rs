//! Planar engine crate.
//!
//! A small wgpu scene engine for placing points on user-defined planes:
//! linear algebra, plane construction, an entity store with lazy GPU upload,
//! an orbit camera and a fixed-order frame scheduler, plus the window/GPU
//! runtime that drives them.

pub mod camera;
pub mod coords;
pub mod core;
pub mod device;
pub mod frame;
pub mod geometry;
pub mod input;
pub mod logging;
pub mod math;
pub mod paint;
pub mod render;
pub mod scene;
pub mod time;
pub mod window;
