//! Orbit camera controller.

mod orbit;

pub use orbit::{CameraState, OrbitCamera, OrbitConfig};
