//! Linear-algebra kernel.
//!
//! Pure value types with no shared state. World space is right-handed with
//! +Y up; matrices are column-major and match the WGSL memory layout.

mod mat4;
mod vec3;

pub use mat4::Mat4;
pub use vec3::Vec3;
