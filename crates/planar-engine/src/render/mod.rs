//! GPU rendering subsystem.
//!
//! One unlit line pipeline draws everything. CPU geometry is in world units;
//! the vertex shader applies `proj * view * model`.

mod ctx;
mod line_pipeline;
mod vertex;

pub use ctx::{RenderCtx, RenderTarget};
pub use line_pipeline::{
    LineBuffer, LinePipeline, MODEL_SLOTS, SLOT_CUBE, SLOT_IDENTITY, VertexUpload,
};
pub use vertex::LineVertex;
