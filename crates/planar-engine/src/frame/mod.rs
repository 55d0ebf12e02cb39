//! Per-frame draw orchestration.

mod scheduler;

pub use scheduler::{DrawCall, DrawSource, FrameConfig, FrameScheduler};
