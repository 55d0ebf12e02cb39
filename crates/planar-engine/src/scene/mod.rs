//! Scene entity store.
//!
//! Responsibilities:
//! - own static geometry, user planes and points, and the preview marker
//! - pair every entity with its render handle and upload lazily
//! - apply host actions and report outcomes

mod action;
mod store;

pub use action::{Action, ActionError, ActionOutcome};
pub use store::{
    MIN_PREVIEW_SIZE, PlaneEntity, PlaneKey, PlaneStyle, PointEntity, PointKey, PointStyle, SceneStore,
};

#[cfg(test)]
pub(crate) use store::tests::{FakeHandle, FakeUploader};
