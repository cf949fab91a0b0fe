//! Depth-sorted sprite rendering.
//!
//! Responsibilities:
//! - collect per-frame sprite submissions tagged with depth and a world transform
//! - order them back-to-front (painter's algorithm) with deterministic ties
//! - optionally cull against the camera's visible rectangle
//! - stream the survivors to a [`BatchSink`]; GPU submission lives behind that trait

mod batch;
mod item;
mod key;
mod queue;

pub use batch::{BatchSink, InstanceBatch, InstanceRun, SpriteInstance, ViewUniform};
pub use item::{RenderItem, SpriteDrawData, TextureId};
pub use key::DepthKey;
pub use queue::RenderQueue;
