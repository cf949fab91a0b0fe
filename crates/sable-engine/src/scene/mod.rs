//! Scene stack with fade transitions.

mod manager;
mod lifecycle;
mod transition;

pub use manager::SceneManager;
pub use lifecycle::{Scene, SceneCtx};
pub use transition::{TransitionConfig, TransitionKind, TransitionState};
