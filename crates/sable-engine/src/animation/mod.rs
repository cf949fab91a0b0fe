//! Frame-based sprite animation.
//!
//! [`AnimationController`] steps through one atlas animation at a time.
//! [`AnimationStateMachine`] owns a controller and switches between named states,
//! gated by priority, either on request or through automatic transitions.

mod controller;
mod state_machine;

pub use controller::{AnimationCallback, AnimationController, FrameCallback};
pub use state_machine::{
    AnimationState, AnimationStateMachine, AnimationTransition, TransitionCondition,
    TransitionPredicate,
};
