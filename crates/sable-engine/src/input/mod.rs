//! Input subsystem.
//!
//! Platform-agnostic: the frame loop translates window events into [`InputEvent`]s
//! (see [`platform::winit`]) and feeds them to an [`InputManager`] it owns and
//! passes explicitly to scenes.

mod actions;
mod buffer;
mod frame;
mod manager;
pub mod platform;
mod state;
mod types;

pub use actions::ActionMap;
pub use buffer::{ActionBuffer, DEFAULT_BUFFER_TIME};
pub use frame::InputFrame;
pub use manager::InputManager;
pub use state::InputState;
pub use types::{ButtonPhase, ButtonState, InputEvent, Key, Modifiers, MouseButton, MouseWheelDelta};
