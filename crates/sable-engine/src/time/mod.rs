//! Time subsystem.
//!
//! Provides stable, testable frame timing without coupling to a window runtime.
//! Intended usage:
//! - one `FrameClock` per frame loop
//! - call `tick()` once per frame, before input and simulation updates

mod frame_clock;

pub use frame_clock::{FrameClock, FrameTime};
