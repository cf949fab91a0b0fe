//! Sable engine crate.
//!
//! Frame-driven 2D engine core: frame clock, sprite atlas and animation, camera,
//! depth-sorted render queue and a scene stack. GPU submission and windowing stay
//! behind the [`render::BatchSink`] and [`input::platform`] seams.

pub mod animation;
pub mod atlas;
pub mod camera;
pub mod input;
pub mod scene;
pub mod time;

pub mod logging;
pub mod coords;
pub mod render;
