//! Coordinate and geometry types shared by the camera, render queue and scenes.
//!
//! Canonical space:
//! - World units for positions submitted by game code
//! - Origin top-left, +X right, +Y down
//!
//! Screen-space values (after the camera offset) use the same types.

mod color;
mod rect;
mod transform;
mod vec2;
mod viewport;

pub use color::Color;
pub use rect::Rect;
pub use transform::Transform;
pub use vec2::Vec2;
pub use viewport::Viewport;
