//! 2D camera: following, eased zoom, trauma shake, world bounds.
//!
//! A [`Camera`] is updated once per frame; [`Camera::view`] then produces the
//! [`CameraView`] the render queue and batch renderer consume.

mod camera2d;
mod follow;
mod shake;
mod view;

pub use camera2d::{Camera, MIN_ZOOM};
pub use follow::FollowMode;
pub use view::CameraView;
