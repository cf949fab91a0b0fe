//! Sprite atlas: frame rectangles and named animation sequences.
//!
//! The atlas is populated once at load time (programmatically or from JSON metadata)
//! and then read by animation controllers and scenes. Image decoding and texture
//! upload happen elsewhere; the atlas only carries an opaque [`TextureId`](crate::render::TextureId).

mod error;
mod frame;
pub mod metadata;
mod sprite_atlas;

pub use error::AtlasError;
pub use frame::{AnimationData, SpriteFrame};
pub use sprite_atlas::SpriteAtlas;
