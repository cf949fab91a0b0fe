use crate::coords::{Color, Rect, Transform, Vec2};

/// Opaque texture handle owned by the GPU backend.
///
/// The engine core never dereferences it; it only forwards it to the batch sink and
/// uses it to split instance runs.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Default)]
pub struct TextureId(pub u32);

impl TextureId {
    /// Reserved handle for untextured (solid color) quads.
    pub const SOLID: TextureId = TextureId(0);
}

/// Everything the batch renderer needs to draw one sprite quad.
///
/// When stored in a [`RenderItem`], `position` and `rotation` are ignored (the
/// item's transform supplies them) and `size` is the unscaled sprite size.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct SpriteDrawData {
    pub texture: TextureId,
    pub position: Vec2,
    pub size: Vec2,
    /// Normalized texture coordinates (0..1).
    pub uv_rect: Rect,
    /// Pivot in sprite-local units, measured from the sprite's top-left corner.
    pub origin: Vec2,
    /// Degrees.
    pub rotation: f32,
    pub color: Color,
}

impl SpriteDrawData {
    /// Untextured quad of `size` tinted with `color`.
    pub fn solid(size: Vec2, color: Color) -> Self {
        Self { size, color, ..Self::default() }
    }

    pub fn with_color(mut self, color: Color) -> Self {
        self.color = color;
        self
    }
}

impl Default for SpriteDrawData {
    fn default() -> Self {
        Self {
            texture: TextureId::SOLID,
            position: Vec2::zero(),
            size: Vec2::zero(),
            uv_rect: Rect::new(0.0, 0.0, 1.0, 1.0),
            origin: Vec2::zero(),
            rotation: 0.0,
            color: Color::WHITE,
        }
    }
}

/// A sprite submitted to the [`RenderQueue`](super::RenderQueue) for this frame.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct RenderItem {
    /// Larger depth = further back = drawn first.
    pub depth: f32,
    pub sprite: SpriteDrawData,
    pub transform: Transform,
}

impl RenderItem {
    #[inline]
    pub const fn new(depth: f32, sprite: SpriteDrawData, transform: Transform) -> Self {
        Self { depth, sprite, transform }
    }
}
