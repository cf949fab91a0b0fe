use super::Vec2;

/// World-space placement of a sprite.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Transform {
    pub position: Vec2,
    pub scale: Vec2,
    /// Degrees.
    pub rotation: f32,
}

impl Transform {
    #[inline]
    pub const fn from_position(position: Vec2) -> Self {
        Self { position, scale: Vec2::new(1.0, 1.0), rotation: 0.0 }
    }

    #[inline]
    pub const fn with_scale(mut self, scale: Vec2) -> Self {
        self.scale = scale;
        self
    }

    #[inline]
    pub const fn with_rotation(mut self, degrees: f32) -> Self {
        self.rotation = degrees;
        self
    }

    /// Maps a local point through scale, then rotation, then translation.
    pub fn transform_point(&self, point: Vec2) -> Vec2 {
        point.mul_elem(self.scale).rotated(self.rotation) + self.position
    }
}

impl Default for Transform {
    fn default() -> Self {
        Self::from_position(Vec2::zero())
    }
}
