use crate::coords::{Rect, Vec2};

/// Named sub-rectangle of the atlas texture, in texels.
#[derive(Debug, Clone, PartialEq)]
pub struct SpriteFrame {
    pub name: String,
    pub x: u32,
    pub y: u32,
    pub w: u32,
    pub h: u32,
    /// Pivot in texels from the frame's top-left corner.
    pub origin: Vec2,
}

impl SpriteFrame {
    /// Frame with its pivot at the bottom-center, the convention for character sprites.
    pub fn new(name: impl Into<String>, x: u32, y: u32, w: u32, h: u32) -> Self {
        Self {
            name: name.into(),
            x,
            y,
            w,
            h,
            origin: Vec2::new(w as f32 * 0.5, h as f32),
        }
    }

    pub fn with_origin(mut self, origin: Vec2) -> Self {
        self.origin = origin;
        self
    }

    #[inline]
    pub fn size(&self) -> Vec2 {
        Vec2::new(self.w as f32, self.h as f32)
    }

    #[inline]
    pub fn rect(&self) -> Rect {
        Rect::new(self.x as f32, self.y as f32, self.w as f32, self.h as f32)
    }

    /// Texture coordinates normalized against a `texture_w` x `texture_h` image.
    ///
    /// Returns the full `0..1` range when the texture size is unknown (zero).
    pub fn uv_rect(&self, texture_w: u32, texture_h: u32) -> Rect {
        if texture_w == 0 || texture_h == 0 {
            return Rect::new(0.0, 0.0, 1.0, 1.0);
        }
        let tw = texture_w as f32;
        let th = texture_h as f32;
        Rect::new(self.x as f32 / tw, self.y as f32 / th, self.w as f32 / tw, self.h as f32 / th)
    }
}

/// Ordered frame sequence played by an [`AnimationController`](crate::animation::AnimationController).
#[derive(Debug, Clone, PartialEq)]
pub struct AnimationData {
    pub name: String,
    pub frames: Vec<String>,
    /// Seconds per frame when no per-frame override applies.
    pub frame_duration: f32,
    /// Optional per-frame durations; may be shorter than `frames`.
    pub frame_durations: Vec<f32>,
    pub looping: bool,
}

impl AnimationData {
    pub const DEFAULT_FRAME_DURATION: f32 = 0.1;

    pub fn new<I, S>(name: impl Into<String>, frames: I, frame_duration: f32, looping: bool) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            name: name.into(),
            frames: frames.into_iter().map(Into::into).collect(),
            frame_duration,
            frame_durations: Vec::new(),
            looping,
        }
    }

    pub fn with_frame_durations(mut self, durations: Vec<f32>) -> Self {
        self.frame_durations = durations;
        self
    }

    /// Duration of frame `index`: the per-frame value when one exists, else the default.
    #[inline]
    pub fn duration(&self, index: usize) -> f32 {
        self.frame_durations.get(index).copied().unwrap_or(self.frame_duration)
    }

    #[inline]
    pub fn frame_count(&self) -> usize {
        self.frames.len()
    }

    /// Sum of all frame durations for one pass through the sequence.
    pub fn total_duration(&self) -> f32 {
        (0..self.frames.len()).map(|i| self.duration(i)).sum()
    }
}
