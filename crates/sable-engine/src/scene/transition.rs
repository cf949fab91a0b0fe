use crate::coords::Color;

#[derive(Debug, Copy, Clone, Eq, PartialEq, Default)]
pub enum TransitionKind {
    /// Stack operation runs immediately.
    #[default]
    None,
    /// Fade to `color`, run the operation, fade back in.
    Fade,
}

/// How a scene stack operation is presented.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct TransitionConfig {
    pub kind: TransitionKind,
    /// Seconds per fade phase; a full fade takes twice this.
    pub duration: f32,
    pub color: Color,
}

impl TransitionConfig {
    pub const DEFAULT_DURATION: f32 = 0.5;

    pub fn none() -> Self {
        Self::default()
    }

    pub fn fade(duration: f32) -> Self {
        Self { kind: TransitionKind::Fade, duration, ..Self::default() }
    }

    pub fn with_color(mut self, color: Color) -> Self {
        self.color = color;
        self
    }
}

impl Default for TransitionConfig {
    fn default() -> Self {
        Self {
            kind: TransitionKind::None,
            duration: Self::DEFAULT_DURATION,
            color: Color::BLACK,
        }
    }
}

/// Phase of the in-flight transition. Cycles `None → FadingOut → FadingIn → None`.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Default)]
pub enum TransitionState {
    #[default]
    None,
    FadingOut,
    FadingIn,
}
