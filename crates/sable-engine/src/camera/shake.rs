use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::coords::Vec2;

/// Trauma-driven screen shake.
///
/// Offset magnitude scales with `trauma²`, so a hit starts sharp and falls off fast.
#[derive(Debug, Clone)]
pub(super) struct Shake {
    pub trauma: f32,
    /// Trauma lost per second.
    pub decay: f32,
    /// Maximum offset in world units at full trauma.
    pub intensity: f32,
    rng: StdRng,
}

impl Shake {
    pub const DEFAULT_DECAY: f32 = 1.5;
    pub const DEFAULT_INTENSITY: f32 = 5.0;

    pub fn new() -> Self {
        Self {
            trauma: 0.0,
            decay: Self::DEFAULT_DECAY,
            intensity: Self::DEFAULT_INTENSITY,
            rng: StdRng::from_entropy(),
        }
    }

    pub fn set_trauma(&mut self, amount: f32) {
        self.trauma = amount.clamp(0.0, 1.0);
    }

    pub fn reseed(&mut self, seed: u64) {
        self.rng = StdRng::seed_from_u64(seed);
    }

    pub fn tick(&mut self, dt: f32) {
        if self.trauma > 0.0 {
            self.trauma = (self.trauma - self.decay * dt).clamp(0.0, 1.0);
        }
    }

    /// Samples a fresh offset. Exactly zero when there is no trauma.
    pub fn offset(&mut self) -> Vec2 {
        if self.trauma <= 0.0 {
            return Vec2::zero();
        }
        let amount = self.trauma * self.trauma * self.intensity;
        Vec2::new(
            self.rng.gen_range(-1.0f32..=1.0) * amount,
            self.rng.gen_range(-1.0f32..=1.0) * amount,
        )
    }
}
