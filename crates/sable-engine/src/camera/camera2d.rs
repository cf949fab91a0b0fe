use crate::coords::{Rect, Vec2};

use super::follow::{FollowMode, follow_step};
use super::shake::Shake;
use super::CameraView;

/// Smallest zoom accepted; keeps the projection from degenerating or flipping.
pub const MIN_ZOOM: f32 = 0.1;

/// 2D camera with target following, eased zoom, trauma shake and world bounds.
///
/// `size` is the full view size in world units at zoom 1; the visible extent is
/// `size * zoom`. The follow target is a plain value the owner refreshes each
/// frame with [`set_target`](Self::set_target). Shake never touches `position`; it
/// is sampled when a [`CameraView`] is taken.
#[derive(Debug, Clone)]
pub struct Camera {
    position: Vec2,
    size: Vec2,
    zoom: f32,
    rotation: f32,

    zooming: bool,
    zoom_start: f32,
    target_zoom: f32,
    zoom_duration: f32,
    zoom_elapsed: f32,

    target: Option<Vec2>,
    follow_mode: FollowMode,
    follow_speed: f32,
    deadzone: Rect,

    shake: Shake,
    bounds: Option<Rect>,
}

impl Camera {
    pub const DEFAULT_SIZE: Vec2 = Vec2::new(800.0, 600.0);
    pub const DEFAULT_FOLLOW_SPEED: f32 = 5.0;
    pub const DEFAULT_ZOOM_DURATION: f32 = 0.3;

    pub fn new(position: Vec2, size: Vec2) -> Self {
        Self {
            position,
            size,
            zoom: 1.0,
            rotation: 0.0,
            zooming: false,
            zoom_start: 1.0,
            target_zoom: 1.0,
            zoom_duration: Self::DEFAULT_ZOOM_DURATION,
            zoom_elapsed: 0.0,
            target: None,
            follow_mode: FollowMode::None,
            follow_speed: Self::DEFAULT_FOLLOW_SPEED,
            deadzone: Rect::default(),
            shake: Shake::new(),
            bounds: None,
        }
    }

    /// Follow, then zoom, then trauma decay, then bounds. Negative `dt` counts as 0.
    pub fn update(&mut self, dt: f32) {
        let dt = dt.max(0.0);
        self.update_following(dt);
        self.update_zoom(dt);
        self.shake.tick(dt);
        self.apply_bounds();
    }

    fn update_following(&mut self, dt: f32) {
        let Some(target) = self.target else { return };
        self.position = follow_step(
            self.follow_mode,
            self.position,
            target,
            self.follow_speed,
            self.deadzone,
            dt,
        );
    }

    fn update_zoom(&mut self, dt: f32) {
        if !self.zooming {
            return;
        }

        self.zoom_elapsed += dt;
        let t = if self.zoom_duration > 0.0 {
            (self.zoom_elapsed / self.zoom_duration).min(1.0)
        } else {
            1.0
        };

        if t >= 1.0 {
            self.zoom = self.target_zoom;
            self.zooming = false;
            return;
        }

        let eased = t * t * (3.0 - 2.0 * t);
        self.zoom = (self.zoom_start + (self.target_zoom - self.zoom_start) * eased).max(MIN_ZOOM);
    }

    fn apply_bounds(&mut self) {
        let Some(bounds) = self.bounds.map(Rect::normalized) else { return };
        let half = self.extent() * 0.5;

        self.position.x = clamp_axis(self.position.x, bounds.left(), bounds.right(), half.x);
        self.position.y = clamp_axis(self.position.y, bounds.top(), bounds.bottom(), half.y);
    }

    // ── position / size / rotation ────────────────────────────────────────

    #[inline]
    pub fn position(&self) -> Vec2 {
        self.position
    }

    pub fn set_position(&mut self, position: Vec2) {
        self.position = position;
    }

    pub fn move_by(&mut self, offset: Vec2) {
        self.position += offset;
    }

    #[inline]
    pub fn size(&self) -> Vec2 {
        self.size
    }

    pub fn set_size(&mut self, size: Vec2) {
        self.size = size;
    }

    /// Degrees.
    #[inline]
    pub fn rotation(&self) -> f32 {
        self.rotation
    }

    pub fn set_rotation(&mut self, degrees: f32) {
        self.rotation = degrees;
    }

    // ── zoom ──────────────────────────────────────────────────────────────

    #[inline]
    pub fn zoom(&self) -> f32 {
        self.zoom
    }

    /// Sets zoom immediately (floored at [`MIN_ZOOM`]) and cancels any zoom transition.
    pub fn set_zoom(&mut self, zoom: f32) {
        self.zoom = zoom.max(MIN_ZOOM);
        self.zooming = false;
    }

    pub fn zoom_by(&mut self, factor: f32) {
        self.set_zoom(self.zoom * factor);
    }

    /// Eases from the current zoom to `target` over `duration` seconds (smoothstep).
    /// A non-positive duration snaps on the next update.
    pub fn zoom_to(&mut self, target: f32, duration: f32) {
        self.zoom_start = self.zoom;
        self.target_zoom = target.max(MIN_ZOOM);
        self.zoom_duration = duration;
        self.zoom_elapsed = 0.0;
        self.zooming = true;
    }

    #[inline]
    pub fn is_zooming(&self) -> bool {
        self.zooming
    }

    #[inline]
    pub fn target_zoom(&self) -> f32 {
        self.target_zoom
    }

    // ── following ─────────────────────────────────────────────────────────

    pub fn set_target(&mut self, target: Vec2) {
        self.target = Some(target);
    }

    pub fn clear_target(&mut self) {
        self.target = None;
    }

    #[inline]
    pub fn target(&self) -> Option<Vec2> {
        self.target
    }

    pub fn set_follow_mode(&mut self, mode: FollowMode) {
        self.follow_mode = mode;
    }

    #[inline]
    pub fn follow_mode(&self) -> FollowMode {
        self.follow_mode
    }

    pub fn set_follow_speed(&mut self, speed: f32) {
        self.follow_speed = speed;
    }

    #[inline]
    pub fn follow_speed(&self) -> f32 {
        self.follow_speed
    }

    /// Deadzone rectangle relative to the camera position.
    pub fn set_deadzone(&mut self, zone: Rect) {
        self.deadzone = zone;
    }

    #[inline]
    pub fn deadzone(&self) -> Rect {
        self.deadzone
    }

    // ── shake ─────────────────────────────────────────────────────────────

    /// Adds trauma, clamped to `[0, 1]`.
    pub fn add_trauma(&mut self, amount: f32) {
        self.shake.set_trauma(self.shake.trauma + amount);
    }

    pub fn set_trauma(&mut self, amount: f32) {
        self.shake.set_trauma(amount);
    }

    #[inline]
    pub fn trauma(&self) -> f32 {
        self.shake.trauma
    }

    /// Trauma lost per second. Negative rates are clamped to 0.
    pub fn set_trauma_decay(&mut self, decay: f32) {
        self.shake.decay = decay.max(0.0);
    }

    #[inline]
    pub fn trauma_decay(&self) -> f32 {
        self.shake.decay
    }

    /// Offset at full trauma, in world units.
    pub fn set_shake_intensity(&mut self, intensity: f32) {
        self.shake.intensity = intensity;
    }

    #[inline]
    pub fn shake_intensity(&self) -> f32 {
        self.shake.intensity
    }

    /// Makes shake offsets reproducible.
    pub fn set_shake_seed(&mut self, seed: u64) {
        self.shake.reseed(seed);
    }

    /// Samples a new shake offset: `trauma² · intensity` times a uniform value in
    /// `[-1, 1]` per axis.
    pub fn shake_offset(&mut self) -> Vec2 {
        self.shake.offset()
    }

    // ── bounds ────────────────────────────────────────────────────────────

    pub fn set_bounds(&mut self, bounds: Rect) {
        self.bounds = Some(bounds);
    }

    pub fn clear_bounds(&mut self) {
        self.bounds = None;
    }

    #[inline]
    pub fn bounds(&self) -> Option<Rect> {
        self.bounds
    }

    // ── views ─────────────────────────────────────────────────────────────

    #[inline]
    pub fn extent(&self) -> Vec2 {
        self.size * self.zoom
    }

    /// World rectangle currently visible, ignoring shake.
    pub fn view_bounds(&self) -> Rect {
        Rect::from_center(self.position, self.extent())
    }

    pub fn is_visible(&self, rect: Rect) -> bool {
        self.view_bounds().intersects(rect)
    }

    /// Frame snapshot with one shake sample baked into the center.
    pub fn view(&mut self) -> CameraView {
        CameraView {
            center: self.position + self.shake.offset(),
            size: self.size,
            zoom: self.zoom,
            rotation: self.rotation,
        }
    }
}

impl Default for Camera {
    fn default() -> Self {
        Self::new(Vec2::zero(), Self::DEFAULT_SIZE)
    }
}

/// Keeps `[v - half, v + half]` inside `[lo, hi]`; centers when it cannot fit.
#[inline]
fn clamp_axis(v: f32, lo: f32, hi: f32, half: f32) -> f32 {
    if hi - lo <= half * 2.0 {
        (lo + hi) * 0.5
    } else {
        v.clamp(lo + half, hi - half)
    }
}
