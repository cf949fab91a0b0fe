use crate::coords::{Rect, Vec2};

/// How the camera tracks its follow target.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Default)]
pub enum FollowMode {
    #[default]
    None,
    /// Snap to the target every update.
    Instant,
    /// Exponential approach at the follow speed; never overshoots.
    Smooth,
    /// Stay put while the target is inside the deadzone, then move by the excess.
    Deadzone,
}

/// One follow step from `position` toward `target`.
///
/// `deadzone` is relative to `position`.
pub(super) fn follow_step(
    mode: FollowMode,
    position: Vec2,
    target: Vec2,
    speed: f32,
    deadzone: Rect,
    dt: f32,
) -> Vec2 {
    match mode {
        FollowMode::None => position,
        FollowMode::Instant => target,
        FollowMode::Smooth => {
            let t = 1.0 - (-speed.max(0.0) * dt.max(0.0)).exp();
            position.lerp(target, t)
        }
        FollowMode::Deadzone => {
            let zone = deadzone.normalized().translated(position);
            Vec2::new(
                position.x + excess(target.x, zone.left(), zone.right()),
                position.y + excess(target.y, zone.top(), zone.bottom()),
            )
        }
    }
}

/// Signed distance `v` lies outside `[lo, hi]`, or 0 inside.
#[inline]
fn excess(v: f32, lo: f32, hi: f32) -> f32 {
    if v < lo {
        v - lo
    } else if v > hi {
        v - hi
    } else {
        0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    const ZONE: Rect = Rect::new(-50.0, -25.0, 100.0, 50.0);

    #[test]
    fn none_ignores_target() {
        let p = follow_step(FollowMode::None, Vec2::zero(), Vec2::new(9.0, 9.0), 5.0, ZONE, 1.0);
        assert_eq!(p, Vec2::zero());
    }

    #[test]
    fn smooth_approaches_without_overshoot() {
        let target = Vec2::new(100.0, -40.0);
        let mut p = Vec2::zero();
        let mut last_dist = f32::MAX;
        for _ in 0..120 {
            p = follow_step(FollowMode::Smooth, p, target, 5.0, ZONE, 1.0 / 60.0);
            let dist = (target - p).length();
            assert!(dist < last_dist);
            assert!(p.x <= target.x && p.y >= target.y);
            last_dist = dist;
        }
        assert!(last_dist < 1.0);
    }

    #[test]
    fn deadzone_holds_inside() {
        let p = follow_step(FollowMode::Deadzone, Vec2::zero(), Vec2::new(40.0, -20.0), 5.0, ZONE, 0.1);
        assert_eq!(p, Vec2::zero());
    }

    #[test]
    fn deadzone_moves_by_excess_per_axis() {
        let p = follow_step(FollowMode::Deadzone, Vec2::zero(), Vec2::new(80.0, -40.0), 5.0, ZONE, 0.1);
        assert_relative_eq!(p.x, 30.0);
        assert_relative_eq!(p.y, -15.0);

        // Target now sits exactly on the deadzone edge.
        let again = follow_step(FollowMode::Deadzone, p, Vec2::new(80.0, -40.0), 5.0, ZONE, 0.1);
        assert_eq!(again, p);
    }
}
