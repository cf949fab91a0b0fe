use std::time::{Duration, Instant};

/// Frame timing snapshot.
#[derive(Debug, Copy, Clone)]
pub struct FrameTime {
    /// Time elapsed since the previous frame tick, in seconds (clamped).
    pub dt: f32,

    /// Sum of all clamped deltas since the last reset, in seconds.
    pub total: f32,

    /// Monotonic timestamp taken at the tick.
    pub now: Instant,

    /// Index of this frame; the first tick after a reset is frame 0.
    pub frame_index: u64,
}

/// Frame clock producing `FrameTime` snapshots.
///
/// The clock is owned by the frame loop and ticked exactly once per frame; nothing
/// else writes to it.
///
/// Delta time is clamped so that a debugger pause, a minimized window, or a long
/// stall does not hand animation and camera code one enormous step.
#[derive(Debug, Clone)]
pub struct FrameClock {
    last: Instant,
    delta: f32,
    total: f32,
    frame_count: u64,
    dt_min: Duration,
    dt_max: Duration,
}

impl FrameClock {
    /// Upper clamp applied by [`FrameClock::new`].
    pub const DEFAULT_MAX_DT: Duration = Duration::from_millis(100);

    /// Creates a new clock clamping deltas to at most 0.1s.
    pub fn new() -> Self {
        Self::with_clamps(Duration::ZERO, Self::DEFAULT_MAX_DT)
    }

    /// Creates a clock with custom delta-time clamps.
    pub fn with_clamps(dt_min: Duration, dt_max: Duration) -> Self {
        debug_assert!(dt_min <= dt_max);
        Self {
            last: Instant::now(),
            delta: 0.0,
            total: 0.0,
            frame_count: 0,
            dt_min,
            dt_max,
        }
    }

    /// Re-bases the clock on the current instant and zeroes all accumulators.
    ///
    /// Useful when resuming from suspension or after a loading screen.
    pub fn reset(&mut self) {
        self.last = Instant::now();
        self.delta = 0.0;
        self.total = 0.0;
        self.frame_count = 0;
    }

    /// Advances the clock using the current wall time.
    pub fn tick(&mut self) -> FrameTime {
        self.tick_at(Instant::now())
    }

    /// Advances the clock as if the tick happened at `now`.
    ///
    /// An instant earlier than the previous tick yields a zero (then min-clamped) delta.
    pub fn tick_at(&mut self, now: Instant) -> FrameTime {
        let dt = now
            .saturating_duration_since(self.last)
            .clamp(self.dt_min, self.dt_max);

        self.last = now;
        self.delta = dt.as_secs_f32();
        self.total += self.delta;

        let ft = FrameTime {
            dt: self.delta,
            total: self.total,
            now,
            frame_index: self.frame_count,
        };

        self.frame_count = self.frame_count.wrapping_add(1);

        ft
    }

    /// Clamped delta of the most recent tick, in seconds.
    #[inline]
    pub fn delta(&self) -> f32 {
        self.delta
    }

    #[inline]
    pub fn total_time(&self) -> f32 {
        self.total
    }

    /// Number of ticks since construction or the last reset.
    #[inline]
    pub fn frame_count(&self) -> u64 {
        self.frame_count
    }

    pub fn fps(&self) -> f32 {
        if self.delta > 0.0 { 1.0 / self.delta } else { 0.0 }
    }
}

impl Default for FrameClock {
    fn default() -> Self {
        Self::new()
    }
}
