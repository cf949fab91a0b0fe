use std::sync::Arc;

use crate::atlas::{AnimationData, SpriteAtlas, SpriteFrame};
use crate::render::SpriteDrawData;

/// Fired on loop wrap and on non-looping completion.
pub type AnimationCallback = Box<dyn FnMut()>;
/// Fired with the new frame index whenever the index actually changes.
pub type FrameCallback = Box<dyn FnMut(usize)>;

/// Time below a frame's duration that still counts as reaching it; absorbs
/// accumulated `f32` error so `update(k * d)` lands on frame `k`.
const FRAME_EPSILON: f32 = 1e-6;
/// Upper bound on frame advances per `update`, guarding zero/negative durations.
const MAX_ADVANCES: usize = 2048;

/// Plays one [`AnimationData`] at a time from a shared atlas.
///
/// The controller is bound to its atlas for its whole lifetime. Playing an
/// unknown name stops playback instead of failing; all other per-frame input is
/// clamped or ignored so `update` never errors.
pub struct AnimationController {
    atlas: Arc<SpriteAtlas>,
    current: Option<Arc<AnimationData>>,

    frame_index: usize,
    frame_time: f32,
    speed: f32,

    playing: bool,
    paused: bool,
    finished: bool,

    on_end: Option<AnimationCallback>,
    on_loop: Option<AnimationCallback>,
    on_frame_change: Option<FrameCallback>,
}

impl AnimationController {
    pub fn new(atlas: Arc<SpriteAtlas>) -> Self {
        Self {
            atlas,
            current: None,
            frame_index: 0,
            frame_time: 0.0,
            speed: 1.0,
            playing: false,
            paused: false,
            finished: false,
            on_end: None,
            on_loop: None,
            on_frame_change: None,
        }
    }

    pub fn atlas(&self) -> &Arc<SpriteAtlas> {
        &self.atlas
    }

    // ── playback control ──────────────────────────────────────────────────

    /// Starts `name` from its first frame.
    ///
    /// Replaying the animation that is already running (and not finished) is a no-op
    /// unless `restart` is set. Unknown names stop playback.
    pub fn play(&mut self, name: &str, restart: bool) {
        let Some(anim) = self.atlas.animation(name) else {
            log::debug!("play: unknown animation '{name}', stopping");
            self.stop();
            return;
        };

        let same = self.current.as_ref().is_some_and(|cur| Arc::ptr_eq(cur, &anim));
        if same && self.playing && !self.finished && !restart {
            return;
        }

        self.current = Some(anim);
        self.frame_index = 0;
        self.frame_time = 0.0;
        self.playing = true;
        self.paused = false;
        self.finished = false;
    }

    /// Terminal stop: clears the active animation and rewinds.
    pub fn stop(&mut self) {
        self.current = None;
        self.frame_index = 0;
        self.frame_time = 0.0;
        self.playing = false;
        self.paused = false;
        self.finished = true;
    }

    pub fn pause(&mut self) {
        if self.playing {
            self.paused = true;
        }
    }

    pub fn resume(&mut self) {
        if self.playing {
            self.paused = false;
        }
    }

    /// Rewinds to the first frame, leaving the playing/finished flags alone.
    pub fn reset(&mut self) {
        self.frame_index = 0;
        self.frame_time = 0.0;
    }

    /// Jumps to `index` (clamped to the animation) and clears the frame timer.
    pub fn set_frame(&mut self, index: usize) {
        let Some(anim) = &self.current else { return };
        self.frame_index = index.min(anim.frame_count().saturating_sub(1));
        self.frame_time = 0.0;
    }

    /// Playback multiplier; negative values are treated as zero.
    pub fn set_speed(&mut self, speed: f32) {
        self.speed = speed.max(0.0);
    }

    #[inline]
    pub fn speed(&self) -> f32 {
        self.speed
    }

    // ── update ────────────────────────────────────────────────────────────

    pub fn update(&mut self, dt: f32) {
        if !self.playing || self.paused || self.finished {
            return;
        }
        let Some(anim) = self.current.clone() else { return };

        self.frame_time += dt.max(0.0) * self.speed;

        let mut steps = 0;
        while self.playing && steps < MAX_ADVANCES {
            steps += 1;
            let duration = anim.duration(self.frame_index);

            if duration <= 0.0 {
                self.advance_frame(&anim);
                continue;
            }
            if self.frame_time + FRAME_EPSILON < duration {
                break;
            }

            self.frame_time = (self.frame_time - duration).max(0.0);
            self.advance_frame(&anim);
        }
    }

    fn advance_frame(&mut self, anim: &AnimationData) {
        let previous = self.frame_index;
        self.frame_index += 1;

        if self.frame_index >= anim.frame_count() {
            if anim.looping {
                self.frame_index = 0;
                if let Some(cb) = self.on_loop.as_mut() {
                    cb();
                }
            } else {
                self.frame_index = anim.frame_count().saturating_sub(1);
                self.playing = false;
                self.finished = true;
                if let Some(cb) = self.on_end.as_mut() {
                    cb();
                }
                return;
            }
        }

        if self.frame_index != previous {
            if let Some(cb) = self.on_frame_change.as_mut() {
                cb(self.frame_index);
            }
        }
    }

    // ── queries ───────────────────────────────────────────────────────────

    /// `playing && !paused`.
    #[inline]
    pub fn is_playing(&self) -> bool {
        self.playing && !self.paused
    }

    #[inline]
    pub fn is_paused(&self) -> bool {
        self.paused
    }

    #[inline]
    pub fn is_finished(&self) -> bool {
        self.finished
    }

    #[inline]
    pub fn has_animation(&self) -> bool {
        self.current.is_some()
    }

    pub fn current_animation(&self) -> Option<&Arc<AnimationData>> {
        self.current.as_ref()
    }

    pub fn current_animation_name(&self) -> Option<&str> {
        self.current.as_deref().map(|a| a.name.as_str())
    }

    #[inline]
    pub fn current_frame_index(&self) -> usize {
        self.frame_index
    }

    /// Seconds spent on the current frame so far.
    #[inline]
    pub fn current_frame_time(&self) -> f32 {
        self.frame_time
    }

    pub fn current_frame(&self) -> Option<&SpriteFrame> {
        let anim = self.current.as_ref()?;
        let name = anim.frames.get(self.frame_index)?;
        self.atlas.frame(name)
    }

    /// Draw data for the current frame, ready to submit to a render queue.
    pub fn current_draw_data(&self) -> Option<SpriteDrawData> {
        self.current_frame().map(|frame| self.atlas.sprite_for(frame))
    }

    pub fn frame_count(&self) -> usize {
        self.current.as_ref().map_or(0, |a| a.frame_count())
    }

    /// `index / (count - 1)`, or 0 for single-frame and missing animations.
    pub fn progress(&self) -> f32 {
        let count = self.frame_count();
        if count <= 1 {
            return 0.0;
        }
        self.frame_index as f32 / (count - 1) as f32
    }

    // ── callbacks ─────────────────────────────────────────────────────────

    pub fn set_on_animation_end(&mut self, cb: impl FnMut() + 'static) {
        self.on_end = Some(Box::new(cb));
    }

    pub fn set_on_animation_loop(&mut self, cb: impl FnMut() + 'static) {
        self.on_loop = Some(Box::new(cb));
    }

    pub fn set_on_frame_change(&mut self, cb: impl FnMut(usize) + 'static) {
        self.on_frame_change = Some(Box::new(cb));
    }

    pub fn clear_callbacks(&mut self) {
        self.on_end = None;
        self.on_loop = None;
        self.on_frame_change = None;
    }
}

impl std::fmt::Debug for AnimationController {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AnimationController")
            .field("animation", &self.current_animation_name())
            .field("frame_index", &self.frame_index)
            .field("frame_time", &self.frame_time)
            .field("speed", &self.speed)
            .field("playing", &self.playing)
            .field("paused", &self.paused)
            .field("finished", &self.finished)
            .finish_non_exhaustive()
    }
}
