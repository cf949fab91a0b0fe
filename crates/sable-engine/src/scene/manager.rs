use crate::input::{InputEvent, InputManager};
use crate::render::RenderQueue;

use super::lifecycle::StackOp;
use super::{Scene, SceneCtx, TransitionConfig, TransitionKind, TransitionState};

/// Owns the scene stack and sequences fade transitions between stack operations.
///
/// A `Fade` operation is deferred: the overlay ramps to opaque over `duration`, the
/// operation runs exactly once, then the overlay ramps back out. While that happens
/// no scene is updated or sees input, and new requests are dropped.
#[derive(Default)]
pub struct SceneManager {
    stack: Vec<Box<dyn Scene>>,

    state: TransitionState,
    pending: Option<StackOp>,
    progress: f32,
    config: TransitionConfig,
}

impl SceneManager {
    pub fn new() -> Self {
        Self::default()
    }

    // ── stack operations ──────────────────────────────────────────────────

    /// Exits every scene on the stack, then enters `scene`.
    pub fn change_scene(&mut self, scene: impl Scene + 'static) {
        self.change_scene_with(scene, TransitionConfig::none());
    }

    pub fn change_scene_with(&mut self, scene: impl Scene + 'static, config: TransitionConfig) {
        self.request(StackOp::Change(Box::new(scene)), config);
    }

    /// Pauses the current top scene and enters `scene` above it.
    pub fn push_scene(&mut self, scene: impl Scene + 'static) {
        self.push_scene_with(scene, TransitionConfig::none());
    }

    pub fn push_scene_with(&mut self, scene: impl Scene + 'static, config: TransitionConfig) {
        self.request(StackOp::Push(Box::new(scene)), config);
    }

    /// Exits the top scene and resumes the one below. No-op on an empty stack.
    pub fn pop_scene(&mut self) {
        self.pop_scene_with(TransitionConfig::none());
    }

    pub fn pop_scene_with(&mut self, config: TransitionConfig) {
        self.request(StackOp::Pop, config);
    }

    fn request(&mut self, op: StackOp, config: TransitionConfig) {
        if self.is_transitioning() {
            log::warn!("scene {} requested during a transition; dropped", op.name());
            return;
        }

        if matches!(op, StackOp::Pop) && self.stack.is_empty() {
            return;
        }

        match config.kind {
            TransitionKind::None => self.execute(op),
            TransitionKind::Fade => {
                log::debug!("scene {}: fading out over {}s", op.name(), config.duration);
                self.pending = Some(op);
                self.config = config;
                self.progress = 0.0;
                self.state = TransitionState::FadingOut;
            }
        }
    }

    fn execute(&mut self, op: StackOp) {
        log::debug!("scene {} (depth {})", op.name(), self.stack.len());

        match op {
            StackOp::Change(mut scene) => {
                while let Some(mut old) = self.stack.pop() {
                    old.on_exit();
                }
                scene.on_enter();
                self.stack.push(scene);
            }
            StackOp::Push(mut scene) => {
                if let Some(top) = self.stack.last_mut() {
                    top.on_pause();
                }
                scene.on_enter();
                self.stack.push(scene);
            }
            StackOp::Pop => {
                let Some(mut top) = self.stack.pop() else { return };
                top.on_exit();
                if let Some(next) = self.stack.last_mut() {
                    next.on_resume();
                }
            }
        }
    }

    fn apply(&mut self, ctx: SceneCtx) {
        for (op, config) in ctx.requests {
            self.request(op, config);
        }
    }

    // ── per frame ─────────────────────────────────────────────────────────

    /// Advances the transition if one is in flight, otherwise updates the top scene.
    pub fn update(&mut self, dt: f32) {
        match self.state {
            TransitionState::None => {
                let mut ctx = SceneCtx::default();
                if let Some(top) = self.stack.last_mut() {
                    top.update(dt, &mut ctx);
                }
                self.apply(ctx);
            }
            TransitionState::FadingOut => {
                self.progress += dt;
                if self.progress >= self.config.duration {
                    if let Some(op) = self.pending.take() {
                        self.execute(op);
                    }
                    log::debug!("scene transition: fading in");
                    self.state = TransitionState::FadingIn;
                    self.progress = 0.0;
                }
            }
            TransitionState::FadingIn => {
                self.progress += dt;
                if self.progress >= self.config.duration {
                    self.state = TransitionState::None;
                    self.progress = 0.0;
                }
            }
        }
    }

    /// Routes `event` to the top scene unless a transition is running.
    pub fn handle_event(&mut self, event: &InputEvent) {
        if self.is_transitioning() {
            return;
        }
        let mut ctx = SceneCtx::default();
        if let Some(top) = self.stack.last_mut() {
            top.handle_event(event, &mut ctx);
        }
        self.apply(ctx);
    }

    /// Gives the top scene a look at polled input unless a transition is running.
    pub fn handle_input(&mut self, input: &InputManager, dt: f32) {
        if self.is_transitioning() {
            return;
        }
        let mut ctx = SceneCtx::default();
        if let Some(top) = self.stack.last_mut() {
            top.handle_input(input, dt, &mut ctx);
        }
        self.apply(ctx);
    }

    /// Renders every scene bottom to top, then the fade overlay.
    pub fn render(&mut self, queue: &mut RenderQueue) {
        for scene in &mut self.stack {
            scene.render(queue);
        }

        if self.is_transitioning() {
            queue.push_overlay(self.config.color.with_alpha(self.fade_alpha()));
        }
    }

    // ── queries ───────────────────────────────────────────────────────────

    pub fn has_active_scene(&self) -> bool {
        !self.stack.is_empty()
    }

    pub fn scene_count(&self) -> usize {
        self.stack.len()
    }

    pub fn active_scene(&self) -> Option<&dyn Scene> {
        self.stack.last().map(|s| s.as_ref())
    }

    pub fn is_transitioning(&self) -> bool {
        self.state != TransitionState::None
    }

    pub fn transition_state(&self) -> TransitionState {
        self.state
    }

    /// Seconds into the current fade phase.
    pub fn transition_progress(&self) -> f32 {
        self.progress
    }

    pub fn transition_config(&self) -> TransitionConfig {
        self.config
    }

    /// Overlay opacity: rises 0→255 while fading out, falls 255→0 while fading in.
    pub fn fade_alpha(&self) -> u8 {
        let t = if self.config.duration > 0.0 {
            (self.progress / self.config.duration).clamp(0.0, 1.0)
        } else {
            1.0
        };

        let opacity = match self.state {
            TransitionState::None => 0.0,
            TransitionState::FadingOut => t,
            TransitionState::FadingIn => 1.0 - t,
        };
        (opacity * 255.0).round() as u8
    }
}
