use crate::input::{InputEvent, InputManager};
use crate::render::RenderQueue;

use super::TransitionConfig;

/// A screen or game state living on the [`SceneManager`](super::SceneManager) stack.
///
/// Only the top scene receives input and updates; every scene on the stack renders,
/// bottom to top, so a paused scene stays visible under an overlay.
pub trait Scene {
    fn on_enter(&mut self) {}
    fn on_exit(&mut self) {}
    /// Another scene was pushed on top.
    fn on_pause(&mut self) {}
    /// The scene above was popped.
    fn on_resume(&mut self) {}

    fn handle_event(&mut self, _event: &InputEvent, _ctx: &mut SceneCtx) {}

    /// Polled input for the frame, delivered before `update`.
    fn handle_input(&mut self, _input: &InputManager, _dt: f32, _ctx: &mut SceneCtx) {}

    fn update(&mut self, dt: f32, ctx: &mut SceneCtx);

    fn render(&mut self, queue: &mut RenderQueue);
}

pub(super) enum StackOp {
    Change(Box<dyn Scene>),
    Push(Box<dyn Scene>),
    Pop,
}

impl StackOp {
    pub(super) fn name(&self) -> &'static str {
        match self {
            StackOp::Change(_) => "change",
            StackOp::Push(_) => "push",
            StackOp::Pop => "pop",
        }
    }
}

/// Handed to scene callbacks so a scene can change the stack it lives on.
///
/// Requests are buffered and applied, in order, after the callback returns.
#[derive(Default)]
pub struct SceneCtx {
    pub(super) requests: Vec<(StackOp, TransitionConfig)>,
}

impl SceneCtx {
    pub fn change_scene(&mut self, scene: impl Scene + 'static) {
        self.change_scene_with(scene, TransitionConfig::none());
    }

    pub fn change_scene_with(&mut self, scene: impl Scene + 'static, config: TransitionConfig) {
        self.requests.push((StackOp::Change(Box::new(scene)), config));
    }

    pub fn push_scene(&mut self, scene: impl Scene + 'static) {
        self.push_scene_with(scene, TransitionConfig::none());
    }

    pub fn push_scene_with(&mut self, scene: impl Scene + 'static, config: TransitionConfig) {
        self.requests.push((StackOp::Push(Box::new(scene)), config));
    }

    pub fn pop_scene(&mut self) {
        self.pop_scene_with(TransitionConfig::none());
    }

    pub fn pop_scene_with(&mut self, config: TransitionConfig) {
        self.requests.push((StackOp::Pop, config));
    }

    pub fn has_requests(&self) -> bool {
        !self.requests.is_empty()
    }
}
