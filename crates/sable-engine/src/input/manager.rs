use std::collections::HashMap;

use super::actions::ActionMap;
use super::buffer::ActionBuffer;
use super::frame::InputFrame;
use super::state::InputState;
use super::types::{ButtonPhase, InputEvent, Key, MouseButton};

/// Per-window input hub: raw key/button state, action bindings, buffering.
///
/// Owned by the frame loop and passed to whoever needs it; there is no global
/// instance. Call order per frame: `begin_frame`, `apply_event` for each platform
/// event, then `update(dt)`.
#[derive(Default)]
pub struct InputManager {
    state: InputState,
    frame: InputFrame,
    actions: ActionMap,
    buffer: ActionBuffer,
    callbacks: HashMap<String, Box<dyn FnMut()>>,
}

impl InputManager {
    pub fn new() -> Self {
        Self::default()
    }

    // ── frame lifecycle ───────────────────────────────────────────────────

    /// Drops last frame's edges. Held state carries over.
    pub fn begin_frame(&mut self) {
        self.frame.clear();
    }

    pub fn apply_event(&mut self, ev: &InputEvent) {
        self.state.apply_event(&mut self.frame, ev);
    }

    /// Ages the action buffer and fires callbacks for actions pressed this frame.
    pub fn update(&mut self, dt: f32) {
        self.buffer.tick(dt);

        let Self { frame, actions, callbacks, .. } = self;
        for (action, cb) in callbacks.iter_mut() {
            if action_pressed(actions, frame, action) {
                cb();
            }
        }
    }

    pub fn state(&self) -> &InputState {
        &self.state
    }

    pub fn frame(&self) -> &InputFrame {
        &self.frame
    }

    // ── raw queries ───────────────────────────────────────────────────────

    pub fn is_key_down(&self, key: Key) -> bool {
        self.state.key_down(key)
    }

    pub fn is_key_pressed(&self, key: Key) -> bool {
        self.frame.keys_pressed.contains(&key)
    }

    pub fn is_key_released(&self, key: Key) -> bool {
        self.frame.keys_released.contains(&key)
    }

    pub fn key_phase(&self, key: Key) -> ButtonPhase {
        self.state.key_phase(&self.frame, key)
    }

    pub fn is_button_down(&self, button: MouseButton) -> bool {
        self.state.button_down(button)
    }

    pub fn is_button_pressed(&self, button: MouseButton) -> bool {
        self.frame.buttons_pressed.contains(&button)
    }

    pub fn is_button_released(&self, button: MouseButton) -> bool {
        self.frame.buttons_released.contains(&button)
    }

    pub fn button_phase(&self, button: MouseButton) -> ButtonPhase {
        self.state.button_phase(&self.frame, button)
    }

    pub fn pointer_position(&self) -> Option<(f32, f32)> {
        self.state.pointer_pos
    }

    // ── action bindings ───────────────────────────────────────────────────

    pub fn map_key(&mut self, action: impl Into<String>, key: Key) {
        self.actions.map_key(action, key);
    }

    pub fn map_mouse(&mut self, action: impl Into<String>, button: MouseButton) {
        self.actions.map_mouse(action, button);
    }

    pub fn unmap_action(&mut self, action: &str) {
        self.actions.unmap(action);
    }

    pub fn clear_all_mappings(&mut self) {
        self.actions.clear();
    }

    pub fn key_binding(&self, action: &str) -> Option<Key> {
        self.actions.key(action)
    }

    pub fn mouse_binding(&self, action: &str) -> Option<MouseButton> {
        self.actions.button(action)
    }

    /// Any binding of `action` is held.
    pub fn is_action_active(&self, action: &str) -> bool {
        self.actions.any(action, |k| self.state.key_down(k), |b| self.state.button_down(b))
    }

    /// Any binding of `action` went down this frame.
    pub fn is_action_pressed(&self, action: &str) -> bool {
        action_pressed(&self.actions, &self.frame, action)
    }

    /// Any binding of `action` went up this frame.
    pub fn is_action_released(&self, action: &str) -> bool {
        self.actions.any(
            action,
            |k| self.frame.keys_released.contains(&k),
            |b| self.frame.buttons_released.contains(&b),
        )
    }

    // ── buffering ─────────────────────────────────────────────────────────

    /// Buffers `action` for `seconds`. Ignored while the action is held.
    pub fn buffer_action(&mut self, action: &str, seconds: f32) {
        if self.is_action_active(action) {
            return;
        }
        self.buffer.push(action, seconds);
    }

    /// Consumes a buffered `action`; true at most once per buffering.
    pub fn consume_buffered_action(&mut self, action: &str) -> bool {
        self.buffer.consume(action)
    }

    pub fn clear_buffer(&mut self) {
        self.buffer.clear();
    }

    pub fn buffer(&self) -> &ActionBuffer {
        &self.buffer
    }

    // ── callbacks ─────────────────────────────────────────────────────────

    /// Called from `update` on frames where `action` is pressed. One slot per action.
    pub fn set_action_pressed_callback(&mut self, action: impl Into<String>, cb: impl FnMut() + 'static) {
        self.callbacks.insert(action.into(), Box::new(cb));
    }

    pub fn clear_action_callbacks(&mut self) {
        self.callbacks.clear();
    }
}

impl std::fmt::Debug for InputManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("InputManager")
            .field("state", &self.state)
            .field("actions", &self.actions)
            .field("buffer", &self.buffer)
            .field("callbacks", &self.callbacks.len())
            .finish_non_exhaustive()
    }
}

fn action_pressed(actions: &ActionMap, frame: &InputFrame, action: &str) -> bool {
    actions.any(
        action,
        |k| frame.keys_pressed.contains(&k),
        |b| frame.buttons_pressed.contains(&b),
    )
}
