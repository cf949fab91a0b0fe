use std::collections::HashSet;

use super::frame::InputFrame;
use super::types::{ButtonPhase, ButtonState, InputEvent, Key, Modifiers, MouseButton, MouseWheelDelta};

/// Held keys/buttons and pointer position, updated event by event.
#[derive(Debug, Default)]
pub struct InputState {
    pub modifiers: Modifiers,
    pub focused: bool,
    /// Logical pixels; `None` once the pointer leaves the window.
    pub pointer_pos: Option<(f32, f32)>,
    pub keys_down: HashSet<Key>,
    pub buttons_down: HashSet<MouseButton>,
}

impl InputState {
    /// Applies `ev` and records the resulting edges into `frame`.
    ///
    /// Key repeats do not produce a new press edge.
    pub fn apply_event(&mut self, frame: &mut InputFrame, ev: &InputEvent) {
        frame.event_count += 1;

        match *ev {
            InputEvent::Key { key, state, .. } => match state {
                ButtonState::Pressed => {
                    if self.keys_down.insert(key) {
                        frame.keys_pressed.insert(key);
                    }
                }
                ButtonState::Released => {
                    if self.keys_down.remove(&key) {
                        frame.keys_released.insert(key);
                    }
                }
            },

            InputEvent::PointerButton { button, state } => match state {
                ButtonState::Pressed => {
                    if self.buttons_down.insert(button) {
                        frame.buttons_pressed.insert(button);
                    }
                }
                ButtonState::Released => {
                    if self.buttons_down.remove(&button) {
                        frame.buttons_released.insert(button);
                    }
                }
            },

            InputEvent::PointerMoved { x, y } => self.pointer_pos = Some((x, y)),
            InputEvent::PointerLeft => self.pointer_pos = None,

            InputEvent::MouseWheel(MouseWheelDelta::Line { x, y }) => {
                frame.wheel_lines.0 += x;
                frame.wheel_lines.1 += y;
            }
            InputEvent::MouseWheel(MouseWheelDelta::Pixel { .. }) => {}

            InputEvent::ModifiersChanged(m) => self.modifiers = m,

            InputEvent::Focused(focused) => {
                self.focused = focused;
                if !focused {
                    // Releases are never delivered to an unfocused window.
                    frame.keys_released.extend(self.keys_down.drain());
                    frame.buttons_released.extend(self.buttons_down.drain());
                }
            }
        }
    }

    pub fn key_down(&self, key: Key) -> bool {
        self.keys_down.contains(&key)
    }

    pub fn button_down(&self, button: MouseButton) -> bool {
        self.buttons_down.contains(&button)
    }

    pub fn key_phase(&self, frame: &InputFrame, key: Key) -> ButtonPhase {
        phase(
            self.keys_down.contains(&key),
            frame.keys_pressed.contains(&key),
            frame.keys_released.contains(&key),
        )
    }

    pub fn button_phase(&self, frame: &InputFrame, button: MouseButton) -> ButtonPhase {
        phase(
            self.buttons_down.contains(&button),
            frame.buttons_pressed.contains(&button),
            frame.buttons_released.contains(&button),
        )
    }
}

fn phase(down: bool, pressed: bool, released: bool) -> ButtonPhase {
    match (down, pressed, released) {
        (true, true, _) => ButtonPhase::JustPressed,
        (true, false, _) => ButtonPhase::Held,
        (false, _, true) => ButtonPhase::JustReleased,
        (false, _, false) => ButtonPhase::Up,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn repeat_does_not_press_twice() {
        let mut state = InputState::default();
        let mut frame = InputFrame::default();

        state.apply_event(&mut frame, &InputEvent::key_pressed(Key::Space));
        frame.clear();
        state.apply_event(
            &mut frame,
            &InputEvent::Key { key: Key::Space, state: ButtonState::Pressed, repeat: true },
        );

        assert!(frame.keys_pressed.is_empty());
        assert_eq!(state.key_phase(&frame, Key::Space), ButtonPhase::Held);
    }

    #[test]
    fn phases_follow_edges() {
        let mut state = InputState::default();
        let mut frame = InputFrame::default();

        assert_eq!(state.key_phase(&frame, Key::A), ButtonPhase::Up);
        state.apply_event(&mut frame, &InputEvent::key_pressed(Key::A));
        assert_eq!(state.key_phase(&frame, Key::A), ButtonPhase::JustPressed);

        frame.clear();
        state.apply_event(&mut frame, &InputEvent::key_released(Key::A));
        assert_eq!(state.key_phase(&frame, Key::A), ButtonPhase::JustReleased);

        frame.clear();
        assert_eq!(state.key_phase(&frame, Key::A), ButtonPhase::Up);
    }

    #[test]
    fn focus_loss_releases_everything() {
        let mut state = InputState::default();
        let mut frame = InputFrame::default();
        state.apply_event(&mut frame, &InputEvent::key_pressed(Key::W));
        state.apply_event(&mut frame, &InputEvent::button_pressed(MouseButton::Left));
        frame.clear();

        state.apply_event(&mut frame, &InputEvent::Focused(false));
        assert!(state.keys_down.is_empty());
        assert!(frame.keys_released.contains(&Key::W));
        assert_eq!(state.button_phase(&frame, MouseButton::Left), ButtonPhase::JustReleased);
    }

    #[test]
    fn wheel_lines_accumulate() {
        let mut state = InputState::default();
        let mut frame = InputFrame::default();
        state.apply_event(&mut frame, &InputEvent::MouseWheel(MouseWheelDelta::Line { x: 0.0, y: 1.0 }));
        state.apply_event(&mut frame, &InputEvent::MouseWheel(MouseWheelDelta::Line { x: 0.0, y: 2.0 }));
        assert_eq!(frame.wheel_lines, (0.0, 3.0));
        assert_eq!(frame.event_count, 2);
    }
}
