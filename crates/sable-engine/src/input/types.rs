use std::fmt;

/// Keyboard key identifier.
///
/// Layout-independent: platforms map physical key positions onto these variants.
/// Keys without a variant arrive as `Key::Unknown(code)` with the platform code.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum Key {
    Escape,
    Enter,
    Tab,
    Backspace,
    Space,

    ArrowUp,
    ArrowDown,
    ArrowLeft,
    ArrowRight,

    Shift,
    Control,
    Alt,
    Meta,

    A, B, C, D, E, F, G, H, I, J, K, L, M,
    N, O, P, Q, R, S, T, U, V, W, X, Y, Z,

    Digit0, Digit1, Digit2, Digit3, Digit4,
    Digit5, Digit6, Digit7, Digit8, Digit9,

    F1, F2, F3, F4, F5, F6,
    F7, F8, F9, F10, F11, F12,

    Unknown(u32),
}

impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Key::Unknown(code) => write!(f, "Unknown({code:#x})"),
            other => write!(f, "{other:?}"),
        }
    }
}

#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum MouseButton {
    Left,
    Right,
    Middle,
    Back,
    Forward,
    Other(u16),
}

/// Edge reported by a key or mouse-button event.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum ButtonState {
    Pressed,
    Released,
}

/// Per-frame phase of a key or button, derived from held state plus this frame's
/// edges.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Default)]
pub enum ButtonPhase {
    #[default]
    Up,
    JustPressed,
    Held,
    JustReleased,
}

impl ButtonPhase {
    /// True for `JustPressed` and `Held`.
    #[inline]
    pub fn is_down(self) -> bool {
        matches!(self, ButtonPhase::JustPressed | ButtonPhase::Held)
    }
}

#[derive(Debug, Copy, Clone, Default, Eq, PartialEq)]
pub struct Modifiers {
    pub shift: bool,
    pub ctrl: bool,
    pub alt: bool,
    pub meta: bool,
}

/// Scroll amount; `Line` for notched wheels, `Pixel` for touchpads.
#[derive(Debug, Copy, Clone, PartialEq)]
pub enum MouseWheelDelta {
    Line { x: f32, y: f32 },
    Pixel { x: f32, y: f32 },
}

/// Platform-agnostic input event. Positions are logical pixels.
#[derive(Debug, Clone, PartialEq)]
pub enum InputEvent {
    Key { key: Key, state: ButtonState, repeat: bool },
    PointerMoved { x: f32, y: f32 },
    PointerButton { button: MouseButton, state: ButtonState },
    MouseWheel(MouseWheelDelta),
    ModifiersChanged(Modifiers),
    PointerLeft,
    Focused(bool),
}

impl InputEvent {
    pub fn key_pressed(key: Key) -> Self {
        InputEvent::Key { key, state: ButtonState::Pressed, repeat: false }
    }

    pub fn key_released(key: Key) -> Self {
        InputEvent::Key { key, state: ButtonState::Released, repeat: false }
    }

    pub fn button_pressed(button: MouseButton) -> Self {
        InputEvent::PointerButton { button, state: ButtonState::Pressed }
    }

    pub fn button_released(button: MouseButton) -> Self {
        InputEvent::PointerButton { button, state: ButtonState::Released }
    }
}
