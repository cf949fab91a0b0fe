use std::collections::HashSet;

use super::types::{Key, MouseButton};

/// Edges recorded since the last `begin_frame`.
#[derive(Debug, Default)]
pub struct InputFrame {
    pub keys_pressed: HashSet<Key>,
    pub keys_released: HashSet<Key>,
    pub buttons_pressed: HashSet<MouseButton>,
    pub buttons_released: HashSet<MouseButton>,
    /// Accumulated wheel motion in lines (pixel deltas are not folded in).
    pub wheel_lines: (f32, f32),
    pub event_count: usize,
}

impl InputFrame {
    pub fn clear(&mut self) {
        self.keys_pressed.clear();
        self.keys_released.clear();
        self.buttons_pressed.clear();
        self.buttons_released.clear();
        self.wheel_lines = (0.0, 0.0);
        self.event_count = 0;
    }
}
