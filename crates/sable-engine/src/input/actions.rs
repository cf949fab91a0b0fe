use std::collections::HashMap;

use super::types::{Key, MouseButton};

/// Named actions bound to at most one key and one mouse button each.
#[derive(Debug, Default, Clone)]
pub struct ActionMap {
    keys: HashMap<String, Key>,
    buttons: HashMap<String, MouseButton>,
}

impl ActionMap {
    /// Binds `action` to `key`, replacing any previous key binding.
    pub fn map_key(&mut self, action: impl Into<String>, key: Key) {
        self.keys.insert(action.into(), key);
    }

    /// Binds `action` to `button`, replacing any previous button binding.
    pub fn map_mouse(&mut self, action: impl Into<String>, button: MouseButton) {
        self.buttons.insert(action.into(), button);
    }

    /// Removes both bindings of `action`.
    pub fn unmap(&mut self, action: &str) {
        self.keys.remove(action);
        self.buttons.remove(action);
    }

    pub fn clear(&mut self) {
        self.keys.clear();
        self.buttons.clear();
    }

    pub fn key(&self, action: &str) -> Option<Key> {
        self.keys.get(action).copied()
    }

    pub fn button(&self, action: &str) -> Option<MouseButton> {
        self.buttons.get(action).copied()
    }

    /// True if either binding of `action` satisfies its predicate.
    pub(super) fn any(
        &self,
        action: &str,
        key_test: impl Fn(Key) -> bool,
        button_test: impl Fn(MouseButton) -> bool,
    ) -> bool {
        self.key(action).is_some_and(key_test) || self.button(action).is_some_and(button_test)
    }
}
