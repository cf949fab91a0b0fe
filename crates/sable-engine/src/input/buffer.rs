/// Default window an action stays buffered, in seconds.
pub const DEFAULT_BUFFER_TIME: f32 = 0.1;

#[derive(Debug, Clone, PartialEq)]
struct Buffered {
    action: String,
    remaining: f32,
}

/// Short-lived queue of actions that can each be consumed once.
///
/// Lets a jump pressed slightly before landing still count when the landing
/// happens a few frames later.
#[derive(Debug, Default, Clone)]
pub struct ActionBuffer {
    entries: Vec<Buffered>,
}

impl ActionBuffer {
    /// Buffers `action` for `seconds`, refreshing the timer if it is already queued.
    pub fn push(&mut self, action: &str, seconds: f32) {
        match self.entries.iter_mut().find(|b| b.action == action) {
            Some(existing) => existing.remaining = seconds,
            None => self.entries.push(Buffered { action: action.to_owned(), remaining: seconds }),
        }
    }

    /// Removes `action` if it is buffered and reports whether it was.
    pub fn consume(&mut self, action: &str) -> bool {
        match self.entries.iter().position(|b| b.action == action) {
            Some(i) => {
                self.entries.remove(i);
                true
            }
            None => false,
        }
    }

    pub fn contains(&self, action: &str) -> bool {
        self.entries.iter().any(|b| b.action == action)
    }

    /// Counts every entry down by `dt` and drops the expired ones.
    pub fn tick(&mut self, dt: f32) {
        for b in &mut self.entries {
            b.remaining -= dt;
        }
        self.entries.retain(|b| b.remaining > 0.0);
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
