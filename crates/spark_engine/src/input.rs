//! Polled input interface
//!
//! The engine polls input, it is never pushed events: entity updates query
//! key state through [`InputState`] and the platform layer refreshes that
//! state once per frame. Query results are only meaningful between the
//! platform's per-frame updates.

use std::collections::HashSet;

/// Keys the engine can query
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyCode {
    /// A key
    A,
    /// D key
    D,
    /// S key
    S,
    /// W key
    W,
    /// Space key
    Space,
    /// Enter key
    Enter,
    /// Escape key
    Escape,
    /// Up arrow
    Up,
    /// Down arrow
    Down,
    /// Left arrow
    Left,
    /// Right arrow
    Right,
}

/// Read-only polled key state
pub trait InputState {
    /// Whether the key is currently held
    fn is_key_down(&self, key: KeyCode) -> bool;

    /// Whether the key went down this frame (held now, not held the
    /// previous frame)
    fn is_key_pressed(&self, key: KeyCode) -> bool;
}

/// In-memory input source for headless runs and tests.
///
/// Drive it by pressing/releasing keys and calling
/// [`ScriptedInput::advance_frame`] once per simulated frame so the
/// pressed-this-frame edge detection behaves like real input.
#[derive(Debug, Default, Clone)]
pub struct ScriptedInput {
    down: HashSet<KeyCode>,
    previous: HashSet<KeyCode>,
}

impl ScriptedInput {
    /// Create a source with no keys held
    pub fn new() -> Self {
        Self::default()
    }

    /// Hold a key down
    pub fn press(&mut self, key: KeyCode) {
        self.down.insert(key);
    }

    /// Release a held key
    pub fn release(&mut self, key: KeyCode) {
        self.down.remove(&key);
    }

    /// Latch the current state as "previous frame"
    pub fn advance_frame(&mut self) {
        self.previous = self.down.clone();
    }
}

impl InputState for ScriptedInput {
    fn is_key_down(&self, key: KeyCode) -> bool {
        self.down.contains(&key)
    }

    fn is_key_pressed(&self, key: KeyCode) -> bool {
        self.down.contains(&key) && !self.previous.contains(&key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pressed_is_a_single_frame_edge() {
        let mut input = ScriptedInput::new();
        input.press(KeyCode::Space);
        assert!(input.is_key_down(KeyCode::Space));
        assert!(input.is_key_pressed(KeyCode::Space));

        input.advance_frame();
        assert!(input.is_key_down(KeyCode::Space));
        assert!(!input.is_key_pressed(KeyCode::Space));

        input.release(KeyCode::Space);
        input.advance_frame();
        assert!(!input.is_key_down(KeyCode::Space));
    }
}
