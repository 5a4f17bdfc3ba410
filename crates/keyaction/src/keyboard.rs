//! Pressed-state pool keyed by canonical key.
//!
//! [`PressedStatePool`] records, for every [`CanonicalKey`] that has seen an
//! event, whether it is held, when it was last pressed, and which modifiers
//! were down at that moment. Entries are created lazily and never removed;
//! the pool is bounded by the size of the key enum.

use std::collections::HashMap;
use std::time::Instant;

use winit::event::ElementState;

use crate::key::CanonicalKey;
use crate::modifiers::Modifiers;

/// Minimal description of a raw platform key event.
#[derive(Debug, Clone, Copy)]
pub struct RawKeyEvent<'a> {
    /// Platform key name, e.g. `"ArrowLeft"` or `"a"`.
    pub key: &'a str,
    /// Whether the key was pressed or released.
    pub state: ElementState,
    /// Modifiers held when the event fired.
    pub modifiers: Modifiers,
}

/// Live state of one canonical key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PressedState {
    /// Whether the key is currently held.
    pub pressed: bool,
    /// When the most recent key-down (including repeats) arrived.
    ///
    /// `None` until the key is first pressed; left untouched on release.
    pub pressed_at: Option<Instant>,
    /// Modifiers held at the last key-down; cleared on release.
    pub modifiers: Modifiers,
}

impl PressedState {
    #[must_use]
    pub fn control(&self) -> bool {
        self.modifiers.control()
    }

    #[must_use]
    pub fn shift(&self) -> bool {
        self.modifiers.shift()
    }

    #[must_use]
    pub fn alt(&self) -> bool {
        self.modifiers.alt()
    }
}

/// Tracks [`PressedState`] per [`CanonicalKey`].
#[derive(Debug, Clone, Default)]
pub struct PressedStatePool {
    states: HashMap<CanonicalKey, PressedState>,
}

impl PressedStatePool {
    /// Creates an empty pool with no keys pressed.
    #[must_use]
    pub fn new() -> Self {
        Self {
            states: HashMap::new(),
        }
    }

    /// Records a key-down at `at`.
    ///
    /// Key repeat re-stamps the timestamp, so a held key keeps re-entering
    /// the just-pressed window while the platform repeats it.
    pub fn key_down(&mut self, key: CanonicalKey, modifiers: Modifiers, at: Instant) {
        let state = self.states.entry(key).or_default();
        state.pressed = true;
        state.pressed_at = Some(at);
        state.modifiers = modifiers;
    }

    /// Records a key-up. Clears all modifier flags.
    pub fn key_up(&mut self, key: CanonicalKey) {
        let state = self.states.entry(key).or_default();
        state.pressed = false;
        state.modifiers = Modifiers::NONE;
    }

    /// The recorded state for `key`, if it has ever seen an event.
    #[must_use]
    pub fn get(&self, key: CanonicalKey) -> Option<&PressedState> {
        self.states.get(&key)
    }

    /// Returns `true` while the key is held down.
    #[must_use]
    pub fn is_pressed(&self, key: CanonicalKey) -> bool {
        self.get(key).is_some_and(|state| state.pressed)
    }

    /// Number of keys that have ever seen an event.
    #[must_use]
    pub fn len(&self) -> usize {
        self.states.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.states.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn test_initial_state_no_keys_pressed() {
        let pool = PressedStatePool::new();
        for key in [CanonicalKey::W, CanonicalKey::A, CanonicalKey::Spacebar, CanonicalKey::Escape] {
            assert!(!pool.is_pressed(key));
            assert!(pool.get(key).is_none());
        }
        assert!(pool.is_empty());
    }

    #[test]
    fn test_key_down_records_modifiers_and_time() {
        let mut pool = PressedStatePool::new();
        let t = Instant::now();
        pool.key_down(CanonicalKey::S, Modifiers::CTRL | Modifiers::SHIFT, t);
        let state = pool.get(CanonicalKey::S).expect("entry created");
        assert!(state.pressed);
        assert_eq!(state.pressed_at, Some(t));
        assert!(state.control());
        assert!(state.shift());
        assert!(!state.alt());
    }

    #[test]
    fn test_key_up_clears_modifiers_keeps_timestamp() {
        let mut pool = PressedStatePool::new();
        let t = Instant::now();
        pool.key_down(CanonicalKey::S, Modifiers::ALT, t);
        pool.key_up(CanonicalKey::S);
        let state = pool.get(CanonicalKey::S).expect("entry kept");
        assert!(!state.pressed);
        assert!(state.modifiers.is_empty());
        assert_eq!(state.pressed_at, Some(t));
    }

    #[test]
    fn test_key_up_without_press_creates_released_entry() {
        let mut pool = PressedStatePool::new();
        pool.key_up(CanonicalKey::Tab);
        assert_eq!(pool.get(CanonicalKey::Tab), Some(&PressedState::default()));
        assert_eq!(pool.len(), 1);
    }

    #[test]
    fn test_repeat_restamps_timestamp() {
        let mut pool = PressedStatePool::new();
        let t = Instant::now();
        pool.key_down(CanonicalKey::A, Modifiers::NONE, t);
        let later = t + Duration::from_millis(500);
        pool.key_down(CanonicalKey::A, Modifiers::NONE, later);
        assert_eq!(pool.get(CanonicalKey::A).and_then(|s| s.pressed_at), Some(later));
        assert_eq!(pool.len(), 1);
    }

    #[test]
    fn test_multiple_keys_tracked_independently() {
        let mut pool = PressedStatePool::new();
        let t = Instant::now();
        pool.key_down(CanonicalKey::W, Modifiers::NONE, t);
        pool.key_down(CanonicalKey::D, Modifiers::NONE, t);
        pool.key_up(CanonicalKey::W);
        assert!(!pool.is_pressed(CanonicalKey::W));
        assert!(pool.is_pressed(CanonicalKey::D));
    }
}
