//! The action query engine.
//!
//! [`ActionInput`] owns the merged [`ActionMap`], the [`PressedStatePool`] and
//! the notification bus. Raw platform key events come in through
//! [`key_down`](ActionInput::key_down) / [`key_up`](ActionInput::key_up) (or
//! the winit adapter [`process_event`](ActionInput::process_event)); the
//! application asks [`is_pressed`](ActionInput::is_pressed) and
//! [`just_pressed`](ActionInput::just_pressed) once per frame.
//!
//! # Usage
//!
//! ```
//! use keyaction::{ActionInput, ActionMap, CanonicalKey, Modifiers};
//!
//! let mut input = ActionInput::new();
//! input.set_actions(ActionMap::new().with("moveLeft", vec![CanonicalKey::A.into()]));
//! input.key_down("a", Modifiers::NONE);
//! assert!(input.is_pressed("moveLeft").unwrap());
//! ```

use std::sync::{Mutex, MutexGuard, OnceLock, PoisonError};
use std::time::{Duration, Instant};

use tracing::{debug, trace};
use winit::event::{ElementState, KeyEvent};
use winit::keyboard::{KeyCode, ModifiersState, PhysicalKey};

use crate::action_map::{ActionAtom, ActionMap, KeyChord, builtin_defaults};
use crate::error::LookupError;
use crate::events::{Channel, InputEvents, KeyDispatch};
use crate::key::translate;
use crate::keyboard::{PressedState, PressedStatePool, RawKeyEvent};
use crate::modifiers::Modifiers;

/// How recent a key-down must be for [`ActionInput::just_pressed`].
///
/// Shorter than a 60 Hz frame (16.6 ms), so a game polling once per frame can
/// miss a press entirely. Not configurable.
pub const JUST_PRESSED_WINDOW: Duration = Duration::from_millis(15);

/// Action map, pressed-state pool and listeners for one input surface.
#[derive(Debug)]
pub struct ActionInput {
    actions: ActionMap,
    pool: PressedStatePool,
    events: InputEvents,
}

impl Default for ActionInput {
    fn default() -> Self {
        Self::new()
    }
}

impl ActionInput {
    /// Creates an engine holding only the built-in actions and no pressed keys.
    #[must_use]
    pub fn new() -> Self {
        Self {
            actions: builtin_defaults(),
            pool: PressedStatePool::new(),
            events: InputEvents::new(),
        }
    }

    /// Creates an engine whose map is `candidate` merged over the built-ins.
    #[must_use]
    pub fn with_actions(candidate: ActionMap) -> Self {
        Self {
            actions: candidate.merged_over_builtins(),
            ..Self::new()
        }
    }

    // ── Action map ──────────────────────────────────────────────────

    /// An independent copy of the current action map.
    #[must_use]
    pub fn get_actions(&self) -> ActionMap {
        self.actions.clone()
    }

    /// Borrow the current action map (for label rendering).
    #[must_use]
    pub fn actions(&self) -> &ActionMap {
        &self.actions
    }

    /// Replace the action map with `candidate` overlaid on the built-ins,
    /// then notify [`Channel::ActionsUpdated`] listeners.
    pub fn set_actions(&mut self, candidate: ActionMap) {
        self.actions = candidate.merged_over_builtins();
        debug!(actions = self.actions.len(), "action map replaced");
        self.events.emit_actions_updated(&self.actions);
    }

    // ── Listeners ───────────────────────────────────────────────────

    #[must_use]
    pub fn events(&self) -> &InputEvents {
        &self.events
    }

    /// Register or remove listeners.
    pub fn events_mut(&mut self) -> &mut InputEvents {
        &mut self.events
    }

    // ── Raw key events ──────────────────────────────────────────────

    /// Read-only view of the pressed-state pool.
    #[must_use]
    pub fn pressed_states(&self) -> &PressedStatePool {
        &self.pool
    }

    /// Handle a platform key-down stamped with the current time.
    pub fn key_down(&mut self, raw_key: &str, modifiers: Modifiers) -> KeyDispatch {
        self.key_down_at(raw_key, modifiers, Instant::now())
    }

    /// Handle a platform key-down that happened at `at`.
    pub fn key_down_at(&mut self, raw_key: &str, modifiers: Modifiers, at: Instant) -> KeyDispatch {
        let Some(key) = translate(raw_key) else {
            trace!(raw_key, "ignoring unrecognized key-down");
            return KeyDispatch::Unrecognized;
        };
        self.pool.key_down(key, modifiers, at);
        debug!(%key, ?modifiers, "key down");
        let default_prevented = self.events.emit_key(Channel::InputPressed, key, modifiers);
        KeyDispatch::Delivered { default_prevented }
    }

    /// Handle a platform key-up.
    pub fn key_up(&mut self, raw_key: &str, modifiers: Modifiers) -> KeyDispatch {
        let Some(key) = translate(raw_key) else {
            trace!(raw_key, "ignoring unrecognized key-up");
            return KeyDispatch::Unrecognized;
        };
        self.pool.key_up(key);
        debug!(%key, "key up");
        let default_prevented = self.events.emit_key(Channel::InputReleased, key, modifiers);
        KeyDispatch::Delivered { default_prevented }
    }

    /// Processes a [`RawKeyEvent`] (platform-independent, test-friendly).
    pub fn process_raw(&mut self, event: RawKeyEvent<'_>) -> KeyDispatch {
        self.process_raw_at(event, Instant::now())
    }

    /// [`process_raw`](Self::process_raw) with an explicit event time.
    pub fn process_raw_at(&mut self, event: RawKeyEvent<'_>, at: Instant) -> KeyDispatch {
        match event.state {
            ElementState::Pressed => self.key_down_at(event.key, event.modifiers, at),
            ElementState::Released => self.key_up(event.key, event.modifiers),
        }
    }

    /// Processes a winit [`KeyEvent`] using the modifiers from the latest
    /// `ModifiersChanged` event.
    ///
    /// Keys are identified by their physical position (see
    /// [`physical_key_name`]), so a key released while Shift changed still
    /// releases the key it pressed. Repeats are processed like any key-down.
    pub fn process_event(&mut self, event: &KeyEvent, modifiers: ModifiersState) -> KeyDispatch {
        let Some(raw_key) = physical_key_name(event.physical_key) else {
            trace!(key = ?event.physical_key, "ignoring key without a canonical name");
            return KeyDispatch::Unrecognized;
        };
        self.process_raw(RawKeyEvent {
            key: raw_key,
            state: event.state,
            modifiers: modifiers.into(),
        })
    }

    // ── Queries ─────────────────────────────────────────────────────

    /// Whether any chord of `action` is currently held with exactly its
    /// modifiers.
    ///
    /// # Errors
    /// [`LookupError`] if `action` is not in the current map.
    pub fn is_pressed(&self, action: &str) -> Result<bool, LookupError> {
        Ok(self
            .key_chords(action)?
            .any(|chord| self.held_state(chord).is_some()))
    }

    /// Like [`is_pressed`](Self::is_pressed), and the matching key-down
    /// happened within [`JUST_PRESSED_WINDOW`] of now.
    ///
    /// # Errors
    /// [`LookupError`] if `action` is not in the current map.
    pub fn just_pressed(&self, action: &str) -> Result<bool, LookupError> {
        self.just_pressed_at(action, Instant::now())
    }

    /// [`just_pressed`](Self::just_pressed) evaluated at `now`.
    ///
    /// # Errors
    /// [`LookupError`] if `action` is not in the current map.
    pub fn just_pressed_at(&self, action: &str, now: Instant) -> Result<bool, LookupError> {
        Ok(self.key_chords(action)?.any(|chord| {
            self.held_state(chord)
                .and_then(|state| state.pressed_at)
                .is_some_and(|at| now.saturating_duration_since(at) < JUST_PRESSED_WINDOW)
        }))
    }

    fn key_chords(&self, action: &str) -> Result<impl Iterator<Item = &KeyChord>, LookupError> {
        let definition = self.actions.get(action).ok_or_else(|| LookupError {
            action: action.to_string(),
        })?;
        Ok(definition.iter().filter_map(ActionAtom::key_chord))
    }

    /// The pool entry for `chord.key` if it is held with exactly the chord's
    /// modifiers. A key with no entry counts as released with no modifiers.
    fn held_state(&self, chord: &KeyChord) -> Option<&PressedState> {
        self.pool
            .get(chord.key)
            .filter(|state| state.pressed && state.modifiers == chord.modifiers())
    }
}

/// Raw key name for a physical key, in the form [`translate`] accepts.
///
/// Layout and Shift state do not affect the result: `Digit1` is `"1"` and
/// `Equal` is `"="` whether or not Shift is held. Keys with no canonical
/// counterpart give `None`.
#[must_use]
pub fn physical_key_name(key: PhysicalKey) -> Option<&'static str> {
    let PhysicalKey::Code(code) = key else {
        return None;
    };
    let name = match code {
        KeyCode::ArrowLeft => "ArrowLeft",
        KeyCode::ArrowRight => "ArrowRight",
        KeyCode::ArrowUp => "ArrowUp",
        KeyCode::ArrowDown => "ArrowDown",
        KeyCode::Space => "Space",
        KeyCode::Enter | KeyCode::NumpadEnter => "Enter",
        KeyCode::Backspace => "Backspace",
        KeyCode::Minus | KeyCode::NumpadSubtract => "-",
        KeyCode::NumpadAdd => "+",
        KeyCode::Tab => "Tab",
        KeyCode::Escape => "Escape",
        KeyCode::Comma => ",",
        KeyCode::Period => ".",
        KeyCode::Semicolon => ";",
        KeyCode::Equal => "=",
        KeyCode::F1 => "F1",
        KeyCode::F2 => "F2",
        KeyCode::F3 => "F3",
        KeyCode::F4 => "F4",
        KeyCode::F5 => "F5",
        KeyCode::F6 => "F6",
        KeyCode::F7 => "F7",
        KeyCode::F8 => "F8",
        KeyCode::F9 => "F9",
        KeyCode::F10 => "F10",
        KeyCode::F11 => "F11",
        KeyCode::F12 => "F12",
        KeyCode::Digit0 => "0",
        KeyCode::Digit1 => "1",
        KeyCode::Digit2 => "2",
        KeyCode::Digit3 => "3",
        KeyCode::Digit4 => "4",
        KeyCode::Digit5 => "5",
        KeyCode::Digit6 => "6",
        KeyCode::Digit7 => "7",
        KeyCode::Digit8 => "8",
        KeyCode::Digit9 => "9",
        KeyCode::KeyA => "a",
        KeyCode::KeyB => "b",
        KeyCode::KeyC => "c",
        KeyCode::KeyD => "d",
        KeyCode::KeyE => "e",
        KeyCode::KeyF => "f",
        KeyCode::KeyG => "g",
        KeyCode::KeyH => "h",
        KeyCode::KeyI => "i",
        KeyCode::KeyJ => "j",
        KeyCode::KeyK => "k",
        KeyCode::KeyL => "l",
        KeyCode::KeyM => "m",
        KeyCode::KeyN => "n",
        KeyCode::KeyO => "o",
        KeyCode::KeyP => "p",
        KeyCode::KeyQ => "q",
        KeyCode::KeyR => "r",
        KeyCode::KeyS => "s",
        KeyCode::KeyT => "t",
        KeyCode::KeyU => "u",
        KeyCode::KeyV => "v",
        KeyCode::KeyW => "w",
        KeyCode::KeyX => "x",
        KeyCode::KeyY => "y",
        KeyCode::KeyZ => "z",
        _ => return None,
    };
    Some(name)
}

static GLOBAL: OnceLock<Mutex<ActionInput>> = OnceLock::new();

/// Locks the process-wide default [`ActionInput`], creating it on first use.
///
/// Independent instances from [`ActionInput::new`] never share state with
/// it. Listeners run while the lock is held and must not call `global()`.
pub fn global() -> MutexGuard<'static, ActionInput> {
    GLOBAL
        .get_or_init(|| Mutex::new(ActionInput::new()))
        .lock()
        .unwrap_or_else(PoisonError::into_inner)
}
