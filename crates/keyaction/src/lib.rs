//! Named input actions over raw keyboard events.
//!
//! Applications bind action names to alternative key chords in an
//! [`ActionMap`], feed platform key events into an [`ActionInput`], and ask
//! whether an action is held ([`ActionInput::is_pressed`]) or was pressed
//! within the last few milliseconds ([`ActionInput::just_pressed`]).
//! [`shortcut_label`] renders the hint text shown next to a control.

pub mod action_input;
pub mod action_map;
pub mod error;
pub mod events;
pub mod key;
pub mod keyboard;
pub mod label;
pub mod modifiers;

pub use action_input::{ActionInput, JUST_PRESSED_WINDOW, global, physical_key_name};
pub use action_map::{
    ActionAtom, ActionDefinition, ActionMap, BUILTIN_ACTIONS, Conflict, KeyChord,
    builtin_defaults,
};
pub use error::{LookupError, UnknownKeyError};
pub use events::{Channel, InputEvents, KeyDispatch, KeyNotification, ListenerId};
pub use key::{CanonicalKey, translate};
pub use keyboard::{PressedState, PressedStatePool, RawKeyEvent};
pub use label::{chord_label, shortcut_label};
pub use modifiers::Modifiers;
