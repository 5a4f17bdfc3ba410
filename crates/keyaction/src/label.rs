//! Human-readable shortcut labels (`"Ctrl+Shift+S"`, `"Left"`).

use std::fmt;

use crate::action_map::{ActionAtom, ActionMap, KeyChord};

/// Modifier labels in display order.
const CTRL: &str = "Ctrl";
const ALT: &str = "Alt";
const SHIFT: &str = "Shift";

/// Label for one chord: modifiers in `Ctrl`, `Alt`, `Shift` order, then the key,
/// joined with `+`.
#[must_use]
pub fn chord_label(chord: &KeyChord) -> String {
    let mut parts = Vec::with_capacity(4);
    if chord.control {
        parts.push(CTRL);
    }
    if chord.alt {
        parts.push(ALT);
    }
    if chord.shift {
        parts.push(SHIFT);
    }
    parts.push(chord.key.display_name());
    parts.join("+")
}

/// Label for an action, taken from the first key chord in its definition.
///
/// Returns `None` when the action is absent or has no key chord.
#[must_use]
pub fn shortcut_label(actions: &ActionMap, name: &str) -> Option<String> {
    actions
        .get(name)?
        .iter()
        .find_map(ActionAtom::key_chord)
        .map(chord_label)
}

impl fmt::Display for KeyChord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&chord_label(self))
    }
}
