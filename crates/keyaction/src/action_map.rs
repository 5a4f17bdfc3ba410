//! Action mapping: named actions bound to alternative key chords.
//!
//! [`ActionMap`] defines which [`KeyChord`]s trigger which named actions.
//! Every map held by an [`ActionInput`](crate::ActionInput) is the
//! caller-supplied map overlaid on [`builtin_defaults`], so the five built-in
//! navigation actions are always present.

use std::collections::BTreeMap;
use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::key::CanonicalKey;
use crate::modifiers::Modifiers;

/// Built-in action: leave the current screen or dialog.
pub const ESCAPE: &str = "escape";
/// Built-in action: move focus left.
pub const NAVIGATE_LEFT: &str = "navigateLeft";
/// Built-in action: move focus right.
pub const NAVIGATE_RIGHT: &str = "navigateRight";
/// Built-in action: move focus up.
pub const NAVIGATE_UP: &str = "navigateUp";
/// Built-in action: move focus down.
pub const NAVIGATE_DOWN: &str = "navigateDown";

/// Names of the actions present in every merged map.
pub const BUILTIN_ACTIONS: [&str; 5] = [
    ESCAPE,
    NAVIGATE_LEFT,
    NAVIGATE_RIGHT,
    NAVIGATE_UP,
    NAVIGATE_DOWN,
];

fn is_false(flag: &bool) -> bool {
    !*flag
}

/// One key plus an exact modifier requirement.
///
/// A flag left `false` means the modifier must NOT be held: `{ key: a }` does
/// not match while Control is down.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct KeyChord {
    /// The key that must be held.
    pub key: CanonicalKey,
    /// Control must be held.
    #[serde(default, skip_serializing_if = "is_false")]
    pub control: bool,
    /// Alt must be held.
    #[serde(default, skip_serializing_if = "is_false")]
    pub alt: bool,
    /// Shift must be held.
    #[serde(default, skip_serializing_if = "is_false")]
    pub shift: bool,
}

impl KeyChord {
    /// A chord with no modifiers.
    #[must_use]
    pub const fn new(key: CanonicalKey) -> Self {
        Self {
            key,
            control: false,
            alt: false,
            shift: false,
        }
    }

    #[must_use]
    pub const fn with_control(mut self) -> Self {
        self.control = true;
        self
    }

    #[must_use]
    pub const fn with_alt(mut self) -> Self {
        self.alt = true;
        self
    }

    #[must_use]
    pub const fn with_shift(mut self) -> Self {
        self.shift = true;
        self
    }

    /// The required modifiers as flags.
    #[must_use]
    pub const fn modifiers(&self) -> Modifiers {
        Modifiers::new(self.control, self.shift, self.alt)
    }
}

/// One alternative trigger for an action.
///
/// Untagged on the wire: an atom with a `key` field is a key chord. New input
/// kinds are added as new variants with their own distinguishing field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ActionAtom {
    /// A keyboard chord.
    Key(KeyChord),
}

impl ActionAtom {
    /// The key chord, if this atom is one.
    #[must_use]
    pub fn key_chord(&self) -> Option<&KeyChord> {
        match self {
            Self::Key(chord) => Some(chord),
        }
    }
}

impl From<KeyChord> for ActionAtom {
    fn from(chord: KeyChord) -> Self {
        Self::Key(chord)
    }
}

impl From<CanonicalKey> for ActionAtom {
    fn from(key: CanonicalKey) -> Self {
        Self::Key(KeyChord::new(key))
    }
}

/// Ordered alternatives for one action. The first key chord names the
/// shortcut label; pressed-state checks OR over all of them.
pub type ActionDefinition = Vec<ActionAtom>;

/// Maps action names to their [`ActionDefinition`]s.
///
/// Serializable to RON so applications can ship their bindings in
/// `config.ron`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ActionMap {
    actions: BTreeMap<String, ActionDefinition>,
}

/// A fresh copy of the five built-in actions.
#[must_use]
pub fn builtin_defaults() -> ActionMap {
    let mut map = ActionMap::new();
    map.insert(ESCAPE, vec![CanonicalKey::Escape.into()]);
    map.insert(NAVIGATE_LEFT, vec![CanonicalKey::LeftArrow.into()]);
    map.insert(NAVIGATE_RIGHT, vec![CanonicalKey::RightArrow.into()]);
    map.insert(NAVIGATE_UP, vec![CanonicalKey::UpArrow.into()]);
    map.insert(NAVIGATE_DOWN, vec![CanonicalKey::DownArrow.into()]);
    map
}

impl ActionMap {
    /// Create an empty action map.
    #[must_use]
    pub fn new() -> Self {
        Self {
            actions: BTreeMap::new(),
        }
    }

    /// Set the definition for an action, returning the one it replaced.
    pub fn insert(
        &mut self,
        name: impl Into<String>,
        definition: ActionDefinition,
    ) -> Option<ActionDefinition> {
        self.actions.insert(name.into(), definition)
    }

    /// Builder form of [`insert`](Self::insert).
    #[must_use]
    pub fn with(mut self, name: impl Into<String>, definition: ActionDefinition) -> Self {
        self.insert(name, definition);
        self
    }

    /// Remove an action from the map.
    pub fn remove(&mut self, name: &str) -> Option<ActionDefinition> {
        self.actions.remove(name)
    }

    /// Get the definition for an action.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&[ActionAtom]> {
        self.actions.get(name).map(Vec::as_slice)
    }

    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.actions.contains_key(name)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.actions.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.actions.is_empty()
    }

    /// Action names in sorted order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.actions.keys().map(String::as_str)
    }

    /// `(name, definition)` pairs in name order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &[ActionAtom])> {
        self.actions
            .iter()
            .map(|(name, definition)| (name.as_str(), definition.as_slice()))
    }

    /// Overlays `self` on the built-in defaults.
    ///
    /// Entries in `self` replace a built-in definition of the same name
    /// wholesale; definitions are never concatenated.
    #[must_use]
    pub fn merged_over_builtins(self) -> Self {
        let mut merged = builtin_defaults();
        merged.actions.extend(self.actions);
        merged
    }

    /// Detect every key chord bound to more than one action.
    ///
    /// Duplicates inside a single action are not conflicts. Results are
    /// sorted by chord for stable output.
    #[must_use]
    pub fn detect_conflicts(&self) -> Vec<Conflict> {
        let mut seen: HashMap<KeyChord, Vec<String>> = HashMap::new();

        for (name, definition) in &self.actions {
            for chord in definition.iter().filter_map(ActionAtom::key_chord) {
                let actions = seen.entry(*chord).or_default();
                if !actions.contains(name) {
                    actions.push(name.clone());
                }
            }
        }

        let mut conflicts: Vec<Conflict> = seen
            .into_iter()
            .filter(|(_, actions)| actions.len() > 1)
            .map(|(chord, actions)| Conflict { chord, actions })
            .collect();
        conflicts.sort_by_key(|c| c.chord);
        conflicts
    }

    /// Serialize to RON string.
    ///
    /// # Errors
    /// Returns an error if serialization fails.
    pub fn to_ron(&self) -> Result<String, ron::Error> {
        ron::ser::to_string_pretty(self, ron::ser::PrettyConfig::default())
    }

    /// Deserialize from RON string.
    ///
    /// # Errors
    /// Returns an error if the RON string is malformed or names an unknown key.
    pub fn from_ron(s: &str) -> Result<Self, ron::error::SpannedError> {
        ron::from_str(s)
    }
}

impl<N: Into<String>> FromIterator<(N, ActionDefinition)> for ActionMap {
    fn from_iter<I: IntoIterator<Item = (N, ActionDefinition)>>(iter: I) -> Self {
        Self {
            actions: iter
                .into_iter()
                .map(|(name, definition)| (name.into(), definition))
                .collect(),
        }
    }
}

/// The same [`KeyChord`] is bound by several actions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Conflict {
    /// The shared chord.
    pub chord: KeyChord,
    /// Actions that bind it, in name order.
    pub actions: Vec<String>,
}
