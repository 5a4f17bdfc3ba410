//! Canonical key identities and translation from platform key names.
//!
//! [`CanonicalKey`] is the closed set of keys the action layer understands.
//! Platform key names (the W3C `KeyboardEvent.key` values that winit also
//! uses for its named keys) are normalized through [`translate`]; anything
//! outside the fixed table is unrecognized and ignored by the caller.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::UnknownKeyError;

/// Normalized key identifier, independent of platform key names.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum CanonicalKey {
    LeftArrow,
    RightArrow,
    UpArrow,
    DownArrow,
    Spacebar,
    Enter,
    Backspace,
    Minus,
    Plus,
    Tab,
    Escape,
    F1,
    F2,
    F3,
    F4,
    F5,
    F6,
    F7,
    F8,
    F9,
    F10,
    F11,
    F12,
    Digit0,
    Digit1,
    Digit2,
    Digit3,
    Digit4,
    Digit5,
    Digit6,
    Digit7,
    Digit8,
    Digit9,
    A,
    B,
    C,
    D,
    E,
    F,
    G,
    H,
    I,
    J,
    K,
    L,
    M,
    N,
    O,
    P,
    Q,
    R,
    S,
    T,
    U,
    V,
    W,
    X,
    Y,
    Z,
    Comma,
    Dot,
    Semicolon,
    Assign,
}

impl CanonicalKey {
    /// Every canonical key, in declaration order.
    pub const ALL: [CanonicalKey; 63] = [
        Self::LeftArrow,
        Self::RightArrow,
        Self::UpArrow,
        Self::DownArrow,
        Self::Spacebar,
        Self::Enter,
        Self::Backspace,
        Self::Minus,
        Self::Plus,
        Self::Tab,
        Self::Escape,
        Self::F1,
        Self::F2,
        Self::F3,
        Self::F4,
        Self::F5,
        Self::F6,
        Self::F7,
        Self::F8,
        Self::F9,
        Self::F10,
        Self::F11,
        Self::F12,
        Self::Digit0,
        Self::Digit1,
        Self::Digit2,
        Self::Digit3,
        Self::Digit4,
        Self::Digit5,
        Self::Digit6,
        Self::Digit7,
        Self::Digit8,
        Self::Digit9,
        Self::A,
        Self::B,
        Self::C,
        Self::D,
        Self::E,
        Self::F,
        Self::G,
        Self::H,
        Self::I,
        Self::J,
        Self::K,
        Self::L,
        Self::M,
        Self::N,
        Self::O,
        Self::P,
        Self::Q,
        Self::R,
        Self::S,
        Self::T,
        Self::U,
        Self::V,
        Self::W,
        Self::X,
        Self::Y,
        Self::Z,
        Self::Comma,
        Self::Dot,
        Self::Semicolon,
        Self::Assign,
    ];

    /// The canonical identifier string (e.g. `"leftArrow"`, `"f3"`, `"a"`).
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::LeftArrow => "leftArrow",
            Self::RightArrow => "rightArrow",
            Self::UpArrow => "upArrow",
            Self::DownArrow => "downArrow",
            Self::Spacebar => "spacebar",
            Self::Enter => "enter",
            Self::Backspace => "backspace",
            Self::Minus => "minus",
            Self::Plus => "plus",
            Self::Tab => "tab",
            Self::Escape => "escape",
            Self::F1 => "f1",
            Self::F2 => "f2",
            Self::F3 => "f3",
            Self::F4 => "f4",
            Self::F5 => "f5",
            Self::F6 => "f6",
            Self::F7 => "f7",
            Self::F8 => "f8",
            Self::F9 => "f9",
            Self::F10 => "f10",
            Self::F11 => "f11",
            Self::F12 => "f12",
            Self::Digit0 => "0",
            Self::Digit1 => "1",
            Self::Digit2 => "2",
            Self::Digit3 => "3",
            Self::Digit4 => "4",
            Self::Digit5 => "5",
            Self::Digit6 => "6",
            Self::Digit7 => "7",
            Self::Digit8 => "8",
            Self::Digit9 => "9",
            Self::A => "a",
            Self::B => "b",
            Self::C => "c",
            Self::D => "d",
            Self::E => "e",
            Self::F => "f",
            Self::G => "g",
            Self::H => "h",
            Self::I => "i",
            Self::J => "j",
            Self::K => "k",
            Self::L => "l",
            Self::M => "m",
            Self::N => "n",
            Self::O => "o",
            Self::P => "p",
            Self::Q => "q",
            Self::R => "r",
            Self::S => "s",
            Self::T => "t",
            Self::U => "u",
            Self::V => "v",
            Self::W => "w",
            Self::X => "x",
            Self::Y => "y",
            Self::Z => "z",
            Self::Comma => "comma",
            Self::Dot => "dot",
            Self::Semicolon => "semicolon",
            Self::Assign => "assign",
        }
    }

    /// Human-readable label used in shortcut hints (`leftArrow` -> `"Left"`).
    ///
    /// Letters, digits and function keys render upper-cased.
    #[must_use]
    pub fn display_name(self) -> &'static str {
        match self {
            Self::LeftArrow => "Left",
            Self::RightArrow => "Right",
            Self::UpArrow => "Up",
            Self::DownArrow => "Down",
            Self::Spacebar => "Space",
            Self::Enter => "Enter",
            Self::Backspace => "Backspace",
            Self::Minus => "Minus",
            Self::Plus => "Plus",
            Self::Tab => "Tab",
            Self::Escape => "Esc",
            Self::F1 => "F1",
            Self::F2 => "F2",
            Self::F3 => "F3",
            Self::F4 => "F4",
            Self::F5 => "F5",
            Self::F6 => "F6",
            Self::F7 => "F7",
            Self::F8 => "F8",
            Self::F9 => "F9",
            Self::F10 => "F10",
            Self::F11 => "F11",
            Self::F12 => "F12",
            Self::Digit0 => "0",
            Self::Digit1 => "1",
            Self::Digit2 => "2",
            Self::Digit3 => "3",
            Self::Digit4 => "4",
            Self::Digit5 => "5",
            Self::Digit6 => "6",
            Self::Digit7 => "7",
            Self::Digit8 => "8",
            Self::Digit9 => "9",
            Self::A => "A",
            Self::B => "B",
            Self::C => "C",
            Self::D => "D",
            Self::E => "E",
            Self::F => "F",
            Self::G => "G",
            Self::H => "H",
            Self::I => "I",
            Self::J => "J",
            Self::K => "K",
            Self::L => "L",
            Self::M => "M",
            Self::N => "N",
            Self::O => "O",
            Self::P => "P",
            Self::Q => "Q",
            Self::R => "R",
            Self::S => "S",
            Self::T => "T",
            Self::U => "U",
            Self::V => "V",
            Self::W => "W",
            Self::X => "X",
            Self::Y => "Y",
            Self::Z => "Z",
            Self::Comma => ",",
            Self::Dot => ".",
            Self::Semicolon => ";",
            Self::Assign => "=",
        }
    }
}

impl fmt::Display for CanonicalKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CanonicalKey {
    type Err = UnknownKeyError;

    /// Parses an exact canonical identifier. Use [`translate`] for platform names.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .iter()
            .copied()
            .find(|key| key.as_str() == s)
            .ok_or_else(|| UnknownKeyError(s.to_string()))
    }
}

impl Serialize for CanonicalKey {
    fn serialize<S: Serializer>(&self, s: S) -> Result<S::Ok, S::Error> {
        s.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for CanonicalKey {
    fn deserialize<D: Deserializer<'de>>(d: D) -> Result<Self, D::Error> {
        let name = String::deserialize(d)?;
        name.parse().map_err(serde::de::Error::custom)
    }
}

/// Platform names that are not already canonical identifiers.
///
/// Keys are lower-case; legacy names (`left`, `esc`, `spacebar`, ...) come
/// from older browser and toolkit key tables.
const ALIASES: &[(&str, CanonicalKey)] = &[
    ("arrowleft", CanonicalKey::LeftArrow),
    ("left", CanonicalKey::LeftArrow),
    ("leftarrow", CanonicalKey::LeftArrow),
    ("arrowright", CanonicalKey::RightArrow),
    ("right", CanonicalKey::RightArrow),
    ("rightarrow", CanonicalKey::RightArrow),
    ("arrowup", CanonicalKey::UpArrow),
    ("up", CanonicalKey::UpArrow),
    ("uparrow", CanonicalKey::UpArrow),
    ("arrowdown", CanonicalKey::DownArrow),
    ("down", CanonicalKey::DownArrow),
    ("downarrow", CanonicalKey::DownArrow),
    (" ", CanonicalKey::Spacebar),
    ("space", CanonicalKey::Spacebar),
    ("spacebar", CanonicalKey::Spacebar),
    ("enter", CanonicalKey::Enter),
    ("return", CanonicalKey::Enter),
    ("backspace", CanonicalKey::Backspace),
    ("subtract", CanonicalKey::Minus),
    ("minus", CanonicalKey::Minus),
    ("-", CanonicalKey::Minus),
    ("add", CanonicalKey::Plus),
    ("plus", CanonicalKey::Plus),
    ("+", CanonicalKey::Plus),
    ("tab", CanonicalKey::Tab),
    ("escape", CanonicalKey::Escape),
    ("esc", CanonicalKey::Escape),
    (",", CanonicalKey::Comma),
    ("comma", CanonicalKey::Comma),
    (".", CanonicalKey::Dot),
    ("dot", CanonicalKey::Dot),
    ("period", CanonicalKey::Dot),
    (";", CanonicalKey::Semicolon),
    ("semicolon", CanonicalKey::Semicolon),
    ("=", CanonicalKey::Assign),
    ("assign", CanonicalKey::Assign),
    ("equal", CanonicalKey::Assign),
];

/// Translates a raw platform key name into a [`CanonicalKey`].
///
/// Matching is case-insensitive. Returns `None` for names outside the fixed
/// table; unrecognized keys are not an error.
#[must_use]
pub fn translate(raw: &str) -> Option<CanonicalKey> {
    let name = raw.to_lowercase();
    if is_canonical_identifier(&name) {
        // `f13`..`f99` pass the shape check but are not in the closed set.
        return name.parse().ok();
    }
    ALIASES
        .iter()
        .find(|(alias, _)| *alias == name)
        .map(|(_, key)| *key)
}

/// A single letter, a single digit, or `f` followed by one or two digits.
fn is_canonical_identifier(name: &str) -> bool {
    match name.as_bytes() {
        [c] => c.is_ascii_lowercase() || c.is_ascii_digit(),
        [b'f', rest @ ..] => (1..=2).contains(&rest.len()) && rest.iter().all(u8::is_ascii_digit),
        _ => false,
    }
}
