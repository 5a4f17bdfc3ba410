//! Modifier key flags carried by raw key events and required by key chords.

use winit::keyboard::ModifiersState;

/// Modifier key bitflags. Combines via bitwise OR.
///
/// Only Control, Shift and Alt participate in chord matching; Super/Meta is
/// not tracked.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Modifiers(u8);

impl Modifiers {
    /// No modifiers.
    pub const NONE: Self = Self(0);
    /// Shift key.
    pub const SHIFT: Self = Self(1 << 0);
    /// Control key.
    pub const CTRL: Self = Self(1 << 1);
    /// Alt key.
    pub const ALT: Self = Self(1 << 2);

    /// Builds modifiers from the three individual flags.
    #[must_use]
    pub const fn new(control: bool, shift: bool, alt: bool) -> Self {
        let mut bits = 0;
        if shift {
            bits |= Self::SHIFT.0;
        }
        if control {
            bits |= Self::CTRL.0;
        }
        if alt {
            bits |= Self::ALT.0;
        }
        Self(bits)
    }

    /// Returns true if `self` contains all bits in `other`.
    #[must_use]
    pub fn contains(self, other: Self) -> bool {
        self.0 & other.0 == other.0
    }

    /// Returns true if no modifier bits are set.
    #[must_use]
    pub fn is_empty(self) -> bool {
        self.0 == 0
    }

    #[must_use]
    pub fn control(self) -> bool {
        self.contains(Self::CTRL)
    }

    #[must_use]
    pub fn shift(self) -> bool {
        self.contains(Self::SHIFT)
    }

    #[must_use]
    pub fn alt(self) -> bool {
        self.contains(Self::ALT)
    }
}

impl std::ops::BitOr for Modifiers {
    type Output = Self;
    fn bitor(self, rhs: Self) -> Self {
        Self(self.0 | rhs.0)
    }
}

impl std::ops::BitOrAssign for Modifiers {
    fn bitor_assign(&mut self, rhs: Self) {
        self.0 |= rhs.0;
    }
}

impl std::ops::BitAnd for Modifiers {
    type Output = Self;
    fn bitand(self, rhs: Self) -> Self {
        Self(self.0 & rhs.0)
    }
}

impl From<ModifiersState> for Modifiers {
    fn from(state: ModifiersState) -> Self {
        Self::new(state.control_key(), state.shift_key(), state.alt_key())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_sets_individual_flags() {
        let m = Modifiers::new(true, false, true);
        assert!(m.control());
        assert!(!m.shift());
        assert!(m.alt());
        assert_eq!(m, Modifiers::CTRL | Modifiers::ALT);
    }

    #[test]
    fn test_empty_and_contains() {
        assert!(Modifiers::NONE.is_empty());
        let m = Modifiers::CTRL | Modifiers::SHIFT;
        assert!(m.contains(Modifiers::CTRL));
        assert!(!m.contains(Modifiers::ALT));
        assert_eq!(m & Modifiers::SHIFT, Modifiers::SHIFT);
    }

    #[test]
    fn test_from_winit_ignores_super() {
        let state = ModifiersState::SHIFT | ModifiersState::SUPER;
        assert_eq!(Modifiers::from(state), Modifiers::SHIFT);
    }
}
