// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Keyboard input.

use understory_focus::Navigation;

use crate::Orientation;

/// A key press, already decoded by the host.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Key {
    /// Arrow up.
    ArrowUp,
    /// Arrow down.
    ArrowDown,
    /// Arrow left.
    ArrowLeft,
    /// Arrow right.
    ArrowRight,
    /// Home.
    Home,
    /// End.
    End,
    /// Enter.
    Enter,
    /// Space bar.
    Space,
    /// Escape.
    Escape,
    /// A printable character.
    Character(char),
}

impl Key {
    /// The navigation this key means along `orientation`, if any.
    #[must_use]
    pub fn navigation(self, orientation: Orientation) -> Option<Navigation> {
        match (self, orientation) {
            (Self::ArrowDown, Orientation::Vertical)
            | (Self::ArrowRight, Orientation::Horizontal) => Some(Navigation::Next),
            (Self::ArrowUp, Orientation::Vertical)
            | (Self::ArrowLeft, Orientation::Horizontal) => Some(Navigation::Prev),
            (Self::Home, _) => Some(Navigation::First),
            (Self::End, _) => Some(Navigation::Last),
            _ => None,
        }
    }
}

bitflags::bitflags! {
    /// Modifier keys held during a key press.
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
    pub struct Modifiers: u8 {
        /// Shift.
        const SHIFT = 0b0000_0001;
        /// Control.
        const CTRL  = 0b0000_0010;
        /// Alt / Option.
        const ALT   = 0b0000_0100;
        /// Meta / Command.
        const META  = 0b0000_1000;
    }
}

/// What the list did with a key press.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum KeyOutcome {
    /// The key is not the list's business; let it propagate.
    Ignored,
    /// The list consumed the key.
    Handled,
    /// The host should close the list (Escape, or activation in a menu).
    Dismiss,
}

impl KeyOutcome {
    /// Returns `true` unless the key was ignored.
    #[must_use]
    pub fn is_consumed(self) -> bool {
        self != Self::Ignored
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn arrows_follow_orientation() {
        assert_eq!(
            Key::ArrowDown.navigation(Orientation::Vertical),
            Some(Navigation::Next)
        );
        assert_eq!(Key::ArrowDown.navigation(Orientation::Horizontal), None);
        assert_eq!(
            Key::ArrowLeft.navigation(Orientation::Horizontal),
            Some(Navigation::Prev)
        );
        assert_eq!(
            Key::End.navigation(Orientation::Horizontal),
            Some(Navigation::Last)
        );
    }
}
