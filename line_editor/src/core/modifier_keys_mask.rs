// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

use crossterm::event::KeyModifiers;
use serde::{Deserialize, Serialize};

/// The set of modifier keys held down for a [`crate::KeyPress`]. Two masks are equal
/// only when every modifier matches, which is the rule the key binding registry uses.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct ModifierKeysMask {
    pub shift_key_state: KeyState,
    pub ctrl_key_state: KeyState,
    pub alt_key_state: KeyState,
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub enum KeyState {
    Pressed,
    #[default]
    NotPressed,
}

impl ModifierKeysMask {
    #[must_use]
    pub fn new() -> Self {
        ModifierKeysMask {
            shift_key_state: KeyState::NotPressed,
            ctrl_key_state: KeyState::NotPressed,
            alt_key_state: KeyState::NotPressed,
        }
    }

    #[must_use]
    pub fn with_shift(mut self) -> Self {
        self.shift_key_state = KeyState::Pressed;
        self
    }

    #[must_use]
    pub fn with_ctrl(mut self) -> Self {
        self.ctrl_key_state = KeyState::Pressed;
        self
    }

    #[must_use]
    pub fn with_alt(mut self) -> Self {
        self.alt_key_state = KeyState::Pressed;
        self
    }

    #[must_use]
    pub fn is_empty(&self) -> bool { *self == Self::new() }
}

/// Returns `None` when no modifier is held, so that a plain key never carries an empty
/// mask.
#[must_use]
pub fn convert_key_modifiers(modifiers: &KeyModifiers) -> Option<ModifierKeysMask> {
    if modifiers.is_empty() {
        None
    } else {
        Some(ModifierKeysMask::from(*modifiers))
    }
}

impl From<KeyModifiers> for ModifierKeysMask {
    /// Difference in meaning between `intersects` and `contains`:
    /// - `intersects` -> means that the given bit shows up in your variable, but it might
    ///   contain other bits.
    /// - `contains` -> means that your variable ONLY contains these bits.
    fn from(other: KeyModifiers) -> ModifierKeysMask {
        let mut it = ModifierKeysMask::new();
        if other.intersects(KeyModifiers::SHIFT) {
            it.shift_key_state = KeyState::Pressed;
        }
        if other.intersects(KeyModifiers::CONTROL) {
            it.ctrl_key_state = KeyState::Pressed;
        }
        if other.intersects(KeyModifiers::ALT) {
            it.alt_key_state = KeyState::Pressed;
        }
        it
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assert_eq2;

    #[test]
    fn test_empty_mask() {
        let mask = ModifierKeysMask::new();
        assert!(mask.is_empty());
        assert_eq2!(convert_key_modifiers(&KeyModifiers::NONE), None);
    }

    #[test]
    fn test_ctrl_shift_mask() {
        let mask = ModifierKeysMask::from(KeyModifiers::CONTROL | KeyModifiers::SHIFT);
        assert_eq2!(mask, ModifierKeysMask::new().with_ctrl().with_shift());
        assert_eq2!(mask.alt_key_state, KeyState::NotPressed);
        assert!(!mask.is_empty());
    }

    #[test]
    fn test_masks_compare_exactly() {
        let shift = ModifierKeysMask::new().with_shift();
        let shift_ctrl = shift.with_ctrl();
        assert_ne!(shift, shift_ctrl);
    }
}
