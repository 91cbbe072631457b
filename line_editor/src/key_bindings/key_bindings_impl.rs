// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

use std::collections::BTreeMap;

use crate::{CompletionDirection, EditCommand, Key, KeyPress, ModifierKeysMask, SpecialKey};

/// Key of the binding table. `maybe_mask` is `None` for a key pressed on its own, and
/// an empty mask is stored as `None` so both spellings mean the same binding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct KeyBinding {
    pub key: Key,
    pub maybe_mask: Option<ModifierKeysMask>,
}

impl KeyBinding {
    #[must_use]
    pub fn new(key: Key, maybe_mask: Option<ModifierKeysMask>) -> Self {
        Self {
            key,
            maybe_mask: maybe_mask.filter(|mask| !mask.is_empty()),
        }
    }
}

impl From<KeyPress> for KeyBinding {
    fn from(key_press: KeyPress) -> Self { Self::new(key_press.key(), key_press.mask()) }
}

impl From<KeyBinding> for KeyPress {
    fn from(binding: KeyBinding) -> Self { KeyPress::new(binding.key, binding.maybe_mask) }
}

/// Table from key presses to [`EditCommand`]s.
///
/// Lookup is exact: `Ctrl+Left` only resolves a binding registered for `Ctrl+Left`, and
/// a plain `Left` never resolves a binding that requires modifiers. Printable
/// characters typed without `Ctrl` or `Alt` never reach this table, they are inserted
/// directly (see [`KeyPress::as_literal_char`]).
///
/// [`KeyBindings::new`] is empty. Use [`KeyBindings::with_default_bindings`] for the
/// standard table.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct KeyBindings {
    bindings: BTreeMap<KeyBinding, EditCommand>,
}

impl KeyBindings {
    #[must_use]
    pub fn new() -> Self { Self::default() }

    /// | Keys                          | Command                       |
    /// |-------------------------------|-------------------------------|
    /// | `Left` / `Right`              | move one grapheme             |
    /// | `Ctrl+Left` / `Ctrl+Right`    | previous / next word          |
    /// | `Home` / `End`                | start / end of line           |
    /// | `Up` / `Down`                 | previous / next line          |
    /// | `PageUp` / `PageDown`         | first / last line             |
    /// | `Ctrl+Up` / `Ctrl+Down`       | previous / next history entry |
    /// | `Backspace` / `Delete`        | delete before / at cursor     |
    /// | `Enter`                       | submit                        |
    /// | `Shift+Enter`                 | new line                      |
    /// | `Tab`                         | next completion               |
    /// | `Shift+Tab` / `BackTab`       | previous completion           |
    /// | `Esc`                         | cancel                        |
    #[must_use]
    pub fn with_default_bindings() -> Self {
        let ctrl = Some(ModifierKeysMask::new().with_ctrl());
        let shift = Some(ModifierKeysMask::new().with_shift());
        let special = Key::SpecialKey;

        let mut it = Self::new();
        it.bind(special(SpecialKey::Left), None, EditCommand::MoveLeft(1));
        it.bind(special(SpecialKey::Right), None, EditCommand::MoveRight(1));
        it.bind(special(SpecialKey::Left), ctrl, EditCommand::MovePreviousWord);
        it.bind(special(SpecialKey::Right), ctrl, EditCommand::MoveNextWord);
        it.bind(special(SpecialKey::Home), None, EditCommand::MoveHome);
        it.bind(special(SpecialKey::End), None, EditCommand::MoveEnd);
        it.bind(special(SpecialKey::Up), None, EditCommand::MoveUp);
        it.bind(special(SpecialKey::Down), None, EditCommand::MoveDown);
        it.bind(special(SpecialKey::PageUp), None, EditCommand::MoveFirst);
        it.bind(special(SpecialKey::PageDown), None, EditCommand::MoveLast);
        it.bind(special(SpecialKey::Up), ctrl, EditCommand::PreviousHistory);
        it.bind(special(SpecialKey::Down), ctrl, EditCommand::NextHistory);
        it.bind(special(SpecialKey::Backspace), None, EditCommand::Backspace);
        it.bind(special(SpecialKey::Delete), None, EditCommand::Delete);
        it.bind(special(SpecialKey::Enter), None, EditCommand::Submit);
        it.bind(special(SpecialKey::Enter), shift, EditCommand::NewLine);
        it.bind(
            special(SpecialKey::Tab),
            None,
            EditCommand::AutoComplete(CompletionDirection::Next),
        );
        it.bind(
            special(SpecialKey::Tab),
            shift,
            EditCommand::AutoComplete(CompletionDirection::Previous),
        );
        it.bind(
            special(SpecialKey::BackTab),
            None,
            EditCommand::AutoComplete(CompletionDirection::Previous),
        );
        it.bind(special(SpecialKey::Esc), None, EditCommand::Cancel);
        it
    }

    /// Registers `command` for the exact `(key, maybe_mask)` pair, returning the command
    /// it replaced.
    pub fn bind(
        &mut self,
        key: Key,
        maybe_mask: Option<ModifierKeysMask>,
        command: EditCommand,
    ) -> Option<EditCommand> {
        self.bindings.insert(KeyBinding::new(key, maybe_mask), command)
    }

    pub fn unbind(
        &mut self,
        key: Key,
        maybe_mask: Option<ModifierKeysMask>,
    ) -> Option<EditCommand> {
        self.bindings.remove(&KeyBinding::new(key, maybe_mask))
    }

    #[must_use]
    pub fn resolve(
        &self,
        key: Key,
        maybe_mask: Option<ModifierKeysMask>,
    ) -> Option<&EditCommand> {
        self.bindings.get(&KeyBinding::new(key, maybe_mask))
    }

    #[must_use]
    pub fn resolve_key_press(&self, key_press: &KeyPress) -> Option<&EditCommand> {
        self.bindings.get(&KeyBinding::from(*key_press))
    }

    /// First key press (in table order) bound to `command`.
    #[must_use]
    pub fn find_binding(&self, command: &EditCommand) -> Option<KeyPress> {
        self.bindings
            .iter()
            .find(|(_, it)| *it == command)
            .map(|(binding, _)| KeyPress::from(*binding))
    }

    pub fn clear(&mut self) { self.bindings.clear(); }

    #[must_use]
    pub fn len(&self) -> usize { self.bindings.len() }

    #[must_use]
    pub fn is_empty(&self) -> bool { self.bindings.is_empty() }

    pub fn iter(&self) -> impl Iterator<Item = (&KeyBinding, &EditCommand)> {
        self.bindings.iter()
    }
}

#[cfg(test)]
mod tests {
    use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

    use super::*;
    use crate::{assert_eq2, keypress};

    fn home() -> Key { Key::SpecialKey(SpecialKey::Home) }

    #[test]
    fn test_new_registry_is_empty() {
        let bindings = KeyBindings::new();
        assert_eq2!(bindings.len(), 0);
        assert!(bindings.is_empty());
    }

    #[test]
    fn test_bind_overwrites_exact_pair() {
        let mut bindings = KeyBindings::new();
        assert_eq2!(bindings.bind(home(), None, EditCommand::MoveHome), None);
        assert_eq2!(
            bindings.bind(home(), None, EditCommand::MoveEnd),
            Some(EditCommand::MoveHome)
        );
        assert_eq2!(bindings.len(), 1);
        assert_eq2!(bindings.resolve(home(), None), Some(&EditCommand::MoveEnd));
    }

    #[test]
    fn test_resolve_with_modifiers_matches_exact_mask() {
        let shift = ModifierKeysMask::new().with_shift();
        let mut bindings = KeyBindings::new();
        bindings.bind(home(), None, EditCommand::MoveHome);
        bindings.bind(home(), Some(shift), EditCommand::MoveEnd);

        assert_eq2!(bindings.resolve(home(), Some(shift)), Some(&EditCommand::MoveEnd));
        assert_eq2!(bindings.resolve(home(), None), Some(&EditCommand::MoveHome));
        assert_eq2!(bindings.resolve(home(), Some(shift.with_ctrl())), None);
    }

    #[test]
    fn test_plain_key_does_not_match_modified_binding() {
        let mut bindings = KeyBindings::new();
        bindings.bind(
            home(),
            Some(ModifierKeysMask::new().with_shift()),
            EditCommand::MoveEnd,
        );
        assert_eq2!(bindings.resolve(home(), None), None);
        assert_eq2!(bindings.resolve(home(), Some(ModifierKeysMask::new())), None);
    }

    #[test]
    fn test_unbind_and_clear() {
        let mut bindings = KeyBindings::with_default_bindings();
        assert_eq2!(
            bindings.unbind(Key::SpecialKey(SpecialKey::Esc), None),
            Some(EditCommand::Cancel)
        );
        assert_eq2!(bindings.resolve(Key::SpecialKey(SpecialKey::Esc), None), None);
        bindings.clear();
        assert!(bindings.is_empty());
    }

    #[test]
    fn test_default_bindings() {
        let bindings = KeyBindings::with_default_bindings();
        assert_eq2!(
            bindings.resolve_key_press(&keypress!(@special SpecialKey::Left)),
            Some(&EditCommand::MoveLeft(1))
        );
        assert_eq2!(
            bindings.resolve_key_press(
                &keypress!(@special ModifierKeysMask::new().with_ctrl(), SpecialKey::Left)
            ),
            Some(&EditCommand::MovePreviousWord)
        );
        assert_eq2!(
            bindings.find_binding(&EditCommand::Submit),
            Some(keypress!(@special SpecialKey::Enter))
        );
        assert_eq2!(
            bindings.find_binding(&EditCommand::NewLine),
            Some(keypress!(@special ModifierKeysMask::new().with_shift(), SpecialKey::Enter))
        );
    }

    #[test]
    fn test_shift_tab_from_terminal_completes_previous() {
        let bindings = KeyBindings::with_default_bindings();
        let event = KeyEvent::new(KeyCode::BackTab, KeyModifiers::SHIFT);
        let key_press = KeyPress::try_from(event).unwrap();
        assert_eq2!(
            bindings.resolve_key_press(&key_press),
            Some(&EditCommand::AutoComplete(CompletionDirection::Previous))
        );
    }
}
