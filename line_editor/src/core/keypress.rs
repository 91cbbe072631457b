// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use serde::{Deserialize, Serialize};

use crate::{KeyState, ModifierKeysMask, convert_key_modifiers, keypress};

/// This is equivalent to [`crossterm::event::KeyEvent`] except that it is cleaned up
/// semantically and impossible states are removed. Key bindings and the read loop only
/// ever see [`KeyPress`]. See [`convert_key_event`] for the conversion rules.
///
/// Please use the [`keypress!`] macro instead of directly constructing this enum.
#[derive(Clone, Debug, Eq, PartialEq, Hash, PartialOrd, Ord, Serialize, Deserialize, Copy)]
pub enum KeyPress {
    Plain { key: Key },
    WithModifiers { key: Key, mask: ModifierKeysMask },
}

#[derive(Clone, Debug, Eq, PartialEq, Hash, PartialOrd, Ord, Serialize, Deserialize, Copy)]
pub enum Key {
    /// [char] that can be printed to the console.
    Character(char),
    SpecialKey(SpecialKey),
    FunctionKey(FunctionKey),
}

#[derive(Clone, Debug, Eq, PartialEq, Hash, PartialOrd, Ord, Serialize, Deserialize, Copy)]
pub enum FunctionKey {
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
}

#[derive(Clone, Debug, Eq, PartialEq, Hash, PartialOrd, Ord, Serialize, Deserialize, Copy)]
pub enum SpecialKey {
    Backspace,
    Enter,
    Left,
    Right,
    Up,
    Down,
    Home,
    End,
    PageUp,
    PageDown,
    Tab,
    BackTab, /* Shift + Tab */
    Delete,
    Insert,
    Esc,
}

impl KeyPress {
    #[must_use]
    pub fn new(key: Key, maybe_mask: Option<ModifierKeysMask>) -> Self {
        match maybe_mask {
            Some(mask) if !mask.is_empty() => Self::WithModifiers { key, mask },
            _ => Self::Plain { key },
        }
    }

    #[must_use]
    pub fn key(&self) -> Key {
        match self {
            KeyPress::Plain { key } | KeyPress::WithModifiers { key, .. } => *key,
        }
    }

    /// `None` for a plain key press, the (non empty) mask otherwise.
    #[must_use]
    pub fn mask(&self) -> Option<ModifierKeysMask> {
        match self {
            KeyPress::Plain { .. } => None,
            KeyPress::WithModifiers { mask, .. } => Some(*mask),
        }
    }

    /// Returns the character to insert if this key press is literal text input: a
    /// printable character pressed without `Ctrl` or `Alt`. These key presses never go
    /// through the key binding registry.
    #[must_use]
    pub fn as_literal_char(&self) -> Option<char> {
        let Key::Character(character) = self.key() else {
            return None;
        };
        if character.is_control() {
            return None;
        }
        match self.mask() {
            None => Some(character),
            Some(mask)
                if mask.ctrl_key_state == KeyState::NotPressed
                    && mask.alt_key_state == KeyState::NotPressed =>
            {
                Some(character)
            }
            Some(_) => None,
        }
    }
}

/// Typecast / convert [`KeyEvent`] to [`KeyPress`].
///
/// Only [`KeyEventKind::Press`] events are converted. Character keys ignore the `SHIFT`
/// modifier, since typing `X` shows up in crossterm as `Shift + X`:
///
/// | User action    | Result                                   |
/// |----------------|------------------------------------------|
/// | Type `x`       | `keypress!(@char 'x')`                   |
/// | Type `X`       | `keypress!(@char 'X')`, `SHIFT` ignored  |
/// | Type `Ctrl+x`  | `keypress!(@char ctrl_mask, 'x')`        |
pub mod convert_key_event {
    #[allow(clippy::wildcard_imports)]
    use super::*;

    impl TryFrom<KeyEvent> for KeyPress {
        type Error = ();

        fn try_from(key_event: KeyEvent) -> Result<Self, Self::Error> {
            if key_event.kind != KeyEventKind::Press {
                return Err(());
            }

            match key_event {
                // If character keys, then ignore SHIFT or NONE modifiers.
                KeyEvent {
                    code: KeyCode::Char(character),
                    modifiers: KeyModifiers::NONE | KeyModifiers::SHIFT,
                    ..
                } => Ok(keypress!(@char character)),
                // Shift+Tab arrives as BackTab with SHIFT set, on unix and on Windows.
                // The shift is implied by the key itself.
                KeyEvent {
                    code: KeyCode::BackTab,
                    modifiers: KeyModifiers::NONE | KeyModifiers::SHIFT,
                    ..
                } => Ok(keypress!(@special SpecialKey::BackTab)),
                // Non character keys.
                _ => {
                    let key = copy_code_from_key_event(&key_event).ok_or(())?;
                    Ok(KeyPress::new(key, convert_key_modifiers(&key_event.modifiers)))
                }
            }
        }
    }

    fn match_fn_key(fn_key: u8) -> Option<Key> {
        let it = match fn_key {
            1 => FunctionKey::F1,
            2 => FunctionKey::F2,
            3 => FunctionKey::F3,
            4 => FunctionKey::F4,
            5 => FunctionKey::F5,
            6 => FunctionKey::F6,
            7 => FunctionKey::F7,
            8 => FunctionKey::F8,
            9 => FunctionKey::F9,
            10 => FunctionKey::F10,
            11 => FunctionKey::F11,
            12 => FunctionKey::F12,
            _ => return None,
        };
        Some(Key::FunctionKey(it))
    }

    #[must_use]
    pub fn copy_code_from_key_event(key_event: &KeyEvent) -> Option<Key> {
        // Make the code easier to read below using this alias.
        type KC = KeyCode;
        let special = match key_event.code {
            KC::Char(character) => return Some(Key::Character(character)),
            KC::F(fn_key) => return match_fn_key(fn_key),
            KC::Backspace => SpecialKey::Backspace,
            KC::Enter => SpecialKey::Enter,
            KC::Left => SpecialKey::Left,
            KC::Right => SpecialKey::Right,
            KC::Up => SpecialKey::Up,
            KC::Down => SpecialKey::Down,
            KC::Home => SpecialKey::Home,
            KC::End => SpecialKey::End,
            KC::PageUp => SpecialKey::PageUp,
            KC::PageDown => SpecialKey::PageDown,
            KC::Tab => SpecialKey::Tab,
            KC::BackTab => SpecialKey::BackTab,
            KC::Delete => SpecialKey::Delete,
            KC::Insert => SpecialKey::Insert,
            KC::Esc => SpecialKey::Esc,
            // Media, modifier and lock keys are not used by the editor.
            _ => return None,
        };
        Some(Key::SpecialKey(special))
    }
}
