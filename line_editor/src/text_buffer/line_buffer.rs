// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

use unicode_segmentation::UnicodeSegmentation;

/// A single logical line of text and its cursor.
///
/// | Field             | Meaning                                                    |
/// |-------------------|------------------------------------------------------------|
/// | `content`         | The text of the line                                       |
/// | `position`        | Cursor offset in chars (not bytes), `0..=len`              |
/// | `initial_content` | What [`Self::reset`] restores                              |
///
/// The cursor always sits on a grapheme cluster boundary. Moving it never lands inside a
/// cluster such as `e` followed by a combining accent, or an emoji with a skin tone
/// modifier.
///
/// Out of range arguments are never errors: [`Self::move_to`] clamps and
/// [`Self::clear`] reports `0` removed chars.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct LineBuffer {
    content: String,
    initial_content: String,
    position: usize,
}

impl LineBuffer {
    /// The cursor starts at the end of `content`.
    pub fn new(content: impl Into<String>) -> Self {
        let content = content.into();
        let position = content.chars().count();
        Self {
            initial_content: content.clone(),
            content,
            position,
        }
    }

    #[must_use]
    pub fn content(&self) -> &str { &self.content }

    #[must_use]
    pub fn initial_content(&self) -> &str { &self.initial_content }

    #[must_use]
    pub fn position(&self) -> usize { self.position }

    /// Length in chars.
    #[must_use]
    pub fn len(&self) -> usize { self.content.chars().count() }

    #[must_use]
    pub fn is_empty(&self) -> bool { self.content.is_empty() }

    #[must_use]
    pub fn is_at_end(&self) -> bool { self.position == self.len() }

    #[must_use]
    pub fn char_at(&self, index: usize) -> Option<char> { self.content.chars().nth(index) }

    /// Moves the cursor to `target`, clamped to `0..=len`, then snapped to a grapheme
    /// boundary in the direction of travel. Returns whether the cursor moved.
    pub fn move_to(&mut self, target: usize) -> bool {
        let target = target.min(self.len());
        if target == self.position {
            return false;
        }

        let is_moving_left = target < self.position;
        let boundaries = self.grapheme_boundaries();
        let snapped = if is_moving_left {
            boundaries
                .iter()
                .rev()
                .find(|&&boundary| boundary <= target)
                .copied()
                .unwrap_or(0)
        } else {
            boundaries
                .iter()
                .find(|&&boundary| boundary >= target)
                .copied()
                .unwrap_or_else(|| self.len())
        };

        let has_moved = snapped != self.position;
        self.position = snapped;
        has_moved
    }

    /// Splices `text` in at the cursor. The cursor itself does not move.
    pub fn insert(&mut self, text: &str) {
        let byte_index = self.byte_index(self.position);
        self.content.insert_str(byte_index, text);
    }

    pub fn insert_char(&mut self, character: char) {
        let byte_index = self.byte_index(self.position);
        self.content.insert(byte_index, character);
    }

    /// Removes up to `count` chars starting at `index`. Returns how many were removed,
    /// which is `0` when `index` is past the last char.
    pub fn clear(&mut self, index: usize, count: usize) -> usize {
        let len = self.len();
        if index >= len {
            return 0;
        }

        let count = count.min(len - index);
        let start = self.byte_index(index);
        let end = self.byte_index(index + count);
        self.content.replace_range(start..end, "");

        // Keep the cursor in bounds when the tail of the line was removed.
        self.position = self.position.min(self.len());
        count
    }

    /// Restores the initial content and places the cursor at its end.
    pub fn reset(&mut self) {
        self.content.clone_from(&self.initial_content);
        self.position = self.len();
    }

    /// Cursor sits on a char that is not whitespace.
    #[must_use]
    pub fn is_at_character(&self) -> bool {
        self.char_at(self.position)
            .is_some_and(|character| !character.is_whitespace())
    }

    #[must_use]
    pub fn is_at_beginning_of_word(&self) -> bool {
        match self.position {
            0 => self.char_at(0).is_some_and(|it| !it.is_whitespace()),
            position => self
                .char_at(position - 1)
                .is_some_and(char::is_whitespace),
        }
    }

    #[must_use]
    pub fn is_at_end_of_word(&self) -> bool {
        match self.position {
            0 => false,
            position => self
                .char_at(position - 1)
                .is_some_and(|it| !it.is_whitespace()),
        }
    }

    /// Char offsets of every grapheme cluster boundary, including `0` and `len`.
    #[must_use]
    pub fn grapheme_boundaries(&self) -> Vec<usize> {
        let mut acc = Vec::with_capacity(self.content.len() + 1);
        let mut char_offset = 0;
        for grapheme in self.content.graphemes(true) {
            acc.push(char_offset);
            char_offset += grapheme.chars().count();
        }
        acc.push(char_offset);
        acc
    }

    fn byte_index(&self, char_index: usize) -> usize {
        self.content
            .char_indices()
            .nth(char_index)
            .map_or(self.content.len(), |(byte_index, _)| byte_index)
    }
}
