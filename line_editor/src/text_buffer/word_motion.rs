// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

use crate::LineBuffer;

/// Cursor motion built on top of [`LineBuffer::move_to`] and the whitespace
/// classification predicates. Every method returns whether the cursor moved.
///
/// Word boundaries are whitespace only, so `git-commit` is a single word.
pub trait LineBufferExt {
    /// Steps `count` grapheme clusters to the left.
    fn move_left(&mut self, count: usize) -> bool;
    /// Steps `count` grapheme clusters to the right.
    fn move_right(&mut self, count: usize) -> bool;
    fn move_home(&mut self) -> bool;
    fn move_end(&mut self) -> bool;
    fn move_to_previous_word(&mut self) -> bool;
    fn move_to_next_word(&mut self) -> bool;
    fn move_to_beginning_of_word(&mut self) -> bool;
    fn move_to_end_of_word(&mut self) -> bool;
}

impl LineBufferExt for LineBuffer {
    fn move_left(&mut self, count: usize) -> bool {
        let start = self.position();
        for _ in 0..count {
            if !self.move_to(self.position().saturating_sub(1)) {
                break;
            }
        }
        start != self.position()
    }

    fn move_right(&mut self, count: usize) -> bool {
        let start = self.position();
        for _ in 0..count {
            if !self.move_to(self.position() + 1) {
                break;
            }
        }
        start != self.position()
    }

    fn move_home(&mut self) -> bool { self.move_to(0) }

    fn move_end(&mut self) -> bool { self.move_to(self.len()) }

    /// Inside a word: leave it to the left, skip whitespace, then snap to the start of
    /// the word found there. Between words: skip whitespace, then snap.
    fn move_to_previous_word(&mut self) -> bool {
        let start = self.position();

        if self.is_at_character() && self.is_at_beginning_of_word() {
            self.move_left(1);
        }
        while self.position() > 0 && !self.is_at_character() {
            self.move_left(1);
        }
        self.move_to_beginning_of_word();

        start != self.position()
    }

    /// Lands on the start of the next word, or at the end of the line if there is none.
    fn move_to_next_word(&mut self) -> bool {
        let start = self.position();

        if self.is_at_character() {
            self.move_to_end_of_word();
        }
        while !self.is_at_end() && !self.is_at_character() {
            self.move_right(1);
        }

        start != self.position()
    }

    fn move_to_beginning_of_word(&mut self) -> bool {
        if self.position() == 0 || !self.is_at_character() {
            return false;
        }

        let start = self.position();
        while self.position() > 0
            && self
                .char_at(self.position() - 1)
                .is_some_and(|it| !it.is_whitespace())
        {
            if !self.move_left(1) {
                break;
            }
        }
        start != self.position()
    }

    fn move_to_end_of_word(&mut self) -> bool {
        if self.is_at_end() || !self.is_at_character() {
            return false;
        }

        let start = self.position();
        while self.is_at_character() {
            if !self.move_right(1) {
                break;
            }
        }
        start != self.position()
    }
}
