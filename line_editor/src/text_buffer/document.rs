// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

use crate::{LINE_SEPARATOR, LineBuffer};

/// Read only view of a [`Document`] handed to prompt providers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PromptState {
    pub line_index: usize,
    pub line_count: usize,
    pub is_first_line: bool,
    pub is_last_line: bool,
}

/// The lines of one multi-line read, plus which one is active. There is always at
/// least one line; an empty document is a single empty [`LineBuffer`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Document {
    lines: Vec<LineBuffer>,
    active_index: usize,
}

impl Default for Document {
    fn default() -> Self {
        Self {
            lines: vec![LineBuffer::default()],
            active_index: 0,
        }
    }
}

impl From<LineBuffer> for Document {
    fn from(buffer: LineBuffer) -> Self {
        Self {
            lines: vec![buffer],
            active_index: 0,
        }
    }
}

impl Document {
    /// Splits `text` on line breaks (`\n` or `\r\n`), one [`LineBuffer`] per line. The
    /// first line is active.
    #[must_use]
    pub fn from_text(text: &str) -> Self {
        let lines = split_lines(text).map(LineBuffer::new).collect();
        Self {
            lines,
            active_index: 0,
        }
    }

    #[must_use]
    pub fn line_index(&self) -> usize { self.active_index }

    #[must_use]
    pub fn line_count(&self) -> usize { self.lines.len() }

    #[must_use]
    pub fn is_first_line(&self) -> bool { self.active_index == 0 }

    #[must_use]
    pub fn is_last_line(&self) -> bool { self.active_index == self.lines.len() - 1 }

    #[must_use]
    pub fn prompt_state(&self) -> PromptState {
        PromptState {
            line_index: self.active_index,
            line_count: self.line_count(),
            is_first_line: self.is_first_line(),
            is_last_line: self.is_last_line(),
        }
    }

    /// The active line.
    #[must_use]
    pub fn buffer(&self) -> &LineBuffer { &self.lines[self.active_index] }

    pub fn buffer_mut(&mut self) -> &mut LineBuffer { &mut self.lines[self.active_index] }

    #[must_use]
    pub fn get_buffer_at(&self, line_index: usize) -> Option<&LineBuffer> {
        self.lines.get(line_index)
    }

    pub fn lines(&self) -> impl Iterator<Item = &LineBuffer> { self.lines.iter() }

    /// Inserts a line after the active one and makes it active.
    pub fn add_line(&mut self, maybe_content: Option<&str>) {
        let buffer = maybe_content.map(LineBuffer::new).unwrap_or_default();
        self.active_index += 1;
        self.lines.insert(self.active_index, buffer);
    }

    /// Drops every line, leaving a single empty active line.
    pub fn remove_all_lines(&mut self) { *self = Self::default(); }

    /// Replaces every line at once. An empty `buffers` leaves a single empty line, and
    /// `active_index` is clamped to the last line.
    pub fn set_content(&mut self, buffers: Vec<LineBuffer>, active_index: usize) {
        if buffers.is_empty() {
            self.remove_all_lines();
            return;
        }
        self.active_index = active_index.min(buffers.len() - 1);
        self.lines = buffers;
    }

    pub fn move_up(&mut self) -> bool {
        if self.active_index > 0 {
            self.active_index -= 1;
            return true;
        }
        false
    }

    pub fn move_down(&mut self) -> bool {
        if self.active_index < self.lines.len() - 1 {
            self.active_index += 1;
            return true;
        }
        false
    }

    pub fn move_to_first(&mut self) -> bool {
        let moved = self.active_index != 0;
        self.active_index = 0;
        moved
    }

    pub fn move_to_last(&mut self) -> bool {
        let last = self.lines.len() - 1;
        let moved = self.active_index != last;
        self.active_index = last;
        moved
    }

    /// Every line is blank.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lines
            .iter()
            .all(|line| line.content().trim().is_empty())
    }

    /// All lines joined with [`LINE_SEPARATOR`].
    #[must_use]
    pub fn text(&self) -> String {
        self.lines
            .iter()
            .map(LineBuffer::content)
            .collect::<Vec<_>>()
            .join(LINE_SEPARATOR)
    }

    /// Per line text, the shape stored in [`crate::History`].
    #[must_use]
    pub fn snapshot(&self) -> Vec<String> {
        self.lines
            .iter()
            .map(|line| line.content().to_string())
            .collect()
    }
}

/// Splits on `\n`, dropping a `\r` that precedes it. Unlike [`str::lines`] a trailing
/// line break yields a trailing empty line, and `""` yields one empty line.
pub fn split_lines(text: &str) -> impl Iterator<Item = &str> {
    text.split('\n')
        .map(|line| line.strip_suffix('\r').unwrap_or(line))
}
