// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

use crate::{LineBuffer, ScrollConfig};

/// The visible slice of a single line, in chars.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HorizontalWindow {
    pub skip: usize,
    pub take: usize,
    /// Cursor column relative to the start of the window.
    pub cursor: usize,
}

impl HorizontalWindow {
    /// Keeps the cursor centered in a line of `len` chars that is wider than `width`
    /// columns. Near the end of the line the window stops scrolling, so the last char
    /// stays at the right edge and the cursor moves right of center instead.
    #[must_use]
    pub fn new(len: usize, width: usize, position: usize) -> Self {
        let position = position.min(len);

        if len <= width {
            return Self {
                skip: 0,
                take: len,
                cursor: position,
            };
        }

        let middle = width / 2;
        let mut skip = position.saturating_sub(middle);
        let mut take = width.min(len - skip);
        let remaining = len - position;

        let cursor = if remaining < middle {
            let diff = middle - remaining;
            skip = skip.saturating_sub(diff);
            take += diff;
            middle + diff
        } else {
            position - skip
        };

        Self { skip, take, cursor }
    }

    /// The chars of `buffer` that fall inside this window.
    #[must_use]
    pub fn slice(&self, buffer: &LineBuffer) -> String {
        buffer.content().chars().skip(self.skip).take(self.take).collect()
    }
}

/// The visible rows of a document taller than the terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VerticalWindow {
    pub skip: usize,
    pub visible: usize,
    /// Row of the active line relative to the top of the window.
    pub cursor_row: usize,
}

impl VerticalWindow {
    /// Same centering rule as [`HorizontalWindow`], applied to lines instead of chars.
    /// When `height` is even the window can't be exactly centered, and the
    /// [`ScrollConfig::even_height_correction`] is applied at the bottom edge.
    #[must_use]
    pub fn new(line_count: usize, line_index: usize, height: usize, scroll: ScrollConfig) -> Self {
        let visible = line_count.min(height);
        let line_index = line_index.min(line_count.saturating_sub(1));

        if height == 0 {
            return Self {
                skip: line_index,
                visible: 0,
                cursor_row: 0,
            };
        }

        if line_count <= height {
            return Self {
                skip: 0,
                visible,
                cursor_row: line_index,
            };
        }

        let middle = height / 2;
        let offset = if height % 2 == 0 {
            scroll.even_height_correction
        } else {
            0
        };
        let last_index = line_count - 1;

        let mut skip = line_index.saturating_sub(middle);
        let remaining = last_index - line_index;
        if remaining < middle {
            let diff = middle - remaining;
            skip = (skip + offset).saturating_sub(diff);
        }
        // The active line must stay on screen whatever the correction.
        let skip = skip
            .max(line_index.saturating_sub(visible - 1))
            .min(line_count - visible);

        Self {
            skip,
            visible,
            cursor_row: line_index.saturating_sub(skip),
        }
    }
}
