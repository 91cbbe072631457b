// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

use std::io::{self, Write};

use crossterm::{cursor::{MoveDown, MoveTo, MoveToColumn, MoveToNextLine, MoveUp},
                queue,
                terminal::{Clear, ClearType}};

use crate::{Document, Highlighter, HorizontalWindow, LineEditorPrompt, ScrollConfig, Size,
            VerticalWindow, highlight, visible_width};

/// Composes the escape sequences for one frame into a byte buffer. Nothing is written to
/// the terminal here; [`crate::ViewportRenderer`] flushes the buffer in one go.
pub struct AnsiBuilder<'a> {
    pub prompt: &'a dyn LineEditorPrompt,
    pub maybe_highlighter: Option<&'a dyn Highlighter>,
    pub size: Size,
    pub scroll: ScrollConfig,
}

impl std::fmt::Debug for AnsiBuilder<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AnsiBuilder")
            .field("size", &self.size)
            .field("scroll", &self.scroll)
            .finish_non_exhaustive()
    }
}

impl AnsiBuilder<'_> {
    /// Draws the line at `line_index` over the current terminal row, and leaves the
    /// terminal cursor at `cursor`. Returns the cursor column inside the visible window.
    pub fn build_line(
        &self,
        out: &mut Vec<u8>,
        document: &Document,
        line_index: usize,
        cursor: usize,
    ) -> io::Result<usize> {
        let Some(buffer) = document.get_buffer_at(line_index) else {
            return Ok(0);
        };

        queue!(out, Clear(ClearType::CurrentLine), MoveToColumn(0))?;

        let (prompt, margin) = self.prompt.get_prompt(&document.prompt_state(), line_index);
        let prompt_width = visible_width(&prompt);
        write!(out, "{prompt}{}", " ".repeat(margin))?;

        let width = usize::from(self.size.col_width).saturating_sub(prompt_width + margin + 1);
        let window = HorizontalWindow::new(buffer.len(), width, cursor);
        let content = window.slice(buffer);
        let padding = width.saturating_sub(content.chars().count());
        write!(
            out,
            "{}{}",
            highlight(&content, self.maybe_highlighter),
            " ".repeat(padding)
        )?;

        queue!(out, MoveToColumn(to_u16(window.cursor + prompt_width + margin)))?;

        Ok(window.cursor)
    }

    /// Blanks every line of the document and parks the cursor at the start of the first
    /// one.
    pub fn build_clear(&self, out: &mut Vec<u8>, document: &Document) -> io::Result<()> {
        let line_index = document.line_index();
        if line_index > 0 {
            queue!(out, MoveUp(to_u16(line_index)))?;
        }

        let line_count = document.line_count();
        for it in 0..line_count {
            queue!(out, Clear(ClearType::CurrentLine))?;
            if it != line_count - 1 {
                queue!(out, MoveDown(1))?;
            }
        }

        let last_index = line_count.saturating_sub(1);
        if last_index > 0 {
            queue!(out, MoveUp(to_u16(last_index)))?;
        }

        queue!(out, MoveToColumn(0))?;
        Ok(())
    }

    /// Redraws the whole document. Documents taller than the terminal are drawn from
    /// the top of the screen through a [`VerticalWindow`].
    pub fn build_refresh(&self, out: &mut Vec<u8>, document: &Document) -> io::Result<()> {
        if document.line_count() > usize::from(self.size.row_height) {
            self.build_full_display_refresh(out, document)
        } else {
            self.build_partial_display_refresh(out, document)
        }
    }

    /// Makes room for one more line below the cursor.
    pub fn build_move_down(&self, out: &mut Vec<u8>, document: &Document) -> io::Result<()> {
        if document.line_count() > usize::from(self.size.row_height) {
            queue!(out, MoveDown(1))
        } else {
            out.write_all(b"\n")
        }
    }

    fn build_full_display_refresh(
        &self,
        out: &mut Vec<u8>,
        document: &Document,
    ) -> io::Result<()> {
        queue!(out, MoveTo(0, 0))?;

        let window = VerticalWindow::new(
            document.line_count(),
            document.line_index(),
            usize::from(self.size.row_height),
            self.scroll,
        );

        for line_index in window.skip..window.skip + window.visible {
            queue!(out, MoveToColumn(0))?;
            self.build_line(out, document, line_index, 0)?;
            queue!(out, MoveToNextLine(1))?;
        }

        queue!(out, MoveTo(0, to_u16(window.cursor_row)))?;
        self.build_line(
            out,
            document,
            document.line_index(),
            document.buffer().position(),
        )?;
        Ok(())
    }

    fn build_partial_display_refresh(
        &self,
        out: &mut Vec<u8>,
        document: &Document,
    ) -> io::Result<()> {
        let line_index = document.line_index();
        if line_index > 0 {
            queue!(out, MoveUp(to_u16(line_index)))?;
        }

        for it in 0..document.line_count() {
            queue!(out, MoveToColumn(0))?;
            self.build_line(out, document, it, 0)?;
            out.write_all(b"\n")?;
        }

        let move_up = document.line_count() - line_index;
        queue!(out, MoveUp(to_u16(move_up)))?;

        self.build_line(out, document, line_index, document.buffer().position())?;
        Ok(())
    }
}

pub(crate) fn to_u16(value: usize) -> u16 { u16::try_from(value).unwrap_or(u16::MAX) }
