// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

use std::io::{self, Write};

use crossterm::{cursor::{MoveDown, MoveUp},
                queue,
                terminal::{DisableLineWrap, EnableLineWrap}};
use unicode_width::UnicodeWidthStr;

use crate::{AnsiBuilder, DefaultPrompt, Document, Highlighter, HorizontalWindow,
            LineEditorError, LineEditorPrompt, ScrollConfig, Terminal, strip_ansi};

#[derive(Debug, Clone, Copy, PartialEq, Eq, strum_macros::Display)]
pub enum RenderMode {
    /// Escape sequences, with horizontal and vertical scrolling.
    Ansi,
    /// Plain text and column moves. Only the active line is drawn.
    Fallback,
}

/// Draws a [`Document`] with the prompt and (optional) highlighter it owns.
///
/// In [`RenderMode::Ansi`] every operation composes one frame with [`AnsiBuilder`] and
/// writes it in a single call. In [`RenderMode::Fallback`] only
/// [`Self::render_line`] does anything, the multi-line operations are no-ops.
pub struct ViewportRenderer {
    prompt: Box<dyn LineEditorPrompt>,
    maybe_highlighter: Option<Box<dyn Highlighter>>,
    scroll: ScrollConfig,
    mode: RenderMode,
}

impl std::fmt::Debug for ViewportRenderer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ViewportRenderer")
            .field("has_highlighter", &self.maybe_highlighter.is_some())
            .field("scroll", &self.scroll)
            .field("mode", &self.mode)
            .finish_non_exhaustive()
    }
}

impl Default for ViewportRenderer {
    fn default() -> Self { Self::new(Box::new(DefaultPrompt::default())) }
}

impl ViewportRenderer {
    #[must_use]
    pub fn new(prompt: Box<dyn LineEditorPrompt>) -> Self {
        Self {
            prompt,
            maybe_highlighter: None,
            scroll: ScrollConfig::default(),
            mode: RenderMode::Ansi,
        }
    }

    pub fn set_prompt(&mut self, prompt: Box<dyn LineEditorPrompt>) { self.prompt = prompt; }

    pub fn set_highlighter(&mut self, maybe_highlighter: Option<Box<dyn Highlighter>>) {
        self.maybe_highlighter = maybe_highlighter;
    }

    pub fn set_scroll(&mut self, scroll: ScrollConfig) { self.scroll = scroll; }

    #[must_use]
    pub fn mode(&self) -> RenderMode { self.mode }

    /// Switches to [`RenderMode::Ansi`].
    ///
    /// # Errors
    ///
    /// Returns [`LineEditorError::AnsiNotSupported`] (and leaves the mode alone) if the
    /// terminal can't handle escape sequences.
    pub fn try_enable_ansi(&mut self, terminal: &impl Terminal) -> Result<(), LineEditorError> {
        if !terminal.is_ansi_supported() {
            return Err(LineEditorError::AnsiNotSupported);
        }
        self.mode = RenderMode::Ansi;
        Ok(())
    }

    pub fn use_fallback(&mut self) { self.mode = RenderMode::Fallback; }

    /// Redraws the whole document.
    pub fn refresh(&self, terminal: &mut impl Terminal, document: &Document) -> io::Result<()> {
        match self.mode {
            RenderMode::Ansi => {
                self.write_frame(terminal, |builder, out| builder.build_refresh(out, document))
            }
            RenderMode::Fallback => self.render_line(terminal, document, None),
        }
    }

    /// Redraws the active line only. `maybe_cursor` overrides where the cursor is drawn
    /// without moving the buffer's own cursor.
    pub fn render_line(
        &self,
        terminal: &mut impl Terminal,
        document: &Document,
        maybe_cursor: Option<usize>,
    ) -> io::Result<()> {
        let cursor = maybe_cursor.unwrap_or_else(|| document.buffer().position());
        match self.mode {
            RenderMode::Ansi => self.write_frame(terminal, |builder, out| {
                queue!(out, DisableLineWrap)?;
                builder.build_line(out, document, document.line_index(), cursor)?;
                queue!(out, EnableLineWrap)
            }),
            RenderMode::Fallback => self.render_line_fallback(terminal, document, cursor),
        }
    }

    /// Blanks every line and moves to the start of the first one.
    pub fn clear(&self, terminal: &mut impl Terminal, document: &Document) -> io::Result<()> {
        match self.mode {
            RenderMode::Ansi => {
                self.write_frame(terminal, |builder, out| builder.build_clear(out, document))
            }
            RenderMode::Fallback => Ok(()),
        }
    }

    /// Makes room for another line below the cursor.
    pub fn move_down(&self, terminal: &mut impl Terminal, document: &Document) -> io::Result<()> {
        match self.mode {
            RenderMode::Ansi => {
                self.write_frame(terminal, |builder, out| builder.build_move_down(out, document))
            }
            RenderMode::Fallback => Ok(()),
        }
    }

    pub fn cursor_up(&self, terminal: &mut impl Terminal) -> io::Result<()> {
        match self.mode {
            RenderMode::Ansi => {
                queue!(terminal, MoveUp(1))?;
                terminal.flush()
            }
            RenderMode::Fallback => Ok(()),
        }
    }

    pub fn cursor_down(&self, terminal: &mut impl Terminal) -> io::Result<()> {
        match self.mode {
            RenderMode::Ansi => {
                queue!(terminal, MoveDown(1))?;
                terminal.flush()
            }
            RenderMode::Fallback => Ok(()),
        }
    }

    /// Does nothing in [`RenderMode::Fallback`].
    pub fn hide_cursor(&self, terminal: &mut impl Terminal) -> io::Result<()> {
        match self.mode {
            RenderMode::Ansi => terminal.hide_cursor(),
            RenderMode::Fallback => Ok(()),
        }
    }

    /// Does nothing in [`RenderMode::Fallback`].
    pub fn show_cursor(&self, terminal: &mut impl Terminal) -> io::Result<()> {
        match self.mode {
            RenderMode::Ansi => terminal.show_cursor(),
            RenderMode::Fallback => Ok(()),
        }
    }

    fn write_frame(
        &self,
        terminal: &mut impl Terminal,
        f: impl FnOnce(&AnsiBuilder<'_>, &mut Vec<u8>) -> io::Result<()>,
    ) -> io::Result<()> {
        let builder = AnsiBuilder {
            prompt: self.prompt.as_ref(),
            maybe_highlighter: self.maybe_highlighter.as_deref(),
            size: terminal.size()?,
            scroll: self.scroll,
        };
        let mut out = vec![];
        f(&builder, &mut out)?;
        terminal.write_all(&out)?;
        terminal.flush()
    }

    /// Plain text only. The cursor is placed by returning to the start of the line and
    /// writing the text before it again.
    fn render_line_fallback(
        &self,
        terminal: &mut impl Terminal,
        document: &Document,
        cursor: usize,
    ) -> io::Result<()> {
        let line_index = document.line_index();
        let (prompt, margin) = self.prompt.get_prompt(&document.prompt_state(), line_index);
        let prompt = strip_ansi(&prompt);
        let prefix = format!("{prompt}{}", " ".repeat(margin));
        let term_width = usize::from(terminal.size()?.col_width);

        // Stay clear of the last column so the blanking doesn't wrap.
        write!(terminal, "\r{}\r", " ".repeat(term_width.saturating_sub(1)))?;

        let width = term_width.saturating_sub(prefix.width() + 1);
        let buffer = document.buffer();
        let window = HorizontalWindow::new(buffer.len(), width, cursor);
        let visible = window.slice(buffer);
        let before_cursor: String = visible.chars().take(window.cursor).collect();
        write!(terminal, "{prefix}{visible}\r{prefix}{before_cursor}")?;

        terminal.flush()
    }
}
