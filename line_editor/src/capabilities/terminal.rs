// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

use std::io::{self, IsTerminal, Stdout, Write};

use crossterm::{cursor,
                event::{KeyboardEnhancementFlags, PopKeyboardEnhancementFlags,
                        PushKeyboardEnhancementFlags},
                execute, queue, terminal};

use crate::ok;

/// Terminal dimensions in columns and rows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Size {
    pub col_width: u16,
    pub row_height: u16,
}

impl Size {
    #[must_use]
    pub fn new(col_width: u16, row_height: u16) -> Self {
        Self {
            col_width,
            row_height,
        }
    }
}

/// Driver for the physical terminal. The editor writes the ANSI sequences it composes
/// through [`Write`] and uses the other methods for everything else.
///
/// When [`Self::is_ansi_supported`] is `false` the editor writes plain text only: it
/// places the cursor with a carriage return and a rewrite of the text before it, and
/// never calls [`Self::show_cursor`] or [`Self::hide_cursor`].
pub trait Terminal: Write {
    /// # Errors
    ///
    /// Returns an error if the size can't be queried.
    fn size(&self) -> io::Result<Size>;

    fn is_ansi_supported(&self) -> bool;

    /// # Errors
    ///
    /// Returns an error if raw mode can't be toggled.
    fn enable_raw_mode(&mut self) -> io::Result<()>;

    /// # Errors
    ///
    /// Returns an error if raw mode can't be toggled.
    fn disable_raw_mode(&mut self) -> io::Result<()>;

    /// # Errors
    ///
    /// Returns an error if the terminal can't be written to.
    fn show_cursor(&mut self) -> io::Result<()>;

    /// # Errors
    ///
    /// Returns an error if the terminal can't be written to.
    fn hide_cursor(&mut self) -> io::Result<()>;
}

/// [`Terminal`] backed by `crossterm` on stdout.
///
/// Most unix terminals send the same byte for `Enter` and `Shift+Enter`, which would
/// leave the default new line binding unreachable. Terminals that support the [kitty
/// keyboard protocol](https://sw.kovidgoyal.net/kitty/keyboard-protocol/) get
/// [`KeyboardEnhancementFlags::DISAMBIGUATE_ESCAPE_CODES`] pushed while raw mode is on,
/// so the two keys can be told apart.
#[derive(Debug)]
pub struct CrosstermTerminal {
    stdout: Stdout,
    is_keyboard_enhanced: bool,
}

impl CrosstermTerminal {
    #[must_use]
    pub fn new() -> Self {
        Self {
            stdout: io::stdout(),
            is_keyboard_enhanced: false,
        }
    }
}

impl Default for CrosstermTerminal {
    fn default() -> Self { Self::new() }
}

impl Write for CrosstermTerminal {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> { self.stdout.write(buf) }

    fn flush(&mut self) -> io::Result<()> { self.stdout.flush() }
}

impl Terminal for CrosstermTerminal {
    fn size(&self) -> io::Result<Size> {
        let (col_width, row_height) = terminal::size()?;
        Ok(Size::new(col_width, row_height))
    }

    fn is_ansi_supported(&self) -> bool {
        if !self.stdout.is_terminal() {
            return false;
        }
        #[cfg(windows)]
        {
            crossterm::ansi_support::supports_ansi()
        }
        #[cfg(not(windows))]
        {
            !matches!(std::env::var("TERM").as_deref(), Ok("dumb"))
        }
    }

    fn enable_raw_mode(&mut self) -> io::Result<()> {
        terminal::enable_raw_mode()?;
        // The query fails on terminals that never answer it, same as unsupported.
        if !self.is_keyboard_enhanced
            && terminal::supports_keyboard_enhancement().unwrap_or(false)
        {
            push_keyboard_enhancement(&mut self.stdout)?;
            self.is_keyboard_enhanced = true;
        }
        ok!()
    }

    fn disable_raw_mode(&mut self) -> io::Result<()> {
        if self.is_keyboard_enhanced {
            self.is_keyboard_enhanced = false;
            pop_keyboard_enhancement(&mut self.stdout)?;
        }
        terminal::disable_raw_mode()
    }

    fn show_cursor(&mut self) -> io::Result<()> { execute!(self.stdout, cursor::Show) }

    fn hide_cursor(&mut self) -> io::Result<()> { execute!(self.stdout, cursor::Hide) }
}

fn push_keyboard_enhancement(writer: &mut impl Write) -> io::Result<()> {
    queue!(
        writer,
        PushKeyboardEnhancementFlags(KeyboardEnhancementFlags::DISAMBIGUATE_ESCAPE_CODES)
    )?;
    writer.flush()
}

fn pop_keyboard_enhancement(writer: &mut impl Write) -> io::Result<()> {
    queue!(writer, PopKeyboardEnhancementFlags)?;
    writer.flush()
}
