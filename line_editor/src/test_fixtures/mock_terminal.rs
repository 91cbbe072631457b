// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

use std::io::{self, Write};

use super::StdoutMock;
use crate::{Size, Terminal};

/// In-memory [`Terminal`]. Everything written (including the escapes emitted for
/// cursor visibility and column moves) lands in the shared [`StdoutMock`].
#[derive(Debug, Clone)]
pub struct MockTerminal {
    pub stdout: StdoutMock,
    pub size: Size,
    pub is_ansi_supported: bool,
    pub is_raw_mode: bool,
}

impl MockTerminal {
    pub fn new(size: Size) -> Self {
        Self {
            stdout: StdoutMock::new(),
            size,
            is_ansi_supported: true,
            is_raw_mode: false,
        }
    }

    pub fn new_without_ansi(size: Size) -> Self {
        Self {
            is_ansi_supported: false,
            ..Self::new(size)
        }
    }
}

impl Write for MockTerminal {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> { self.stdout.write(buf) }

    fn flush(&mut self) -> io::Result<()> { self.stdout.flush() }
}

impl Terminal for MockTerminal {
    fn size(&self) -> io::Result<Size> { Ok(self.size) }

    fn is_ansi_supported(&self) -> bool { self.is_ansi_supported }

    fn enable_raw_mode(&mut self) -> io::Result<()> {
        self.is_raw_mode = true;
        Ok(())
    }

    fn disable_raw_mode(&mut self) -> io::Result<()> {
        self.is_raw_mode = false;
        Ok(())
    }

    fn show_cursor(&mut self) -> io::Result<()> { write!(self.stdout, "\x1b[?25h") }

    fn hide_cursor(&mut self) -> io::Result<()> { write!(self.stdout, "\x1b[?25l") }
}
