// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

use std::io;

use miette::Diagnostic;

/// Errors surfaced by the line editor.
///
/// Out of range buffer operations are not errors. They are no-ops that report `false`
/// or `0` (see [`crate::LineBuffer::clear`] and [`crate::LineBuffer::move_to`]).
#[derive(Debug, thiserror::Error, Diagnostic)]
pub enum LineEditorError {
    #[error("terminal I/O failed")]
    #[diagnostic(code(r3bl_line_editor::io))]
    IO(#[from] io::Error),

    /// Returned by [`crate::ViewportRenderer::try_enable_ansi`]. The editor recovers by
    /// switching to the fallback renderer before the read loop starts.
    #[error("terminal does not support ANSI escape sequences")]
    #[diagnostic(
        code(r3bl_line_editor::ansi_not_supported),
        help("The plain single line fallback renderer is used instead")
    )]
    AnsiNotSupported,

    #[error("invalid argument `{name}`: {reason}")]
    #[diagnostic(code(r3bl_line_editor::invalid_argument))]
    InvalidArgument { name: &'static str, reason: String },
}

impl LineEditorError {
    pub fn invalid_argument(name: &'static str, reason: impl Into<String>) -> Self {
        Self::InvalidArgument {
            name,
            reason: reason.into(),
        }
    }
}
