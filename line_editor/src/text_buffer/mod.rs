// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

//! Text model of the editor: a single [`LineBuffer`] per line (content plus a grapheme
//! aware cursor), word motion over it ([`LineBufferExt`]), and the multi-line
//! [`Document`] that holds the lines of one read.

// Attach sources.
pub mod document;
pub mod line_buffer;
pub mod word_motion;

// Re-export.
pub use document::*;
pub use line_buffer::*;
pub use word_motion::*;
