// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

//! Drawing a [`crate::Document`] into a terminal.
//!
//! The math that decides which part of a line (or which lines of a document) are
//! visible lives in [`viewport`] and is free of I/O. [`ansi_builder`] turns that into
//! escape sequences, and [`viewport_renderer`] picks between the ANSI path and a plain
//! fallback for terminals that can't handle escape sequences.

// Attach sources.
pub mod ansi_builder;
pub mod tokenizer;
pub mod viewport;
pub mod viewport_renderer;

// Re-export.
pub use ansi_builder::*;
pub use tokenizer::*;
pub use viewport::*;
pub use viewport_renderer::*;
