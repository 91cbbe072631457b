// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

//! Narrow seams to the things the editor does not own: where completions come from,
//! how tokens are colored, what each line's prompt looks like, and the terminal itself.
//! All of them are handed to [`crate::LineEditor`] at construction time.

// Attach sources.
pub mod completion;
pub mod highlighter;
pub mod prompt;
pub mod terminal;

// Re-export.
pub use completion::*;
pub use highlighter::*;
pub use prompt::*;
pub use terminal::*;
