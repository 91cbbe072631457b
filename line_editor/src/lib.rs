// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

//! # `r3bl_line_editor`
//!
//! An embeddable, async, multi-line line editor for interactive terminal applications.
//! It turns a stream of key events into an edited text document and hands back the
//! submitted text (or the fact that the user cancelled).
//!
//! # Features
//!
//! - Grapheme aware cursor motion. The cursor never lands inside a cluster like `é`
//!   (`e` + combining acute accent) or a skin-toned emoji.
//! - Word motion (`Ctrl+Left`, `Ctrl+Right`) based on whitespace adjacency.
//! - Multi-line documents (`Shift+Enter` inserts a line), with line navigation.
//! - History recall that preserves the in-progress (not yet submitted) edit while you
//!   browse, and never stores the same entry twice in a row.
//! - Completion cycling (`Tab` / `Shift+Tab`) through a pluggable [`TextCompletion`]
//!   provider.
//! - Paste detection: a burst of buffered keys in multi-line mode turns embedded
//!   `Enter` presses into line breaks instead of submitting.
//! - Viewport rendering with horizontal scrolling for long lines and vertical scrolling
//!   for documents taller than the terminal. A plain fallback renderer is used when the
//!   terminal does not understand ANSI escape sequences.
//!
//! # Architecture
//!
//! | Module          | Responsibility                                                |
//! |-----------------|---------------------------------------------------------------|
//! | `core`          | [`KeyPress`], [`LineEditorError`], cancellation, macros        |
//! | `text_buffer`   | [`LineBuffer`], word motion, [`Document`]                     |
//! | `key_bindings`  | [`KeyBindings`] registry, default bindings                    |
//! | `commands`      | [`EditCommand`] sum type, completion cycling                  |
//! | `session`       | [`EditorSession`], [`SubmitAction`] signals                   |
//! | `history`       | [`History`] log with intermediate slot                        |
//! | `input`         | [`InputSource`], [`InputDevice`], [`InputPump`]               |
//! | `render`        | [`ViewportRenderer`], viewport math, tokenizer                |
//! | `capabilities`  | Prompt, highlighter, completion and terminal seams            |
//! | `config`        | [`LineEditorConfig`]                                          |
//! | `editor`        | [`LineEditor`], the read loop                                 |
//! | `tracing_logging` | Optional `tracing` subscriber setup                         |
//!
//! # Example
//!
//! ```no_run
//! use r3bl_line_editor::*;
//!
//! # async fn run() -> miette::Result<()> {
//! let mut editor = LineEditor::new_with_crossterm()
//!     .try_with_config(LineEditorConfig { multi_line: true, ..Default::default() })?
//!     .with_prompt(DefaultPrompt::try_new(">", Some("."))?);
//!
//! let cancellation = CancellationSource::new();
//! match editor.read_line(&cancellation.token()).await? {
//!     ReadlineEvent::Line(text) => println!("You typed: {text}"),
//!     ReadlineEvent::Cancelled | ReadlineEvent::Eof => {}
//! }
//! # Ok(())
//! # }
//! ```

// Enforce strict error handling in production library code only.
#![cfg_attr(not(test), deny(clippy::unwrap_in_result))]

// Attach sources.
pub mod capabilities;
pub mod commands;
pub mod config;
pub mod core;
pub mod editor;
pub mod history;
pub mod input;
pub mod key_bindings;
pub mod render;
pub mod session;
pub mod text_buffer;
pub mod tracing_logging;

#[cfg(test)]
pub mod test_fixtures;

// Re-export.
pub use capabilities::*;
pub use commands::*;
pub use config::*;
pub use core::*;
pub use editor::*;
pub use history::*;
pub use input::*;
pub use key_bindings::*;
pub use render::*;
pub use session::*;
pub use text_buffer::*;
pub use tracing_logging::*;

// Type aliases.
use std::{io::Error, pin::Pin};

use futures_core::Stream;

pub type StdMutex<T> = std::sync::Mutex<T>;

pub type PinnedInputStream<T> = Pin<Box<dyn Stream<Item = Result<T, Error>>>>;

// Constants.
pub const HISTORY_SIZE_MAX: usize = 1_000;
pub const PASTE_BURST_LEN_MIN: usize = 5;
pub const EVEN_HEIGHT_SCROLL_CORRECTION: usize = 1;

/// Separator used to join the lines of a submitted multi-line document.
#[cfg(windows)]
pub const LINE_SEPARATOR: &str = "\r\n";
#[cfg(not(windows))]
pub const LINE_SEPARATOR: &str = "\n";
