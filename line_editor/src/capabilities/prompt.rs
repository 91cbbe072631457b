// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

use crossterm::style::{ContentStyle, Stylize};
use unicode_width::UnicodeWidthStr;

use crate::{LineEditorError, PromptState};

/// Supplies the prompt drawn in front of each line. Returns the prompt content (which
/// may contain ANSI styling) and the number of blank columns between the prompt and
/// the text.
pub trait LineEditorPrompt {
    fn get_prompt(&self, state: &PromptState, line_index: usize) -> (String, usize);
}

/// One prompt for the first line, and an optional continuation prompt for the others.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DefaultPrompt {
    prompt: String,
    maybe_more: Option<String>,
}

impl DefaultPrompt {
    /// # Errors
    ///
    /// Returns [`LineEditorError::InvalidArgument`] if either prompt contains a line
    /// break.
    pub fn try_new(prompt: &str, maybe_more: Option<&str>) -> Result<Self, LineEditorError> {
        if contains_line_break(prompt) {
            return Err(LineEditorError::invalid_argument(
                "prompt",
                "prompt cannot contain line breaks",
            ));
        }
        if maybe_more.is_some_and(contains_line_break) {
            return Err(LineEditorError::invalid_argument(
                "more",
                "prompt cannot contain line breaks",
            ));
        }
        Ok(Self {
            prompt: prompt.to_string(),
            maybe_more: maybe_more.map(str::to_string),
        })
    }
}

impl Default for DefaultPrompt {
    /// A yellow `>`.
    fn default() -> Self {
        Self {
            prompt: ">".yellow().to_string(),
            maybe_more: None,
        }
    }
}

impl LineEditorPrompt for DefaultPrompt {
    fn get_prompt(&self, _state: &PromptState, line_index: usize) -> (String, usize) {
        match (line_index, &self.maybe_more) {
            (0, _) | (_, None) => (self.prompt.clone(), 1),
            (_, Some(more)) => (more.clone(), 1),
        }
    }
}

/// Prints the one based line number, zero padded to two digits.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LineNumberPrompt {
    pub style: ContentStyle,
}

impl Default for LineNumberPrompt {
    fn default() -> Self {
        Self {
            style: ContentStyle::new().yellow().on_blue(),
        }
    }
}

impl LineEditorPrompt for LineNumberPrompt {
    fn get_prompt(&self, _state: &PromptState, line_index: usize) -> (String, usize) {
        let number = format!("{:02}", line_index + 1);
        (self.style.apply(number).to_string(), 1)
    }
}

fn contains_line_break(text: &str) -> bool { text.contains(['\n', '\r']) }

/// Display width of `text` once ANSI escape sequences are removed.
#[must_use]
pub fn visible_width(text: &str) -> usize { strip_ansi(text).width() }

#[must_use]
pub fn strip_ansi(text: &str) -> String {
    String::from_utf8_lossy(&strip_ansi_escapes::strip(text)).into_owned()
}
