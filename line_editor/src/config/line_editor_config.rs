// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

use serde::{Deserialize, Serialize};

use crate::{EVEN_HEIGHT_SCROLL_CORRECTION, HISTORY_SIZE_MAX, LineEditorError,
            PASTE_BURST_LEN_MIN};

/// Settings for [`crate::LineEditor`]. Every field has a default, so a config file only
/// needs the fields it changes.
///
/// ```rust
/// use r3bl_line_editor::*;
///
/// let config = LineEditorConfig {
///     multi_line: true,
///     initial_text: "git ".into(),
///     ..Default::default()
/// };
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LineEditorConfig {
    /// `Shift+Enter` adds lines, and pasted line breaks don't submit.
    pub multi_line: bool,
    /// Seed text for each read, split on line breaks.
    pub initial_text: String,
    pub paste_heuristic: PasteHeuristicConfig,
    pub scroll: ScrollConfig,
    /// Oldest history entries are evicted past this size.
    pub history_max_size: usize,
}

impl Default for LineEditorConfig {
    fn default() -> Self {
        Self {
            multi_line: false,
            initial_text: String::new(),
            paste_heuristic: PasteHeuristicConfig::default(),
            scroll: ScrollConfig::default(),
            history_max_size: HISTORY_SIZE_MAX,
        }
    }
}

/// When keys arrive in a burst (already buffered right after the first one), the
/// input is most likely pasted or automated. In multi-line mode a burst of at least
/// `min_burst_len` keys has its submit key presses turned into new line key presses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PasteHeuristicConfig {
    pub enabled: bool,
    pub min_burst_len: usize,
}

impl Default for PasteHeuristicConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            min_burst_len: PASTE_BURST_LEN_MIN,
        }
    }
}

/// Tuning for the vertical viewport of documents taller than the terminal. The window
/// is centered on the active line; near the end of the document it is pulled back by
/// `even_height_correction` rows when the terminal height is even, so the last line
/// sits on the bottom row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScrollConfig {
    pub even_height_correction: usize,
}

impl Default for ScrollConfig {
    fn default() -> Self {
        Self {
            even_height_correction: EVEN_HEIGHT_SCROLL_CORRECTION,
        }
    }
}

impl LineEditorConfig {
    /// # Errors
    ///
    /// Returns [`LineEditorError::InvalidArgument`] for a zero burst length or a zero
    /// history size.
    pub fn validate(&self) -> Result<(), LineEditorError> {
        if self.paste_heuristic.min_burst_len == 0 {
            return Err(LineEditorError::invalid_argument(
                "paste_heuristic.min_burst_len",
                "must be at least 1",
            ));
        }
        if self.history_max_size == 0 {
            return Err(LineEditorError::invalid_argument(
                "history_max_size",
                "must be at least 1",
            ));
        }
        Ok(())
    }
}
