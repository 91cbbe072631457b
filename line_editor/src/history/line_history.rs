// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

use std::collections::VecDeque;

use tracing::debug;

use crate::{Document, HISTORY_SIZE_MAX, split_lines};

/// Immutable snapshot of a submitted document, one string per line.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct HistoryEntry(pub Vec<String>);

impl HistoryEntry {
    #[must_use]
    pub fn lines(&self) -> &[String] { &self.0 }
}

impl From<&Document> for HistoryEntry {
    fn from(document: &Document) -> Self { Self(document.snapshot()) }
}

impl From<&str> for HistoryEntry {
    fn from(text: &str) -> Self { Self(split_lines(text).map(str::to_string).collect()) }
}

/// Submitted entries, oldest first, plus a navigation cursor for recall.
///
/// While browsing, the edit the user had not submitted yet is kept in an intermediate
/// slot. Moving forward past the newest entry brings it back.
///
/// | Field               | Meaning                                                 |
/// |---------------------|---------------------------------------------------------|
/// | `entries`           | The log, oldest at the front                             |
/// | `current`           | Index of the recalled entry, `None` when not browsing    |
/// | `intermediate`      | The unsaved edit captured when browsing started          |
/// | `show_intermediate` | [`Self::current`] returns `intermediate` instead         |
#[derive(Debug, Clone)]
pub struct History {
    entries: VecDeque<HistoryEntry>,
    pub max_size: usize,
    current: Option<usize>,
    intermediate: Option<HistoryEntry>,
    show_intermediate: bool,
}

impl Default for History {
    fn default() -> Self { Self::new(HISTORY_SIZE_MAX) }
}

impl History {
    #[must_use]
    pub fn new(max_size: usize) -> Self {
        Self {
            entries: VecDeque::default(),
            max_size,
            current: None,
            intermediate: None,
            show_intermediate: false,
        }
    }

    /// Adds `text`, split into lines.
    pub fn add(&mut self, text: &str) { self.add_entry(HistoryEntry::from(text)); }

    /// Appends `entry` unless it equals the newest entry, then stops browsing. The
    /// oldest entry is evicted once `max_size` is exceeded.
    pub fn add_entry(&mut self, entry: HistoryEntry) {
        self.current = None;

        if self.entries.back() == Some(&entry) {
            return;
        }

        debug!(line_count = entry.0.len(), "Adding history entry");
        self.entries.push_back(entry);
        while self.entries.len() > self.max_size {
            self.entries.pop_front();
        }
    }

    /// Stops browsing and forgets the intermediate edit. Called at the start of every
    /// read.
    pub fn reset(&mut self) {
        self.current = None;
        self.intermediate = None;
        self.show_intermediate = false;
    }

    /// The entry to display: the intermediate edit if it is being shown, otherwise the
    /// recalled entry.
    #[must_use]
    pub fn current(&self) -> Option<&HistoryEntry> {
        if self.show_intermediate {
            return self.intermediate.as_ref();
        }
        self.current.and_then(|index| self.entries.get(index))
    }

    /// Steps towards older entries. `document` is the edit on screen; it is saved as
    /// the intermediate entry when browsing starts (or resumes from the intermediate
    /// entry) and it is not blank. Returns whether [`Self::current`] changed.
    pub fn move_previous(&mut self, document: &Document) -> bool {
        let is_starting = self.current.is_none() && self.intermediate.is_none();
        if (is_starting || self.show_intermediate) && !document.is_empty() {
            self.intermediate = Some(HistoryEntry::from(document));
        }

        if self.show_intermediate {
            // Back on the newest entry, which was left for the intermediate one.
            self.show_intermediate = false;
            if self.current.is_some() {
                return true;
            }
        }

        match self.current {
            None if !self.entries.is_empty() => {
                self.current = Some(self.entries.len() - 1);
                true
            }
            Some(index) if index > 0 => {
                self.current = Some(index - 1);
                true
            }
            _ => false,
        }
    }

    /// Steps towards newer entries, and past the newest one to the intermediate edit.
    /// Returns whether [`Self::current`] changed.
    pub fn move_next(&mut self) -> bool {
        let Some(index) = self.current else {
            return false;
        };
        if self.show_intermediate {
            return false;
        }

        if index + 1 < self.entries.len() {
            self.current = Some(index + 1);
            return true;
        }

        if self.intermediate.is_some() {
            self.show_intermediate = true;
            return true;
        }

        false
    }

    #[must_use]
    pub fn len(&self) -> usize { self.entries.len() }

    #[must_use]
    pub fn is_empty(&self) -> bool { self.entries.is_empty() }

    pub fn iter(&self) -> impl Iterator<Item = &HistoryEntry> { self.entries.iter() }
}
