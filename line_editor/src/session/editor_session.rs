// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

use strum_macros::{AsRefStr, Display};

use crate::{Document, LineBuffer, TextCompletion};

/// Signal that a command hands back to the read loop. Buffer edits never produce one;
/// these are the actions that need the loop (history swap, line navigation with
/// re-rendering, ending the read).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, AsRefStr)]
pub enum SubmitAction {
    Submit,
    Cancel,
    NewLine,
    PreviousHistory,
    NextHistory,
    MoveUp,
    MoveDown,
    MoveFirst,
    MoveLast,
}

/// Cycling position of [`crate::EditCommand::AutoComplete`] kept between key presses.
///
/// - `anchor`: start of the span completed last time. `None` until the first
///   completion, so a span starting at `0` still resets the cycle.
/// - `index`: candidate to use next when the word under the cursor is blank. May be
///   `-1` (or past the end), the cycler wraps it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CompletionState {
    pub anchor: Option<usize>,
    pub index: isize,
}

/// Transient state for one batch of key presses: the document being edited, the
/// optional completion provider, completion cycling state and the first signal set by
/// a command.
pub struct EditorSession<'a> {
    document: &'a mut Document,
    maybe_completion: Option<&'a dyn TextCompletion>,
    pub completion_state: CompletionState,
    maybe_result: Option<SubmitAction>,
}

impl std::fmt::Debug for EditorSession<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EditorSession")
            .field("document", &self.document)
            .field("has_completion", &self.maybe_completion.is_some())
            .field("completion_state", &self.completion_state)
            .field("maybe_result", &self.maybe_result)
            .finish()
    }
}

impl<'a> EditorSession<'a> {
    pub fn new(
        document: &'a mut Document,
        maybe_completion: Option<&'a dyn TextCompletion>,
    ) -> Self {
        Self {
            document,
            maybe_completion,
            completion_state: CompletionState::default(),
            maybe_result: None,
        }
    }

    /// Active line of the document.
    pub fn buffer(&mut self) -> &mut LineBuffer { self.document.buffer_mut() }

    #[must_use]
    pub fn document(&self) -> &Document { &*self.document }

    #[must_use]
    pub fn completion(&self) -> Option<&'a dyn TextCompletion> { self.maybe_completion }

    #[must_use]
    pub fn result(&self) -> Option<SubmitAction> { self.maybe_result }

    /// The first signal wins. Later calls are ignored.
    pub fn submit(&mut self, action: SubmitAction) {
        if self.maybe_result.is_none() {
            self.maybe_result = Some(action);
        }
    }

    /// Applies `command` unless a signal was already set. Returns the signal, if any.
    pub fn execute(&mut self, command: &crate::EditCommand) -> Option<SubmitAction> {
        if self.maybe_result.is_none() {
            command.apply(self);
        }
        self.maybe_result
    }

    /// Clears the signal so the session can keep being used after the read loop has
    /// consumed it. Completion state is kept.
    pub fn take_result(&mut self) -> Option<SubmitAction> { self.maybe_result.take() }
}
