// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

use crate::{CompletionDirection, EditorSession, LineBufferExt, SubmitAction, complete};

/// Every editing action the editor knows about. Key bindings map key presses to these,
/// and [`Self::apply`] runs one against an [`EditorSession`].
///
/// A command either edits the active line in place, or sets exactly one
/// [`SubmitAction`] for the read loop to handle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EditCommand {
    /// Splice text in at the cursor and advance past it.
    Insert(String),
    /// Remove the grapheme cluster before the cursor.
    Backspace,
    /// Remove the grapheme cluster at the cursor.
    Delete,
    MoveLeft(usize),
    MoveRight(usize),
    MoveHome,
    MoveEnd,
    MovePreviousWord,
    MoveNextWord,
    NewLine,
    Submit,
    /// Revert the active line to its initial content, then signal.
    Cancel,
    MoveUp,
    MoveDown,
    MoveFirst,
    MoveLast,
    PreviousHistory,
    NextHistory,
    AutoComplete(CompletionDirection),
}

impl EditCommand {
    pub fn apply(&self, session: &mut EditorSession<'_>) {
        match self {
            EditCommand::Insert(text) => {
                let buffer = session.buffer();
                buffer.insert(text);
                let end = buffer.position() + text.chars().count();
                buffer.move_to(end);
            }
            EditCommand::Backspace => {
                let buffer = session.buffer();
                let position = buffer.position();
                let Some(start) = buffer
                    .grapheme_boundaries()
                    .into_iter()
                    .rev()
                    .find(|&boundary| boundary < position)
                else {
                    return;
                };
                if buffer.clear(start, position - start) > 0 {
                    buffer.move_to(start);
                }
            }
            EditCommand::Delete => {
                let buffer = session.buffer();
                let position = buffer.position();
                if let Some(end) = buffer
                    .grapheme_boundaries()
                    .into_iter()
                    .find(|&boundary| boundary > position)
                {
                    buffer.clear(position, end - position);
                }
            }
            EditCommand::MoveLeft(count) => {
                session.buffer().move_left(*count);
            }
            EditCommand::MoveRight(count) => {
                session.buffer().move_right(*count);
            }
            EditCommand::MoveHome => {
                session.buffer().move_home();
            }
            EditCommand::MoveEnd => {
                session.buffer().move_end();
            }
            EditCommand::MovePreviousWord => {
                session.buffer().move_to_previous_word();
            }
            EditCommand::MoveNextWord => {
                session.buffer().move_to_next_word();
            }
            EditCommand::Cancel => {
                session.buffer().reset();
                session.submit(SubmitAction::Cancel);
            }
            EditCommand::NewLine => session.submit(SubmitAction::NewLine),
            EditCommand::Submit => session.submit(SubmitAction::Submit),
            EditCommand::MoveUp => session.submit(SubmitAction::MoveUp),
            EditCommand::MoveDown => session.submit(SubmitAction::MoveDown),
            EditCommand::MoveFirst => session.submit(SubmitAction::MoveFirst),
            EditCommand::MoveLast => session.submit(SubmitAction::MoveLast),
            EditCommand::PreviousHistory => {
                session.submit(SubmitAction::PreviousHistory);
            }
            EditCommand::NextHistory => session.submit(SubmitAction::NextHistory),
            EditCommand::AutoComplete(direction) => complete(session, *direction),
        }
    }
}
