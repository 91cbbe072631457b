// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

use strum_macros::Display;
use tracing::debug;

use crate::{EditorSession, LineBuffer, LineBufferExt};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display)]
pub enum CompletionDirection {
    Next,
    Previous,
}

/// Replaces the word under (or just before) the cursor with a candidate from the
/// session's [`crate::TextCompletion`] provider. Repeated calls at the same span cycle
/// through the candidates in `direction`, wrapping at either end.
///
/// How the candidate is picked:
/// 1. A new span (its start differs from the last call) restarts the cycle at the
///    first candidate for [`CompletionDirection::Next`] or the last one for
///    [`CompletionDirection::Previous`].
/// 2. A non blank word that exactly matches a candidate steps one away from it.
/// 3. A non blank word that prefixes a candidate picks the first such candidate.
/// 4. A non blank word matching nothing leaves the buffer untouched.
/// 5. A blank word uses the stored cycle index.
pub fn complete(session: &mut EditorSession<'_>, direction: CompletionDirection) {
    let Some(completion) = session.completion() else {
        return;
    };

    let buffer = session.buffer();
    let original_position = buffer.position();
    let (start, end) = find_span(buffer);

    let content = buffer.content();
    let prefix = slice_chars(content, 0, start);
    let word = slice_chars(content, start, end);
    let suffix = slice_chars(content, end, usize::MAX);

    let candidates = match completion.get_completions(&prefix, &word, &suffix) {
        Some(candidates) if !candidates.is_empty() => candidates,
        _ => {
            buffer.move_to(original_position);
            return;
        }
    };

    if session.completion_state.anchor != Some(start) {
        session.completion_state.index = match direction {
            CompletionDirection::Next => 0,
            CompletionDirection::Previous => -1,
        };
    }

    let Some(index) =
        select_candidate(&candidates, &word, session.completion_state.index, direction)
    else {
        session.buffer().move_to(original_position);
        return;
    };
    let candidate = &candidates[index];
    debug!(?direction, %candidate, start, "Completing word");

    let buffer = session.buffer();
    if start != end {
        buffer.clear(start, end - start);
    }
    buffer.move_to(start);
    buffer.insert(candidate);
    buffer.move_to(start + candidate.chars().count());

    session.completion_state.anchor = Some(start);
    session.completion_state.index = step(index, direction);
}

/// Char offsets `(start, end)` of the word the cursor is in, or the word that ends at
/// the cursor. Both equal the cursor position when it sits in whitespace.
fn find_span(buffer: &mut LineBuffer) -> (usize, usize) {
    if buffer.is_at_character() {
        buffer.move_to_beginning_of_word();
    } else if buffer.is_at_end_of_word() {
        buffer.move_to_previous_word();
    }
    let start = buffer.position();

    if buffer.is_at_character() {
        buffer.move_to_end_of_word();
    }
    let end = buffer.position();

    (start, end)
}

fn select_candidate(
    candidates: &[String],
    word: &str,
    stored_index: isize,
    direction: CompletionDirection,
) -> Option<usize> {
    if word.trim().is_empty() {
        return Some(wrap(stored_index, candidates.len()));
    }

    if let Some(exact) = candidates.iter().position(|it| it == word) {
        return Some(wrap(step(exact, direction), candidates.len()));
    }

    candidates.iter().position(|it| it.starts_with(word))
}

#[allow(clippy::cast_possible_wrap)]
fn step(index: usize, direction: CompletionDirection) -> isize {
    match direction {
        CompletionDirection::Next => index as isize + 1,
        CompletionDirection::Previous => index as isize - 1,
    }
}

#[allow(clippy::cast_possible_wrap, clippy::cast_sign_loss)]
fn wrap(index: isize, len: usize) -> usize { index.rem_euclid(len as isize) as usize }

fn slice_chars(content: &str, start: usize, end: usize) -> String {
    content
        .chars()
        .skip(start)
        .take(end.saturating_sub(start))
        .collect()
}
