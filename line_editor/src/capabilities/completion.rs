// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

/// Source of completion candidates for [`crate::complete`].
///
/// The line is split around the word being completed: `prefix` is everything before
/// it, `word` is the word itself (may be empty) and `suffix` is everything after it.
/// Returning `None` or an empty list declines the completion.
///
/// Any `Fn(&str, &str, &str) -> Option<Vec<String>>` is a [`TextCompletion`]:
///
/// ```no_run
/// use r3bl_line_editor::*;
///
/// let commands = |_prefix: &str, _word: &str, _suffix: &str| -> Option<Vec<String>> {
///     Some(vec!["init".into(), "push".into()])
/// };
/// let editor = LineEditor::new_with_crossterm().with_completion(commands);
/// # let _ = editor;
/// ```
pub trait TextCompletion {
    fn get_completions(&self, prefix: &str, word: &str, suffix: &str)
    -> Option<Vec<String>>;
}

impl<F> TextCompletion for F
where
    F: Fn(&str, &str, &str) -> Option<Vec<String>>,
{
    fn get_completions(
        &self,
        prefix: &str,
        word: &str,
        suffix: &str,
    ) -> Option<Vec<String>> {
        self(prefix, word, suffix)
    }
}
