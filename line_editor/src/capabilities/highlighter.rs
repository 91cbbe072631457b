// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

use std::collections::HashMap;

use crossterm::style::ContentStyle;

/// Picks a style for one token of a line. See [`crate::tokenize`] for how a line is
/// split. Whitespace tokens are never passed in.
pub trait Highlighter {
    fn highlight(&self, token: &str) -> Option<ContentStyle>;
}

/// Styles a fixed set of words, ignoring case unless built with
/// [`WordHighlighter::new_case_sensitive`].
///
/// ```rust
/// use crossterm::style::{ContentStyle, Stylize};
/// use r3bl_line_editor::*;
///
/// let highlighter = WordHighlighter::new()
///     .add_word("git", ContentStyle::new().yellow())
///     .add_word("push", ContentStyle::new().green());
/// assert!(highlighter.highlight("GIT").is_some());
/// assert!(highlighter.highlight("pull").is_none());
/// ```
#[derive(Debug, Clone, Default)]
pub struct WordHighlighter {
    words: HashMap<String, ContentStyle>,
    is_case_sensitive: bool,
}

impl WordHighlighter {
    #[must_use]
    pub fn new() -> Self { Self::default() }

    #[must_use]
    pub fn new_case_sensitive() -> Self {
        Self {
            words: HashMap::new(),
            is_case_sensitive: true,
        }
    }

    #[must_use]
    pub fn add_word(mut self, word: &str, style: ContentStyle) -> Self {
        let key = self.normalize(word);
        self.words.insert(key, style);
        self
    }

    fn normalize(&self, word: &str) -> String {
        if self.is_case_sensitive {
            word.to_string()
        } else {
            word.to_lowercase()
        }
    }
}

impl Highlighter for WordHighlighter {
    fn highlight(&self, token: &str) -> Option<ContentStyle> {
        self.words.get(&self.normalize(token)).copied()
    }
}

#[cfg(test)]
mod tests {
    use crossterm::style::Stylize;

    use super::*;
    use crate::assert_eq2;

    #[test]
    fn test_case_insensitive_by_default() {
        let style = ContentStyle::new().red();
        let highlighter = WordHighlighter::new().add_word("Foo", style);
        assert_eq2!(highlighter.highlight("fOO"), Some(style));
    }

    #[test]
    fn test_case_sensitive() {
        let style = ContentStyle::new().red();
        let highlighter = WordHighlighter::new_case_sensitive().add_word("Foo", style);
        assert_eq2!(highlighter.highlight("foo"), None);
        assert_eq2!(highlighter.highlight("Foo"), Some(style));
    }

    #[test]
    fn test_later_word_overwrites() {
        let red = ContentStyle::new().red();
        let blue = ContentStyle::new().blue();
        let highlighter = WordHighlighter::new().add_word("a", red).add_word("A", blue);
        assert_eq2!(highlighter.highlight("a"), Some(blue));
    }
}
