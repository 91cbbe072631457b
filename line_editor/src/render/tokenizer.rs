// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

use crate::Highlighter;

/// Splits `text` into runs of letters and digits. Every other char (including each
/// space) is a token of its own.
#[must_use]
pub fn tokenize(text: &str) -> Vec<String> {
    let mut acc = vec![];
    let mut word = String::new();

    for character in text.chars() {
        if character.is_alphanumeric() {
            word.push(character);
        } else {
            if !word.is_empty() {
                acc.push(std::mem::take(&mut word));
            }
            acc.push(character.to_string());
        }
    }

    if !word.is_empty() {
        acc.push(word);
    }

    acc
}

/// Styles each token of `text` with the highlighter. Whitespace tokens are written
/// as-is.
#[must_use]
pub fn highlight(text: &str, maybe_highlighter: Option<&dyn Highlighter>) -> String {
    let Some(highlighter) = maybe_highlighter else {
        return text.to_string();
    };

    let mut acc = String::with_capacity(text.len());
    for token in tokenize(text) {
        let maybe_style = if token.trim().is_empty() {
            None
        } else {
            highlighter.highlight(&token)
        };
        match maybe_style {
            Some(style) => acc.push_str(&style.apply(&token).to_string()),
            None => acc.push_str(&token),
        }
    }
    acc
}

#[cfg(test)]
mod tests {
    use crossterm::style::{ContentStyle, Stylize};
    use test_case::test_case;

    use super::*;
    use crate::{WordHighlighter, assert_eq2, strip_ansi};

    #[test_case("" => Vec::<String>::new() ; "empty")]
    #[test_case("git push" => vec!["git", " ", "push"] ; "words")]
    #[test_case("a  b" => vec!["a", " ", " ", "b"] ; "each space is a token")]
    #[test_case("x1=y2;" => vec!["x1", "=", "y2", ";"] ; "punctuation")]
    #[test_case("héllo wörld" => vec!["héllo", " ", "wörld"] ; "non ascii letters")]
    fn test_tokenize(text: &str) -> Vec<String> { tokenize(text) }

    #[test]
    fn test_highlight_without_highlighter_is_identity() {
        assert_eq2!(highlight("a b", None), "a b");
    }

    #[test]
    fn test_highlight_styles_known_words() {
        let style = ContentStyle::new().red();
        let highlighter = WordHighlighter::new().add_word("git", style);
        let output = highlight("git push", Some(&highlighter));

        assert_eq2!(strip_ansi(&output), "git push");
        assert!(output.starts_with(&style.apply("git").to_string()));
        assert!(output.ends_with(" push"));
    }
}
