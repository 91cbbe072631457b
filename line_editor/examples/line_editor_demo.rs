// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

use crossterm::style::{ContentStyle, Stylize};
use r3bl_line_editor::{CancellationSource, EditCommand, Key,
                       LineEditor, LineEditorConfig, LineNumberPrompt, ModifierKeysMask,
                       ReadlineEvent, TracingConfig, WordHighlighter, WriterConfig, init,
                       ok};

/// Reads multi-line documents until you press `Esc` or `Ctrl+D`.
///
/// ```text
/// ┌────────────────────────────────────────────┐
/// │ > cargo run --example line_editor_demo     │
/// └────────────────────────────────────────────┘
/// ```
///
/// - `Shift+Enter` adds a line, `Enter` submits.
/// - `Tab` / `Shift+Tab` cycle through git sub commands.
/// - `Ctrl+Up` / `Ctrl+Down` recall earlier documents.
///
/// Logs go to `line_editor_demo.log` (run `tail -f line_editor_demo.log` in another
/// terminal to watch them).
#[tokio::main]
pub async fn main() -> miette::Result<()> {
    init(&TracingConfig {
        writer_config: WriterConfig::File("line_editor_demo.log".into()),
        level: tracing::Level::DEBUG,
    })?;

    let highlighter = WordHighlighter::new()
        .add_word("git", ContentStyle::new().yellow().bold())
        .add_word("push", ContentStyle::new().green())
        .add_word("init", ContentStyle::new().blue());

    let completion = |_prefix: &str, _word: &str, _suffix: &str| -> Option<Vec<String>> {
        Some(
            ["init", "clone", "commit", "push", "pull"]
                .map(String::from)
                .to_vec(),
        )
    };

    let mut editor = LineEditor::new_with_crossterm()
        .try_with_config(LineEditorConfig {
            multi_line: true,
            ..Default::default()
        })?
        .with_prompt(LineNumberPrompt::default())
        .with_highlighter(highlighter)
        .with_completion(completion);

    editor.key_bindings_mut().bind(
        Key::Character('d'),
        Some(ModifierKeysMask::new().with_ctrl()),
        EditCommand::Cancel,
    );

    let cancellation = CancellationSource::new();

    loop {
        match editor.read_line(&cancellation.token()).await? {
            ReadlineEvent::Line(text) => {
                println!("{}", format!("Got {} line(s):", text.lines().count()).green());
                for line in text.lines() {
                    println!("  {line}");
                }
            }
            ReadlineEvent::Cancelled | ReadlineEvent::Eof => break,
        }
    }

    println!("History has {} entries", editor.history().len());

    ok!()
}
