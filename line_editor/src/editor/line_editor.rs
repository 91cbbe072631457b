// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

use std::{io::Write,
          ops::{Deref, DerefMut}};

use tracing::{debug, warn};

use crate::{CancellationToken, CrosstermTerminal, Document, EditCommand, EditorSession,
            Highlighter, History, HistoryEntry, InputDevice, InputPump, InputPumpEvent,
            InputSource, KeyBindings, LineBuffer, LineEditorConfig, LineEditorError,
            LineEditorPrompt, RenderMode, SubmitAction, Terminal, TextCompletion,
            ViewportRenderer, ok};

/// Outcome of [`LineEditor::read_line`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReadlineEvent {
    /// The submitted text. Lines of a multi-line document are joined with
    /// [`crate::LINE_SEPARATOR`].
    Line(String),
    /// The user pressed the cancel key, or the [`CancellationToken`] fired.
    Cancelled,
    /// The input source ran dry before anything was submitted.
    Eof,
}

#[derive(Debug, Clone, Copy)]
enum LineMotion {
    Up,
    Down,
    First,
    Last,
}

/// Borrows the editor while its terminal is in raw mode, and disables raw mode when
/// dropped. A [`LineEditor::read_line`] future dropped before it completes (by a
/// `select!`, a timeout or a task abort) still leaves the terminal usable.
struct RawModeGuard<'a, S: InputSource, T: Terminal> {
    editor: &'a mut LineEditor<S, T>,
    is_restored: bool,
}

impl<'a, S: InputSource, T: Terminal> RawModeGuard<'a, S, T> {
    fn new(editor: &'a mut LineEditor<S, T>) -> Self {
        Self {
            editor,
            is_restored: false,
        }
    }

    /// Disables raw mode now, reporting the error that [`Drop`] would have to swallow.
    fn restore(mut self) -> Result<(), LineEditorError> {
        self.is_restored = true;
        self.editor.terminal.disable_raw_mode()?;
        ok!()
    }
}

impl<S: InputSource, T: Terminal> Deref for RawModeGuard<'_, S, T> {
    type Target = LineEditor<S, T>;

    fn deref(&self) -> &Self::Target { self.editor }
}

impl<S: InputSource, T: Terminal> DerefMut for RawModeGuard<'_, S, T> {
    fn deref_mut(&mut self) -> &mut Self::Target { self.editor }
}

impl<S: InputSource, T: Terminal> Drop for RawModeGuard<'_, S, T> {
    fn drop(&mut self) {
        if self.is_restored {
            return;
        }
        if let Err(error) = self.editor.terminal.disable_raw_mode() {
            warn!(%error, "Failed to disable raw mode");
        }
    }
}

/// Reads (possibly multi-line) text from the user.
///
/// The editor owns its input source and terminal for its whole lifetime, and keeps
/// [`History`] across calls to [`Self::read_line`]. Optional capabilities (prompt,
/// highlighter, completion) are passed in with the `with_*` builder methods.
///
/// # Read loop
///
/// 1. Key presses are pumped from the [`InputSource`] (see [`InputPump`] for the paste
///    heuristic).
/// 2. Printable characters are inserted. Everything else is looked up in the
///    [`KeyBindings`].
/// 3. The resulting [`EditCommand`] is applied to an [`EditorSession`]. Plain edits
///    just redraw the active line. A [`SubmitAction`] ends the session and is handled
///    here: history recall, line insertion and navigation, submit or cancel.
pub struct LineEditor<S: InputSource = InputDevice, T: Terminal = CrosstermTerminal> {
    pump: InputPump<S>,
    terminal: T,
    key_bindings: KeyBindings,
    maybe_completion: Option<Box<dyn TextCompletion>>,
    renderer: ViewportRenderer,
    history: History,
    config: LineEditorConfig,
}

impl<S: InputSource + std::fmt::Debug, T: Terminal> std::fmt::Debug for LineEditor<S, T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LineEditor")
            .field("pump", &self.pump)
            .field("key_bindings", &self.key_bindings)
            .field("has_completion", &self.maybe_completion.is_some())
            .field("renderer", &self.renderer)
            .field("history", &self.history)
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

impl LineEditor {
    /// Editor over the crossterm event stream and stdout.
    #[must_use]
    pub fn new_with_crossterm() -> Self {
        Self::new(InputDevice::new_event_stream(), CrosstermTerminal::new())
    }

    /// Whether `terminal` can drive the ANSI renderer. The editor still works when it
    /// can't, with the plain fallback renderer.
    pub fn is_supported(terminal: &impl Terminal) -> bool { terminal.is_ansi_supported() }
}

impl<S: InputSource, T: Terminal> LineEditor<S, T> {
    pub fn new(source: S, terminal: T) -> Self {
        let config = LineEditorConfig::default();
        Self {
            pump: InputPump::new(source, config.paste_heuristic),
            terminal,
            key_bindings: KeyBindings::with_default_bindings(),
            maybe_completion: None,
            renderer: ViewportRenderer::default(),
            history: History::new(config.history_max_size),
            config,
        }
    }

    /// # Errors
    ///
    /// Returns [`LineEditorError::InvalidArgument`] if the config fails
    /// [`LineEditorConfig::validate`].
    pub fn try_with_config(mut self, config: LineEditorConfig) -> Result<Self, LineEditorError> {
        config.validate()?;
        self.pump.set_config(config.paste_heuristic);
        self.renderer.set_scroll(config.scroll);
        self.history.max_size = config.history_max_size;
        self.config = config;
        Ok(self)
    }

    #[must_use]
    pub fn with_prompt(mut self, prompt: impl LineEditorPrompt + 'static) -> Self {
        self.renderer.set_prompt(Box::new(prompt));
        self
    }

    #[must_use]
    pub fn with_highlighter(mut self, highlighter: impl Highlighter + 'static) -> Self {
        self.renderer.set_highlighter(Some(Box::new(highlighter)));
        self
    }

    #[must_use]
    pub fn with_completion(mut self, completion: impl TextCompletion + 'static) -> Self {
        self.maybe_completion = Some(Box::new(completion));
        self
    }

    #[must_use]
    pub fn with_key_bindings(mut self, key_bindings: KeyBindings) -> Self {
        self.key_bindings = key_bindings;
        self
    }

    pub fn config(&self) -> &LineEditorConfig { &self.config }

    pub fn key_bindings_mut(&mut self) -> &mut KeyBindings { &mut self.key_bindings }

    pub fn history(&self) -> &History { &self.history }

    pub fn history_mut(&mut self) -> &mut History { &mut self.history }

    pub fn terminal(&self) -> &T { &self.terminal }

    pub fn render_mode(&self) -> RenderMode { self.renderer.mode() }

    /// Reads one document from the user. Raw mode is enabled for the duration of the
    /// call and disabled again on every exit path.
    ///
    /// The submitted document is added to [`Self::history`] unless it is blank.
    /// Nothing is added when the read is cancelled or the input ends.
    ///
    /// # Errors
    ///
    /// Returns an error if the input source or the terminal failed.
    pub async fn read_line(
        &mut self,
        cancellation: &CancellationToken,
    ) -> Result<ReadlineEvent, LineEditorError> {
        let mut document = Document::from_text(&self.config.initial_text);

        self.history.reset();
        self.pump.initialize(&self.key_bindings);

        if let Err(error) = self.renderer.try_enable_ansi(&self.terminal) {
            warn!(%error, "Using the fallback renderer");
            self.renderer.use_fallback();
        }
        debug!(mode = %self.renderer.mode(), multi_line = self.config.multi_line, "Read started");

        self.terminal.enable_raw_mode()?;
        let mut guard = RawModeGuard::new(self);
        let result = guard.run(&mut document, cancellation).await;
        let restore_result = guard.restore();
        let event = result?;
        restore_result?;

        if matches!(event, ReadlineEvent::Line(_)) && !document.is_empty() {
            self.history.add_entry(HistoryEntry::from(&document));
        }

        Ok(event)
    }

    async fn run(
        &mut self,
        document: &mut Document,
        cancellation: &CancellationToken,
    ) -> Result<ReadlineEvent, LineEditorError> {
        self.renderer.refresh(&mut self.terminal, document)?;

        let event = loop {
            let Some(signal) = self.read_signal(document, cancellation).await? else {
                break ReadlineEvent::Eof;
            };
            debug!(%signal, "Handling signal");

            let is_multi_line = self.config.multi_line;
            match signal {
                SubmitAction::Submit => break ReadlineEvent::Line(document.text()),
                SubmitAction::Cancel => break ReadlineEvent::Cancelled,
                SubmitAction::PreviousHistory => {
                    if self.history.move_previous(document) {
                        self.show_history_entry(document)?;
                    }
                }
                SubmitAction::NextHistory => {
                    if self.history.move_next() {
                        self.show_history_entry(document)?;
                    }
                }
                SubmitAction::NewLine => {
                    if is_multi_line && document.is_last_line() {
                        self.add_line(document)?;
                    }
                }
                SubmitAction::MoveUp if is_multi_line => {
                    self.move_active_line(document, LineMotion::Up)?;
                }
                SubmitAction::MoveDown if is_multi_line => {
                    self.move_active_line(document, LineMotion::Down)?;
                }
                SubmitAction::MoveFirst if is_multi_line => {
                    self.move_active_line(document, LineMotion::First)?;
                }
                SubmitAction::MoveLast if is_multi_line => {
                    self.move_active_line(document, LineMotion::Last)?;
                }
                SubmitAction::MoveUp
                | SubmitAction::MoveDown
                | SubmitAction::MoveFirst
                | SubmitAction::MoveLast => {}
            }
        };

        self.finish(document)?;
        Ok(event)
    }

    /// Feeds key presses into a fresh [`EditorSession`] until a command produces a
    /// signal. `None` when the input ended. A fired `cancellation` reads as
    /// [`SubmitAction::Cancel`].
    async fn read_signal(
        &mut self,
        document: &mut Document,
        cancellation: &CancellationToken,
    ) -> Result<Option<SubmitAction>, LineEditorError> {
        let mut session = EditorSession::new(document, self.maybe_completion.as_deref());

        loop {
            let key_press = match self
                .pump
                .read_key(self.config.multi_line, cancellation)
                .await?
            {
                InputPumpEvent::Key(key_press) => key_press,
                InputPumpEvent::Cancelled => return Ok(Some(SubmitAction::Cancel)),
                InputPumpEvent::Eof => return Ok(None),
            };

            let maybe_command = match key_press.as_literal_char() {
                Some(character) => Some(EditCommand::Insert(character.to_string())),
                None => self.key_bindings.resolve_key_press(&key_press).cloned(),
            };

            if let Some(command) = maybe_command {
                if let Some(signal) = session.execute(&command) {
                    return Ok(Some(signal));
                }
            }

            self.renderer
                .render_line(&mut self.terminal, session.document(), None)?;
        }
    }

    /// Swaps the recalled history entry into the document. The cursor ends up at the
    /// end of its last line.
    fn show_history_entry(&mut self, document: &mut Document) -> Result<(), LineEditorError> {
        let Some(entry) = self.history.current() else {
            return ok!();
        };
        let lines = entry
            .lines()
            .iter()
            .map(|line| LineBuffer::new(line.as_str()))
            .collect::<Vec<_>>();
        if lines.is_empty() {
            return ok!();
        }

        // Clearing leaves the terminal cursor on the first line.
        self.renderer.clear(&mut self.terminal, document)?;

        let last_index = lines.len() - 1;
        document.set_content(lines, last_index);

        self.renderer.hide_cursor(&mut self.terminal)?;
        for _ in 0..last_index {
            self.renderer.move_down(&mut self.terminal, document)?;
        }
        self.renderer.refresh(&mut self.terminal, document)?;
        self.renderer.show_cursor(&mut self.terminal)?;

        ok!()
    }

    fn add_line(&mut self, document: &mut Document) -> Result<(), LineEditorError> {
        document.add_line(None);

        self.renderer.hide_cursor(&mut self.terminal)?;
        self.renderer.move_down(&mut self.terminal, document)?;
        self.renderer.refresh(&mut self.terminal, document)?;
        self.renderer.show_cursor(&mut self.terminal)?;

        ok!()
    }

    /// Changes the active line, keeping the cursor column where the new line allows it.
    fn move_active_line(
        &mut self,
        document: &mut Document,
        motion: LineMotion,
    ) -> Result<(), LineEditorError> {
        let height = usize::from(self.terminal.size()?.row_height);
        let position = document.buffer().position();

        self.renderer.hide_cursor(&mut self.terminal)?;

        if document.line_count() > height {
            self.step(document, motion)?;
            self.renderer.refresh(&mut self.terminal, document)?;
        } else {
            // Park the cursor on the line being left.
            self.renderer
                .render_line(&mut self.terminal, document, Some(0))?;
            self.step(document, motion)?;
        }

        document.buffer_mut().move_to(position);
        self.renderer.render_line(&mut self.terminal, document, None)?;

        self.renderer.show_cursor(&mut self.terminal)?;
        ok!()
    }

    fn step(&mut self, document: &mut Document, motion: LineMotion) -> Result<(), LineEditorError> {
        match motion {
            LineMotion::Up => {
                if document.move_up() {
                    self.renderer.cursor_up(&mut self.terminal)?;
                }
            }
            LineMotion::Down => {
                if document.move_down() {
                    self.renderer.cursor_down(&mut self.terminal)?;
                }
            }
            LineMotion::First => {
                while document.move_up() {
                    self.renderer.cursor_up(&mut self.terminal)?;
                }
            }
            LineMotion::Last => {
                while document.move_down() {
                    self.renderer.cursor_down(&mut self.terminal)?;
                }
            }
        }
        ok!()
    }

    /// Leaves the terminal cursor on a fresh line below the document.
    fn finish(&mut self, document: &mut Document) -> Result<(), LineEditorError> {
        self.renderer
            .render_line(&mut self.terminal, document, Some(0))?;

        while document.move_down() {
            self.renderer.cursor_down(&mut self.terminal)?;
        }

        // In raw mode a bare `\n` does not return the carriage.
        self.terminal.write_all(b"\r\n")?;
        self.terminal.flush()?;

        ok!()
    }
}

#[cfg(test)]
mod tests {
    use std::{io, time::Duration};

    use crossterm::event::{Event, KeyCode, KeyModifiers};

    use super::*;
    use crate::{CancellationSource, LINE_SEPARATOR, Size, assert_eq2,
                test_fixtures::{MockTerminal, gen_input_stream, key_event, key_events}};

    type TestEditor = LineEditor<InputDevice, MockTerminal>;

    fn editor_with_events(events: Vec<io::Result<Event>>) -> TestEditor {
        LineEditor::new(
            InputDevice::new(gen_input_stream(events), true),
            MockTerminal::new(Size::new(80, 24)),
        )
    }

    fn multi_line_editor_with_events(events: Vec<io::Result<Event>>) -> TestEditor {
        editor_with_events(events)
            .try_with_config(LineEditorConfig {
                multi_line: true,
                ..Default::default()
            })
            .unwrap()
    }

    fn shift_enter() -> io::Result<Event> { key_event(KeyCode::Enter, KeyModifiers::SHIFT) }

    fn ctrl(code: KeyCode) -> io::Result<Event> { key_event(code, KeyModifiers::CONTROL) }

    fn plain(code: KeyCode) -> io::Result<Event> { key_event(code, KeyModifiers::NONE) }

    async fn read(editor: &mut TestEditor) -> ReadlineEvent {
        editor.read_line(&CancellationToken::none()).await.unwrap()
    }

    #[tokio::test]
    async fn test_plain_submit() {
        let mut editor = editor_with_events(key_events("Patrik\n"));

        assert_eq2!(read(&mut editor).await, ReadlineEvent::Line("Patrik".into()));
        assert_eq2!(editor.history().len(), 1);
        assert!(!editor.terminal().is_raw_mode);

        let output = editor.terminal().stdout.get_copy_of_buffer_as_string();
        assert!(output.ends_with("\r\n"));
    }

    #[tokio::test]
    async fn test_dropped_read_disables_raw_mode() {
        let mut editor = LineEditor::new(
            InputDevice::new(Box::pin(futures_util::stream::pending()), true),
            MockTerminal::new(Size::new(80, 24)),
        );

        let result = tokio::time::timeout(
            Duration::from_millis(20),
            editor.read_line(&CancellationToken::none()),
        )
        .await;

        assert!(result.is_err());
        assert!(!editor.terminal().is_raw_mode);
    }

    #[tokio::test]
    async fn test_multi_line_submit() {
        let mut events = key_events("Patrik");
        events.push(shift_enter());
        events.extend(key_events("Svensson\n"));
        let mut editor = multi_line_editor_with_events(events);

        assert_eq2!(
            read(&mut editor).await,
            ReadlineEvent::Line(format!("Patrik{LINE_SEPARATOR}Svensson"))
        );
    }

    #[tokio::test]
    async fn test_new_line_is_ignored_in_single_line_mode() {
        let mut events = key_events("a");
        events.push(shift_enter());
        events.extend(key_events("b\n"));
        let mut editor = editor_with_events(events);

        assert_eq2!(read(&mut editor).await, ReadlineEvent::Line("ab".into()));
    }

    #[tokio::test]
    async fn test_move_up_keeps_column() {
        let mut events = key_events("a");
        events.push(shift_enter());
        events.push(plain(KeyCode::Char('b')));
        events.push(plain(KeyCode::Up));
        events.extend(key_events("X\n"));
        let mut editor = multi_line_editor_with_events(events);

        assert_eq2!(
            read(&mut editor).await,
            ReadlineEvent::Line(format!("aX{LINE_SEPARATOR}b"))
        );
    }

    #[tokio::test]
    async fn test_history_previous() {
        let mut events = vec![ctrl(KeyCode::Up), ctrl(KeyCode::Up), ctrl(KeyCode::Up)];
        events.extend(key_events("\n"));
        let mut editor = editor_with_events(events);
        for it in ["Foo", "Bar", "Baz"] {
            editor.history_mut().add(it);
        }

        assert_eq2!(read(&mut editor).await, ReadlineEvent::Line("Foo".into()));
        assert_eq2!(editor.history().len(), 4);
    }

    #[tokio::test]
    async fn test_history_previous_then_next() {
        let mut events = (0..3).map(|_| ctrl(KeyCode::Up)).collect::<Vec<_>>();
        events.push(ctrl(KeyCode::Down));
        events.push(ctrl(KeyCode::Down));
        events.extend(key_events("\n"));
        let mut editor = editor_with_events(events);
        for it in ["Foo", "Bar", "Baz"] {
            editor.history_mut().add(it);
        }

        assert_eq2!(read(&mut editor).await, ReadlineEvent::Line("Baz".into()));
        // Same as the newest entry, so it is not added again.
        assert_eq2!(editor.history().len(), 3);
    }

    #[tokio::test]
    async fn test_history_returns_unsaved_edit() {
        let mut events = key_events("Foo");
        events.push(ctrl(KeyCode::Up));
        events.push(ctrl(KeyCode::Down));
        events.extend(key_events("\n"));
        let mut editor = editor_with_events(events);
        editor.history_mut().add("Bar");

        assert_eq2!(read(&mut editor).await, ReadlineEvent::Line("Foo".into()));
    }

    #[tokio::test]
    async fn test_cancel_key() {
        let mut events = key_events("abc");
        events.push(plain(KeyCode::Esc));
        let mut editor = editor_with_events(events);

        assert_eq2!(read(&mut editor).await, ReadlineEvent::Cancelled);
        assert!(editor.history().is_empty());
        assert!(!editor.terminal().is_raw_mode);
    }

    #[tokio::test]
    async fn test_cancel_with_initial_text() {
        let mut events = key_events("Bar");
        events.push(plain(KeyCode::Esc));
        let mut editor = editor_with_events(events)
            .try_with_config(LineEditorConfig {
                initial_text: "Foo".into(),
                ..Default::default()
            })
            .unwrap();

        assert_eq2!(read(&mut editor).await, ReadlineEvent::Cancelled);
        let output = editor.terminal().stdout.get_copy_of_buffer_as_string_strip_ansi();
        assert!(output.contains("FooBar"));
        assert!(output.trim_end().ends_with("> Foo"));
    }

    #[tokio::test]
    async fn test_cancellation_token() {
        let mut editor = LineEditor::new(
            InputDevice::new(Box::pin(futures_util::stream::pending()), true),
            MockTerminal::new(Size::new(80, 24)),
        );
        let source = CancellationSource::new();
        let token = source.token();

        let canceller = tokio::spawn(async move {
            tokio::time::sleep(Duration::from_millis(20)).await;
            source.cancel();
        });

        assert_eq2!(
            editor.read_line(&token).await.unwrap(),
            ReadlineEvent::Cancelled
        );
        canceller.await.unwrap();
        assert!(!editor.terminal().is_raw_mode);
    }

    #[tokio::test]
    async fn test_end_of_input() {
        let mut editor = editor_with_events(key_events("abc"));

        assert_eq2!(read(&mut editor).await, ReadlineEvent::Eof);
        assert!(editor.history().is_empty());
    }

    #[tokio::test]
    async fn test_blank_submit_is_not_added_to_history() {
        let mut editor = editor_with_events(key_events("  \n"));

        assert_eq2!(read(&mut editor).await, ReadlineEvent::Line("  ".into()));
        assert!(editor.history().is_empty());
    }

    #[tokio::test]
    async fn test_fallback_renderer() {
        let mut events = key_events("hi\n");
        events.push(ctrl(KeyCode::Up));
        events.extend(key_events("\n"));
        let mut editor = LineEditor::new(
            InputDevice::new(gen_input_stream(events), true),
            MockTerminal::new_without_ansi(Size::new(20, 5)),
        );

        assert_eq2!(read(&mut editor).await, ReadlineEvent::Line("hi".into()));
        assert_eq2!(editor.render_mode(), RenderMode::Fallback);

        // History recall hides and shows the cursor on ANSI terminals.
        assert_eq2!(read(&mut editor).await, ReadlineEvent::Line("hi".into()));

        let output = editor.terminal().stdout.get_copy_of_buffer_as_string();
        assert!(!output.contains('\x1b'));
        assert!(output.ends_with("> hi\r> \r\n"));
    }

    #[tokio::test]
    async fn test_pasted_block_is_not_submitted_early() {
        let pasted = key_events("ab\ncdef");
        let stream = async_stream::stream! {
            for item in pasted {
                yield item;
            }
            tokio::time::sleep(Duration::from_millis(10)).await;
            yield key_event(KeyCode::Enter, KeyModifiers::NONE);
        };
        let mut editor = LineEditor::new(
            InputDevice::new(Box::pin(stream), false),
            MockTerminal::new(Size::new(80, 24)),
        )
        .try_with_config(LineEditorConfig {
            multi_line: true,
            ..Default::default()
        })
        .unwrap();

        assert_eq2!(
            read(&mut editor).await,
            ReadlineEvent::Line(format!("ab{LINE_SEPARATOR}cdef"))
        );
    }

    #[tokio::test]
    async fn test_completion() {
        let mut events = key_events("git ");
        events.push(plain(KeyCode::Tab));
        events.push(plain(KeyCode::Tab));
        events.extend(key_events("\n"));
        let mut editor = editor_with_events(events).with_completion(
            |_: &str, _: &str, _: &str| -> Option<Vec<String>> {
                Some(vec!["init".into(), "push".into()])
            },
        );

        assert_eq2!(read(&mut editor).await, ReadlineEvent::Line("git push".into()));
    }

    #[tokio::test]
    async fn test_tall_document_scrolls() {
        let mut events = vec![];
        for it in 0..8 {
            events.extend(key_events(&it.to_string()));
            events.push(shift_enter());
        }
        events.push(plain(KeyCode::PageUp));
        events.extend(key_events("X\n"));
        let mut editor = LineEditor::new(
            InputDevice::new(gen_input_stream(events), true),
            MockTerminal::new(Size::new(40, 4)),
        )
        .try_with_config(LineEditorConfig {
            multi_line: true,
            ..Default::default()
        })
        .unwrap();

        let expected = ["X0", "1", "2", "3", "4", "5", "6", "7", ""].join(LINE_SEPARATOR);
        assert_eq2!(read(&mut editor).await, ReadlineEvent::Line(expected));
        let output = editor.terminal().stdout.get_copy_of_buffer_as_string();
        assert!(output.contains("\x1b[1;1H"));
    }

    #[test]
    fn test_invalid_config_is_rejected() {
        let result = editor_with_events(vec![]).try_with_config(LineEditorConfig {
            history_max_size: 0,
            ..Default::default()
        });
        assert!(matches!(
            result,
            Err(LineEditorError::InvalidArgument {
                name: "history_max_size",
                ..
            })
        ));
    }
}
