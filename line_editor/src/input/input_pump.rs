// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

use std::collections::VecDeque;

use tracing::debug;

use crate::{CancellationToken, EditCommand, InputSource, KeyBindings, KeyPress,
            LineEditorError, PasteHeuristicConfig};

/// What [`InputPump::read_key`] produced.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputPumpEvent {
    Key(KeyPress),
    Cancelled,
    Eof,
}

/// Pulls key presses from an [`InputSource`] one at a time, queueing any that arrive
/// in the same burst.
///
/// After the first key press of a read, every key press that is already buffered is
/// drained at once. In multi-line mode, a drained burst of at least
/// [`PasteHeuristicConfig::min_burst_len`] key presses is treated as pasted text: key
/// presses bound to [`EditCommand::Submit`] inside it become the key press bound to
/// [`EditCommand::NewLine`]. Sources that report
/// [`InputSource::bypasses_paste_heuristic`] are left alone.
#[derive(Debug)]
pub struct InputPump<S: InputSource> {
    source: S,
    queue: VecDeque<KeyPress>,
    config: PasteHeuristicConfig,
    maybe_submit_key: Option<KeyPress>,
    maybe_new_line_key: Option<KeyPress>,
}

impl<S: InputSource> InputPump<S> {
    pub fn new(source: S, config: PasteHeuristicConfig) -> Self {
        Self {
            source,
            queue: VecDeque::new(),
            config,
            maybe_submit_key: None,
            maybe_new_line_key: None,
        }
    }

    /// Looks up the submit and new line key presses. Call before each read, since the
    /// bindings may have changed.
    pub fn initialize(&mut self, key_bindings: &KeyBindings) {
        self.maybe_submit_key = key_bindings.find_binding(&EditCommand::Submit);
        self.maybe_new_line_key = key_bindings.find_binding(&EditCommand::NewLine);
    }

    pub fn set_config(&mut self, config: PasteHeuristicConfig) { self.config = config; }

    /// Returns the next queued key press, or waits for the source. Waiting ends early
    /// with [`InputPumpEvent::Cancelled`] once `cancellation` fires.
    ///
    /// # Errors
    ///
    /// Returns an error if the input source failed.
    pub async fn read_key(
        &mut self,
        is_multi_line: bool,
        cancellation: &CancellationToken,
    ) -> Result<InputPumpEvent, LineEditorError> {
        if cancellation.is_cancelled() {
            return Ok(InputPumpEvent::Cancelled);
        }

        if let Some(key_press) = self.queue.pop_front() {
            return Ok(InputPumpEvent::Key(key_press));
        }

        let maybe_key_press = tokio::select! {
            biased;

            // This branch is cancel safe because the token is only observed.
            () = cancellation.cancelled() => return Ok(InputPumpEvent::Cancelled),

            // This branch is cancel safe because `read_key` is.
            result = self.source.read_key() => result?,
        };

        let Some(first_key_press) = maybe_key_press else {
            return Ok(InputPumpEvent::Eof);
        };

        self.drain_burst(is_multi_line).await?;
        Ok(InputPumpEvent::Key(first_key_press))
    }

    async fn drain_burst(&mut self, is_multi_line: bool) -> Result<(), LineEditorError> {
        let mut burst = Vec::new();
        while self.source.is_key_available().await? {
            match self.source.try_read_buffered_key().await? {
                Some(key_press) => burst.push(key_press),
                None => break,
            }
        }

        let is_paste = is_multi_line
            && self.config.enabled
            && burst.len() >= self.config.min_burst_len
            && !self.source.bypasses_paste_heuristic();

        let rewrite = match (is_paste, self.maybe_submit_key, self.maybe_new_line_key) {
            (true, Some(submit), Some(new_line)) => Some((submit, new_line)),
            _ => None,
        };

        if let Some((submit, new_line)) = rewrite {
            debug!(burst_len = burst.len(), "Treating key burst as pasted text");
            for key_press in &mut burst {
                if *key_press == submit {
                    *key_press = new_line;
                }
            }
        }

        self.queue.extend(burst);
        Ok(())
    }
}
