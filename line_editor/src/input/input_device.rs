// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

use std::{collections::VecDeque, io, task::Poll};

use crossterm::event::{Event, EventStream};
use futures_util::{StreamExt, poll};

use crate::{InputSource, KeyPress, LineEditorError, PinnedInputStream};

pub type CrosstermEventResult = io::Result<Event>;

/// [`InputSource`] over a stream of crossterm [`Event`]s. In production this is the
/// crossterm [`EventStream`]; tests inject a generated stream instead.
///
/// Only key presses are surfaced. Key releases, resize, mouse, focus and paste events
/// are skipped.
pub struct InputDevice {
    pub resource: PinnedInputStream<Event>,
    lookahead: VecDeque<KeyPress>,
    bypass_paste_heuristic: bool,
}

impl std::fmt::Debug for InputDevice {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("InputDevice")
            .field("lookahead", &self.lookahead)
            .field("bypass_paste_heuristic", &self.bypass_paste_heuristic)
            .finish_non_exhaustive()
    }
}

impl InputDevice {
    #[must_use]
    pub fn new_event_stream() -> InputDevice {
        InputDevice::new(Box::pin(EventStream::new()), false)
    }

    #[must_use]
    pub fn new(resource: PinnedInputStream<Event>, bypass_paste_heuristic: bool) -> Self {
        Self {
            resource,
            lookahead: VecDeque::new(),
            bypass_paste_heuristic,
        }
    }

    /// Polls the stream once per event without waiting. `Ok(None)` when nothing is
    /// ready (or the stream has ended).
    ///
    /// Polling happens with the current task's waker. Crossterm's [`EventStream`] hands
    /// the waker of a `Pending` poll to a one shot wake task, so polling it with a
    /// throwaway waker (such as `now_or_never`) would leave the next `read_key` asleep.
    async fn poll_ready_key(&mut self) -> Result<Option<KeyPress>, LineEditorError> {
        loop {
            match poll!(self.resource.next()) {
                Poll::Pending | Poll::Ready(None) => return Ok(None),
                Poll::Ready(Some(event)) => {
                    if let Some(key_press) = into_key_press(event?) {
                        return Ok(Some(key_press));
                    }
                }
            }
        }
    }
}

fn into_key_press(event: Event) -> Option<KeyPress> {
    match event {
        Event::Key(key_event) => KeyPress::try_from(key_event).ok(),
        _ => None,
    }
}

impl InputSource for InputDevice {
    async fn read_key(&mut self) -> Result<Option<KeyPress>, LineEditorError> {
        if let Some(key_press) = self.lookahead.pop_front() {
            return Ok(Some(key_press));
        }

        while let Some(event) = self.resource.next().await {
            if let Some(key_press) = into_key_press(event?) {
                return Ok(Some(key_press));
            }
        }

        Ok(None)
    }

    async fn try_read_buffered_key(&mut self) -> Result<Option<KeyPress>, LineEditorError> {
        match self.lookahead.pop_front() {
            Some(key_press) => Ok(Some(key_press)),
            None => self.poll_ready_key().await,
        }
    }

    async fn is_key_available(&mut self) -> Result<bool, LineEditorError> {
        if !self.lookahead.is_empty() {
            return Ok(true);
        }
        Ok(match self.poll_ready_key().await? {
            Some(key_press) => {
                self.lookahead.push_back(key_press);
                true
            }
            None => false,
        })
    }

    fn bypasses_paste_heuristic(&self) -> bool { self.bypass_paste_heuristic }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;
    use crate::{SpecialKey, assert_eq2, keypress,
                test_fixtures::{gen_input_stream, gen_input_stream_with_delay,
                                key_events, one_shot_wake_stream}};

    #[tokio::test]
    async fn test_read_key_skips_non_key_events() {
        let mut events = vec![Ok(Event::Resize(10, 10)), Ok(Event::FocusGained)];
        events.extend(key_events("a"));
        let mut device = InputDevice::new(gen_input_stream(events), true);

        assert_eq2!(device.read_key().await.unwrap(), Some(keypress!(@char 'a')));
        assert_eq2!(device.read_key().await.unwrap(), None);
        assert!(device.bypasses_paste_heuristic());
    }

    #[tokio::test]
    async fn test_buffered_keys_are_available_without_waiting() {
        let mut device = InputDevice::new(gen_input_stream(key_events("ab\n")), false);

        assert_eq2!(device.read_key().await.unwrap(), Some(keypress!(@char 'a')));
        assert!(device.is_key_available().await.unwrap());
        assert_eq2!(
            device.try_read_buffered_key().await.unwrap(),
            Some(keypress!(@char 'b'))
        );
        assert_eq2!(
            device.try_read_buffered_key().await.unwrap(),
            Some(keypress!(@special SpecialKey::Enter))
        );
        assert!(!device.is_key_available().await.unwrap());
    }

    #[tokio::test]
    async fn test_delayed_keys_are_not_buffered() {
        let mut device = InputDevice::new(
            gen_input_stream_with_delay(key_events("ab"), Duration::from_millis(50)),
            false,
        );
        assert_eq2!(device.read_key().await.unwrap(), Some(keypress!(@char 'a')));
        assert!(!device.is_key_available().await.unwrap());
        assert_eq2!(device.read_key().await.unwrap(), Some(keypress!(@char 'b')));
    }

    #[tokio::test]
    async fn test_stream_error_is_surfaced() {
        let events = vec![Err(io::Error::other("boom"))];
        let mut device = InputDevice::new(gen_input_stream(events), false);
        assert!(matches!(
            device.read_key().await,
            Err(LineEditorError::IO(_))
        ));
    }

    #[tokio::test]
    async fn test_buffer_check_keeps_next_key_press_wakeable() {
        let (stream, handle) = one_shot_wake_stream();
        for event in key_events("a") {
            handle.push(event);
        }
        let mut device = InputDevice::new(Box::pin(stream), false);

        assert_eq2!(device.read_key().await.unwrap(), Some(keypress!(@char 'a')));
        // Leaves the stream holding this task's waker.
        assert!(!device.is_key_available().await.unwrap());

        let typist = tokio::spawn(async move {
            tokio::time::sleep(Duration::from_millis(20)).await;
            for event in key_events("b") {
                handle.push(event);
            }
        });

        let maybe_key_press = tokio::select! {
            biased;
            () = tokio::time::sleep(Duration::from_secs(1)) => None,
            result = device.read_key() => result.unwrap(),
        };
        assert_eq2!(maybe_key_press, Some(keypress!(@char 'b')));
        typist.await.unwrap();
    }
}
