// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

use std::{io, time::Duration};

use async_stream::stream;
use crossterm::event::{Event, KeyCode, KeyEvent, KeyEventKind, KeyEventState,
                       KeyModifiers};

use crate::PinnedInputStream;

pub fn gen_input_stream<T>(generator_vec: Vec<io::Result<T>>) -> PinnedInputStream<T>
where
    T: Send + Sync + 'static,
{
    let it = stream! {
        for item in generator_vec {
            yield item;
        }
    };
    Box::pin(it)
}

pub fn gen_input_stream_with_delay<T>(
    generator_vec: Vec<io::Result<T>>,
    delay: Duration,
) -> PinnedInputStream<T>
where
    T: Send + Sync + 'static,
{
    let it = stream! {
        for item in generator_vec {
            tokio::time::sleep(delay).await;
            yield item;
        }
    };
    Box::pin(it)
}

pub fn key_event(code: KeyCode, modifiers: KeyModifiers) -> io::Result<Event> {
    Ok(Event::Key(KeyEvent {
        code,
        modifiers,
        kind: KeyEventKind::Press,
        state: KeyEventState::NONE,
    }))
}

/// Typed text as key press events. `\n` becomes `Enter`.
pub fn key_events(text: &str) -> Vec<io::Result<Event>> {
    text.chars()
        .map(|character| match character {
            '\n' => key_event(KeyCode::Enter, KeyModifiers::NONE),
            _ => key_event(KeyCode::Char(character), KeyModifiers::NONE),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use futures_util::StreamExt;

    use super::*;

    #[tokio::test]
    async fn test_gen_input_stream() {
        let mut input_stream = gen_input_stream(vec![Ok(1), Ok(2), Ok(3)]);
        for _ in 1..=3 {
            input_stream.next().await;
        }
        assert!(input_stream.next().await.is_none());
    }

    #[tokio::test]
    async fn test_gen_input_stream_with_delay() {
        const DELAY: u64 = 20;

        let start_time = std::time::Instant::now();
        let mut input_stream = gen_input_stream_with_delay(
            vec![Ok(1), Ok(2), Ok(3)],
            Duration::from_millis(DELAY),
        );
        for _ in 1..=3 {
            input_stream.next().await;
        }
        let end_time = std::time::Instant::now();

        assert!(input_stream.next().await.is_none());
        assert!(end_time - start_time >= Duration::from_millis(DELAY * 3));
    }

    #[test]
    fn test_key_events() {
        let events = key_events("a\n");
        assert_eq!(events.len(), 2);
        assert!(matches!(
            &events[1],
            Ok(Event::Key(KeyEvent { code: KeyCode::Enter, .. }))
        ));
    }
}
