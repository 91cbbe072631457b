// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

use std::{collections::VecDeque,
          io,
          pin::Pin,
          sync::Arc,
          task::{Context, Poll, Waker}};

use crossterm::event::Event;
use futures_core::Stream;

use crate::StdMutex;

/// Event stream that stores the waker of the first `Pending` poll only, and ignores
/// later wakers until that one has been woken. Crossterm's `EventStream` hands its
/// waker to a one shot wake task in the same way, so a reader that polls it with a
/// throwaway waker is never woken again.
#[derive(Debug)]
pub struct OneShotWakeStream {
    state: Arc<StdMutex<OneShotWakeState>>,
}

/// Feeds events into a [`OneShotWakeStream`] from another task.
#[derive(Debug, Clone)]
pub struct OneShotWakeHandle {
    state: Arc<StdMutex<OneShotWakeState>>,
}

#[derive(Debug, Default)]
struct OneShotWakeState {
    pending: VecDeque<io::Result<Event>>,
    maybe_waker: Option<Waker>,
}

#[must_use]
pub fn one_shot_wake_stream() -> (OneShotWakeStream, OneShotWakeHandle) {
    let state = Arc::new(StdMutex::new(OneShotWakeState::default()));
    (
        OneShotWakeStream {
            state: state.clone(),
        },
        OneShotWakeHandle { state },
    )
}

impl OneShotWakeHandle {
    pub fn push(&self, event: io::Result<Event>) {
        let maybe_waker = {
            let mut state = self.state.lock().unwrap();
            state.pending.push_back(event);
            state.maybe_waker.take()
        };
        if let Some(waker) = maybe_waker {
            waker.wake();
        }
    }
}

impl Stream for OneShotWakeStream {
    type Item = io::Result<Event>;

    fn poll_next(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        let mut state = self.state.lock().unwrap();
        if let Some(event) = state.pending.pop_front() {
            return Poll::Ready(Some(event));
        }
        if state.maybe_waker.is_none() {
            state.maybe_waker = Some(cx.waker().clone());
        }
        Poll::Pending
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use futures_util::{FutureExt, StreamExt};

    use super::*;
    use crate::test_fixtures::key_events;

    #[tokio::test]
    async fn test_only_first_waker_is_kept() {
        let (mut stream, handle) = one_shot_wake_stream();

        // Registers a throwaway waker.
        assert!(stream.next().now_or_never().is_none());

        let pusher = tokio::spawn(async move {
            tokio::time::sleep(Duration::from_millis(20)).await;
            for event in key_events("a") {
                handle.push(event);
            }
        });

        // This task's waker is never stored, so only the timer can end the wait.
        let is_timed_out = tokio::select! {
            biased;
            () = tokio::time::sleep(Duration::from_millis(200)) => true,
            _ = stream.next() => false,
        };
        assert!(is_timed_out);
        pusher.await.unwrap();

        // The event did arrive.
        assert!(matches!(stream.next().await, Some(Ok(Event::Key(_)))));
    }
}
