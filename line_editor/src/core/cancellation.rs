// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

use tokio::sync::watch;

/// Owner side of a cooperative cancellation signal. Hand out [`CancellationToken`]s with
/// [`Self::token`], then call [`Self::cancel`] to make every pending
/// [`crate::LineEditor::read_line`] return [`crate::ReadlineEvent::Cancelled`].
#[derive(Debug)]
pub struct CancellationSource {
    sender: watch::Sender<bool>,
}

impl CancellationSource {
    #[must_use]
    pub fn new() -> Self {
        let (sender, _) = watch::channel(false);
        Self { sender }
    }

    #[must_use]
    pub fn token(&self) -> CancellationToken {
        CancellationToken {
            maybe_receiver: Some(self.sender.subscribe()),
        }
    }

    pub fn cancel(&self) { self.sender.send_replace(true); }

    #[must_use]
    pub fn is_cancelled(&self) -> bool { *self.sender.borrow() }
}

impl Default for CancellationSource {
    fn default() -> Self { Self::new() }
}

/// Observer side of a [`CancellationSource`]. Cheap to clone.
#[derive(Debug, Clone, Default)]
pub struct CancellationToken {
    maybe_receiver: Option<watch::Receiver<bool>>,
}

impl CancellationToken {
    /// A token that is never cancelled.
    #[must_use]
    pub fn none() -> Self { Self::default() }

    #[must_use]
    pub fn is_cancelled(&self) -> bool {
        self.maybe_receiver
            .as_ref()
            .is_some_and(|receiver| *receiver.borrow())
    }

    /// Resolves once the source is cancelled. Never resolves for [`Self::none`], or if
    /// the source is dropped without being cancelled.
    ///
    /// This is cancel safe and can be used as a `tokio::select!` branch.
    pub async fn cancelled(&self) {
        if let Some(receiver) = &self.maybe_receiver {
            let mut receiver = receiver.clone();
            if receiver.wait_for(|is_cancelled| *is_cancelled).await.is_ok() {
                return;
            }
        }
        std::future::pending::<()>().await;
    }
}
