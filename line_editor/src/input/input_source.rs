// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

use crate::{KeyPress, LineEditorError};

/// Where key presses come from. [`crate::InputDevice`] is the implementation backed by
/// a stream of crossterm events.
pub trait InputSource {
    /// Waits for the next key press. `Ok(None)` means the source is exhausted.
    ///
    /// Must be cancel safe: dropping the future before it resolves loses no key press.
    fn read_key(
        &mut self,
    ) -> impl Future<Output = Result<Option<KeyPress>, LineEditorError>>;

    /// Returns a key press only if one is already buffered. Never waits: the source is
    /// polled once, with the calling task's waker, so a key press that arrives later
    /// still wakes the next [`Self::read_key`].
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying source failed.
    fn try_read_buffered_key(
        &mut self,
    ) -> impl Future<Output = Result<Option<KeyPress>, LineEditorError>>;

    /// Whether [`Self::try_read_buffered_key`] would return a key press right now. Never
    /// waits.
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying source failed.
    fn is_key_available(&mut self) -> impl Future<Output = Result<bool, LineEditorError>>;

    /// Test and automation sources return `true` so that bursts of keys are never
    /// treated as pasted text.
    fn bypasses_paste_heuristic(&self) -> bool { false }
}
