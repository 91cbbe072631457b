// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

// Attach sources.
pub mod async_input_stream_mock;
pub mod mock_terminal;
pub mod one_shot_wake_stream;
pub mod stdout_mock;

// Re-export.
pub use async_input_stream_mock::*;
pub use mock_terminal::*;
pub use one_shot_wake_stream::*;
pub use stdout_mock::*;
