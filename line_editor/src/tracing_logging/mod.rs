// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

//! Optional [`tracing`] subscriber setup for applications embedding the editor.
//!
//! The editor itself only emits events (renderer selection, signals handled by the read
//! loop, paste rewrites, history adds). Call [`init`] with a [`TracingConfig`] to see
//! them. Since the editor owns the terminal while reading, logging to a file is usually
//! what you want.

// Attach sources.
pub mod rolling_file_appender_impl;
pub mod tracing_config;
pub mod tracing_setup;
pub mod writer_config;

// Re-export.
pub use tracing_config::*;
pub use tracing_setup::*;
pub use writer_config::*;
