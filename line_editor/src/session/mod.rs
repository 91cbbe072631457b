// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

// Attach sources.
pub mod editor_session;

// Re-export.
pub use editor_session::*;
