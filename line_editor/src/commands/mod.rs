// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

// Attach sources.
pub mod completion_cycler;
pub mod edit_command;

// Re-export.
pub use completion_cycler::*;
pub use edit_command::*;
