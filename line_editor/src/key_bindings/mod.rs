// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

// Attach sources.
pub mod key_bindings_impl;

// Re-export.
pub use key_bindings_impl::*;
