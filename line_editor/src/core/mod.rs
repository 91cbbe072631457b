// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

// Attach sources.
pub mod cancellation;
pub mod decl_macros;
pub mod error;
pub mod keypress;
pub mod modifier_keys_mask;

// Re-export.
pub use cancellation::*;
pub use error::*;
pub use keypress::*;
pub use modifier_keys_mask::*;
