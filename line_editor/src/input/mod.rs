// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

// Attach sources.
pub mod input_device;
pub mod input_pump;
pub mod input_source;

// Re-export.
pub use input_device::*;
pub use input_pump::*;
pub use input_source::*;
