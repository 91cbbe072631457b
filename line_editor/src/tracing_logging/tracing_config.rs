// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

use tracing_core::LevelFilter;

pub const DEFAULT_LOG_FILE_NAME: &str = "r3bl_line_editor_debug.log";

/// Where the logs go and how verbose they are. Pass it to [`crate::init`].
///
/// Fields:
/// - `writer_config`: [`WriterConfig`] to choose where to write the logs.
/// - `level`: [`tracing::Level`] to log at.
#[derive(Debug, Clone)]
pub struct TracingConfig {
    pub writer_config: WriterConfig,
    pub level: tracing::Level,
}

/// The `String` in the file variants is the path of the log file, eg:
/// `/tmp/line_editor.log` or `line_editor.log`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WriterConfig {
    None,
    Display(DisplayPreference),
    File(String),
    DisplayAndFile(DisplayPreference, String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DisplayPreference {
    Stdout,
    Stderr,
}

impl TracingConfig {
    /// Logs to both the given [`DisplayPreference`] and a file.
    #[must_use]
    pub fn new_file_and_display(
        maybe_file_path: Option<String>,
        preferred_display: DisplayPreference,
    ) -> Self {
        Self {
            writer_config: WriterConfig::DisplayAndFile(
                preferred_display,
                maybe_file_path.unwrap_or_else(|| DEFAULT_LOG_FILE_NAME.to_string()),
            ),
            level: tracing::Level::DEBUG,
        }
    }

    #[must_use]
    pub fn new_display(preferred_display: DisplayPreference) -> Self {
        Self {
            writer_config: WriterConfig::Display(preferred_display),
            level: tracing::Level::DEBUG,
        }
    }

    #[must_use]
    pub fn new_file(maybe_file_path: Option<String>) -> Self {
        Self {
            writer_config: WriterConfig::File(
                maybe_file_path.unwrap_or_else(|| DEFAULT_LOG_FILE_NAME.to_string()),
            ),
            level: tracing::Level::DEBUG,
        }
    }

    #[must_use]
    pub fn get_level_filter(&self) -> LevelFilter { LevelFilter::from_level(self.level) }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assert_eq2;

    #[test]
    fn test_constructors_default_to_debug() {
        let config = TracingConfig::new_file(None);
        assert_eq2!(
            config.writer_config,
            WriterConfig::File(DEFAULT_LOG_FILE_NAME.to_string())
        );
        assert_eq2!(config.get_level_filter(), LevelFilter::DEBUG);

        let config =
            TracingConfig::new_file_and_display(Some("a.log".into()), DisplayPreference::Stderr);
        assert_eq2!(
            config.writer_config,
            WriterConfig::DisplayAndFile(DisplayPreference::Stderr, "a.log".into())
        );
    }
}
