//! Log record structure

use super::extras::Extras;
use super::log_level::Level;
use chrono::{DateTime, Utc};

/// One log call, as seen by formatters
#[derive(Debug, Clone)]
pub struct LogRecord {
    pub timestamp: DateTime<Utc>,
    pub level: Level,
    pub message: String,
    pub file: Option<String>,
    pub line: Option<u32>,
    pub function: Option<String>,
    pub extras: Extras,
}

impl LogRecord {
    /// Sanitize log message to prevent log injection attacks
    ///
    /// Replaces newlines, carriage returns, and tabs with escape sequences
    /// so a text record always stays on one line.
    fn sanitize_message(message: &str) -> String {
        message
            .replace('\n', "\\n")
            .replace('\r', "\\r")
            .replace('\t', "\\t")
    }

    pub fn new(level: Level, message: impl AsRef<str>) -> Self {
        Self {
            timestamp: Utc::now(),
            level,
            message: Self::sanitize_message(message.as_ref()),
            file: None,
            line: None,
            function: None,
            extras: Extras::new(),
        }
    }

    pub fn with_location(mut self, file: &str, line: u32) -> Self {
        self.file = Some(file.to_string());
        self.line = Some(line);
        self
    }

    pub fn with_function(mut self, function: &str) -> Self {
        self.function = Some(function.to_string());
        self
    }

    pub fn with_extras(mut self, extras: Extras) -> Self {
        self.extras = extras;
        self
    }

    pub fn with_timestamp(mut self, timestamp: DateTime<Utc>) -> Self {
        self.timestamp = timestamp;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use colored::Color;

    #[test]
    fn test_message_is_sanitized() {
        let level = Level::new("INFO", 20, Color::White);
        let record = LogRecord::new(level, "line one\nline two\r\tend");
        assert_eq!(record.message, "line one\\nline two\\r\\tend");
    }

    #[test]
    fn test_builder_methods() {
        let level = Level::new("INFO", 20, Color::White);
        let record = LogRecord::new(level, "hello")
            .with_location("src/main.rs", 12)
            .with_function("main")
            .with_extras(Extras::new().with_field("x", 1));

        assert_eq!(record.file.as_deref(), Some("src/main.rs"));
        assert_eq!(record.line, Some(12));
        assert_eq!(record.function.as_deref(), Some("main"));
        assert_eq!(record.extras.len(), 1);
    }
}
