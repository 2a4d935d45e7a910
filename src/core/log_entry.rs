//! Log entry structure

use super::log_level::LogLevel;
use serde::{Deserialize, Serialize};

/// One immutable (message, level) pair travelling from a producer to the sink.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogEntry {
    message: String,
    level: LogLevel,
}

impl LogEntry {
    /// Sanitize log message to prevent log injection attacks
    ///
    /// Replaces newlines, carriage returns, and tabs with escape sequences
    /// so that a single entry always occupies a single sink line. Backslashes
    /// are escaped first so the result stays unambiguous.
    fn sanitize_message(message: String) -> String {
        if !message.contains(&['\\', '\n', '\r', '\t'][..]) {
            return message;
        }
        message
            .replace('\\', "\\\\")
            .replace('\n', "\\n")
            .replace('\r', "\\r")
            .replace('\t', "\\t")
    }

    pub fn new(message: impl Into<String>, level: LogLevel) -> Self {
        Self {
            message: Self::sanitize_message(message.into()),
            level,
        }
    }

    #[inline]
    pub fn message(&self) -> &str {
        &self.message
    }

    #[inline]
    pub fn level(&self) -> LogLevel {
        self.level
    }

    pub fn into_parts(self) -> (String, LogLevel) {
        (self.message, self.level)
    }
}
