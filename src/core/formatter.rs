//! Line formatting
//!
//! Every entry is written as `HH:mm:ss LEVEL: message`, with the time taken
//! from the local wall clock when the consumer writes the line.

use super::error::{LoggerError, Result};
use super::log_entry::LogEntry;
use chrono::format::{Item, StrftimeItems};
use chrono::{DateTime, Local, TimeZone};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Timestamp layout used at the start of each line
///
/// # Examples
///
/// ```
/// use threaded_logger::TimestampFormat;
///
/// // Default: 24-hour wall clock, e.g. "14:03:09"
/// let clock = TimestampFormat::default();
///
/// // Any strftime pattern
/// let dated = TimestampFormat::Custom("%Y-%m-%d %H:%M:%S".to_string());
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum TimestampFormat {
    /// `HH:mm:ss`
    #[default]
    Clock,

    /// Custom strftime format
    Custom(String),
}

impl TimestampFormat {
    fn pattern(&self) -> &str {
        match self {
            TimestampFormat::Clock => "%H:%M:%S",
            TimestampFormat::Custom(format_str) => format_str,
        }
    }

    /// Reject patterns chrono cannot render.
    ///
    /// Formatting with an invalid specifier panics, so this runs before the
    /// consumer is started.
    pub fn validate(&self) -> Result<()> {
        if StrftimeItems::new(self.pattern()).any(|item| matches!(item, Item::Error)) {
            return Err(LoggerError::config(
                "TimestampFormat",
                format!("invalid strftime pattern '{}'", self.pattern()),
            ));
        }
        Ok(())
    }

    #[must_use]
    pub fn format<Tz: TimeZone>(&self, datetime: &DateTime<Tz>) -> String
    where
        Tz::Offset: fmt::Display,
    {
        datetime.format(self.pattern()).to_string()
    }
}

#[derive(Debug, Clone, Default)]
pub struct LineFormatter {
    timestamp_format: TimestampFormat,
}

impl LineFormatter {
    pub fn new(timestamp_format: TimestampFormat) -> Self {
        Self { timestamp_format }
    }

    pub fn timestamp_format(&self) -> &TimestampFormat {
        &self.timestamp_format
    }

    /// Format `entry` stamped with the current local time.
    #[must_use]
    pub fn format(&self, entry: &LogEntry) -> String {
        self.format_at(entry, &Local::now())
    }

    #[must_use]
    pub fn format_at<Tz: TimeZone>(&self, entry: &LogEntry, at: &DateTime<Tz>) -> String
    where
        Tz::Offset: fmt::Display,
    {
        format!(
            "{} {}: {}",
            self.timestamp_format.format(at),
            entry.level().to_str(),
            entry.message()
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::LogLevel;
    use chrono::Utc;

    fn fixed_datetime() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 1, 8, 9, 5, 7)
            .single()
            .expect("valid datetime")
    }

    #[test]
    fn test_clock_line_format() {
        let formatter = LineFormatter::default();
        let entry = LogEntry::new("Starting threads", LogLevel::Info);
        assert_eq!(
            formatter.format_at(&entry, &fixed_datetime()),
            "09:05:07 INFO: Starting threads"
        );
    }

    #[test]
    fn test_level_is_upper_cased() {
        let formatter = LineFormatter::default();
        let entry = LogEntry::new("low disk", LogLevel::Warning);
        assert_eq!(
            formatter.format_at(&entry, &fixed_datetime()),
            "09:05:07 WARNING: low disk"
        );
    }

    #[test]
    fn test_custom_timestamp() {
        let formatter = LineFormatter::new(TimestampFormat::Custom("%Y-%m-%d".to_string()));
        let entry = LogEntry::new("boom", LogLevel::Error);
        assert_eq!(
            formatter.format_at(&entry, &fixed_datetime()),
            "2025-01-08 ERROR: boom"
        );
    }

    #[test]
    fn test_validate_rejects_unknown_specifier() {
        assert!(TimestampFormat::Clock.validate().is_ok());
        assert!(TimestampFormat::Custom("%Y-%m-%d %H:%M:%S%.3f".to_string())
            .validate()
            .is_ok());

        let err = TimestampFormat::Custom("%H:%Q".to_string())
            .validate()
            .unwrap_err();
        assert!(err.is_configuration());
        assert!(err.to_string().contains("%H:%Q"));
    }

    #[test]
    fn test_local_format_shape() {
        let line = LineFormatter::default().format(&LogEntry::new("now", LogLevel::Verbose));
        let (time, rest) = line.split_at(8);
        assert_eq!(rest, " VERBOSE: now");
        assert_eq!(time.len(), 8);
        assert_eq!(time.as_bytes()[2], b':');
        assert_eq!(time.as_bytes()[5], b':');
    }
}
