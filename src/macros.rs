//! Logging macros for ergonomic log message formatting.
//!
//! Each macro formats its arguments like `format!` and forwards to
//! [`LoggerService::log`](crate::LoggerService::log), returning its `Result`.
//!
//! # Examples
//!
//! ```
//! use threaded_logger::prelude::*;
//! use threaded_logger::info;
//!
//! let logger = LoggerService::new();
//! logger.initialize_with_sink(Box::new(MemorySink::new()))?;
//!
//! let port = 8080;
//! info!(logger, "Server listening on port {}", port)?;
//!
//! logger.terminate()?;
//! # Ok::<(), LoggerError>(())
//! ```

/// Log a message at an explicit level with automatic formatting.
///
/// # Examples
///
/// ```
/// # use threaded_logger::prelude::*;
/// # let logger = LoggerService::new();
/// # logger.initialize_with_sink(Box::new(MemorySink::new())).unwrap();
/// use threaded_logger::log;
/// log!(logger, LogLevel::Info, "Simple message").unwrap();
/// log!(logger, LogLevel::Error, "Error code: {}", 500).unwrap();
/// ```
#[macro_export]
macro_rules! log {
    ($logger:expr, $level:expr, $($arg:tt)+) => {
        $logger.log(format!($($arg)+), $level)
    };
}

/// Log an error-level message.
#[macro_export]
macro_rules! error {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::LogLevel::Error, $($arg)+)
    };
}

/// Log a warning-level message.
///
/// # Examples
///
/// ```
/// # use threaded_logger::prelude::*;
/// # let logger = LoggerService::new();
/// # logger.initialize_with_sink(Box::new(MemorySink::new())).unwrap();
/// use threaded_logger::warning;
/// warning!(logger, "Retry attempt {} of {}", 3, 5).unwrap();
/// ```
#[macro_export]
macro_rules! warning {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::LogLevel::Warning, $($arg)+)
    };
}

/// Log an info-level message.
#[macro_export]
macro_rules! info {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::LogLevel::Info, $($arg)+)
    };
}

/// Log a verbose-level message.
#[macro_export]
macro_rules! verbose {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::LogLevel::Verbose, $($arg)+)
    };
}
