//! # Threaded Logger
//!
//! An in-process asynchronous logger. Any number of producer threads hand
//! entries to a [`LoggerService`]; a single background consumer thread
//! drains them in batches and appends them to a file.
//!
//! ## Features
//!
//! - **Non-blocking producers**: `log` only links the entry into a queue
//! - **Ordered output**: each producer's entries are written in the order issued
//! - **Termination barrier**: `terminate` returns after every queued entry is on disk
//! - **Explicit lifecycle**: misuse is reported as an error, never ignored
//!
//! Lines look like `14:03:09 WARNING: disk almost full`.

pub mod core;
pub mod macros;
pub mod sinks;

pub mod prelude {
    pub use crate::core::{
        EntrySink, LineFormatter, LogEntry, LogLevel, LogQueue, LoggerBuilder, LoggerError,
        LoggerMetrics, LoggerService, Phase, Result, SinkFailure, TimestampFormat,
    };
    pub use crate::sinks::{FileSink, MemorySink};
}

pub use core::{
    Drain, EntrySink, LineFormatter, LogEntry, LogLevel, LogQueue, LoggerBuilder, LoggerError,
    LoggerMetrics, LoggerService, Phase, Result, SinkFailure, TimestampFormat,
    DEFAULT_CONSUMER_THREAD_NAME,
};
pub use sinks::{FileSink, MemorySink};
