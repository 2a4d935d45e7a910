//! Core logger types and traits

pub mod consumer;
pub mod error;
pub mod formatter;
pub mod log_entry;
pub mod log_level;
pub mod log_queue;
pub mod metrics;
pub mod service;
pub mod sink;

pub use consumer::SinkFailure;
pub use error::{LoggerError, Result};
pub use formatter::{LineFormatter, TimestampFormat};
pub use log_entry::LogEntry;
pub use log_level::LogLevel;
pub use log_queue::{Drain, LogQueue};
pub use metrics::LoggerMetrics;
pub use service::{LoggerBuilder, LoggerService, Phase, DEFAULT_CONSUMER_THREAD_NAME};
pub use sink::EntrySink;
