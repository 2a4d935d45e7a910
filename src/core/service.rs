//! Logger service: lifecycle and public entry point

use super::{
    consumer::{panic_message, Consumer, ConsumerOutcome, SinkFailure},
    error::{LoggerError, Result},
    formatter::{LineFormatter, TimestampFormat},
    log_entry::LogEntry,
    log_level::LogLevel,
    log_queue::LogQueue,
    metrics::LoggerMetrics,
    sink::EntrySink,
};
use crate::sinks::FileSink;
use crossbeam_channel::{unbounded, Receiver, Sender};
use parking_lot::Mutex;
use std::path::Path;
use std::sync::atomic::{AtomicU8, Ordering};
use std::sync::Arc;
use std::thread::{self, JoinHandle};

/// Name given to the consumer thread unless the builder overrides it
pub const DEFAULT_CONSUMER_THREAD_NAME: &str = "log-consumer";

/// Lifecycle of a [`LoggerService`]. Phases only ever move forward.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Uninitialized = 0,
    Running = 1,
    Terminating = 2,
    Terminated = 3,
}

impl Phase {
    fn from_u8(value: u8) -> Self {
        match value {
            0 => Phase::Uninitialized,
            1 => Phase::Running,
            2 => Phase::Terminating,
            _ => Phase::Terminated,
        }
    }
}

/// Asynchronous logger with a single background consumer.
///
/// Producers call [`log`](Self::log) from any thread; the call returns as
/// soon as the entry is queued. [`terminate`](Self::terminate) is a barrier:
/// it returns only after every entry accepted before it was called has been
/// written and the sink closed.
///
/// # Example
///
/// ```no_run
/// use threaded_logger::prelude::*;
///
/// let logger = LoggerService::new();
/// logger.initialize("application.log")?;
///
/// logger.info("Application started")?;
/// logger.log("Low disk space", LogLevel::Warning)?;
///
/// logger.terminate()?;
/// # Ok::<(), LoggerError>(())
/// ```
pub struct LoggerService {
    queue: Arc<LogQueue>,
    phase: AtomicU8,
    /// Consumer handle; the lock also serializes initialize and terminate
    consumer: Mutex<Option<JoinHandle<ConsumerOutcome>>>,
    metrics: Arc<LoggerMetrics>,
    failure_tx: Sender<SinkFailure>,
    failure_rx: Receiver<SinkFailure>,
    formatter: LineFormatter,
    thread_name: String,
}

impl LoggerService {
    #[must_use]
    pub fn new() -> Self {
        LoggerBuilder::new().build()
    }

    /// Create a builder for LoggerService
    #[must_use]
    pub fn builder() -> LoggerBuilder {
        LoggerBuilder::new()
    }

    fn with_config(thread_name: String, timestamp_format: TimestampFormat) -> Self {
        let (failure_tx, failure_rx) = unbounded();
        Self {
            queue: Arc::new(LogQueue::new()),
            phase: AtomicU8::new(Phase::Uninitialized as u8),
            consumer: Mutex::new(None),
            metrics: Arc::new(LoggerMetrics::new()),
            failure_tx,
            failure_rx,
            formatter: LineFormatter::new(timestamp_format),
            thread_name,
        }
    }

    /// Open (or create) the log file at `path` and start the consumer.
    ///
    /// On error nothing is started and the service stays uninitialized.
    pub fn initialize(&self, path: impl AsRef<Path>) -> Result<()> {
        let mut consumer = self.consumer.lock();
        self.ensure_uninitialized()?;
        self.check_config()?;
        let sink = FileSink::open(path)?;
        self.start(&mut consumer, Box::new(sink))
    }

    /// Start the consumer writing to a caller-provided sink.
    pub fn initialize_with_sink(&self, sink: Box<dyn EntrySink>) -> Result<()> {
        let mut consumer = self.consumer.lock();
        self.ensure_uninitialized()?;
        self.check_config()?;
        self.start(&mut consumer, sink)
    }

    fn ensure_uninitialized(&self) -> Result<()> {
        match self.phase() {
            Phase::Uninitialized => Ok(()),
            _ => Err(LoggerError::AlreadyInitialized),
        }
    }

    /// Runs before any sink is opened.
    fn check_config(&self) -> Result<()> {
        if self.thread_name.contains('\0') {
            return Err(LoggerError::config(
                "LoggerService",
                "consumer thread name must not contain NUL bytes",
            ));
        }
        self.formatter.timestamp_format().validate()
    }

    fn start(
        &self,
        slot: &mut Option<JoinHandle<ConsumerOutcome>>,
        sink: Box<dyn EntrySink>,
    ) -> Result<()> {

        let consumer = Consumer::new(
            Arc::clone(&self.queue),
            sink,
            self.formatter.clone(),
            Arc::clone(&self.metrics),
            self.failure_tx.clone(),
        );
        let handle = thread::Builder::new()
            .name(self.thread_name.clone())
            .spawn(move || consumer.run())?;

        *slot = Some(handle);
        self.set_phase(Phase::Running);
        Ok(())
    }

    /// Queue `message` at `level` for the consumer.
    ///
    /// Returns once the entry is in the queue; it never waits for I/O. An
    /// empty message is ignored.
    pub fn log(&self, message: impl Into<String>, level: LogLevel) -> Result<()> {
        match self.phase() {
            Phase::Uninitialized => return Err(LoggerError::NotInitialized),
            Phase::Terminating | Phase::Terminated => {
                return Err(LoggerError::AlreadyTerminated)
            }
            Phase::Running => {}
        }

        let message = message.into();
        if message.is_empty() {
            self.metrics.record_skipped_empty();
            return Ok(());
        }

        // Rejected here if terminate closed the queue after the phase check.
        self.queue.push(LogEntry::new(message, level))?;
        self.metrics.record_enqueued();
        Ok(())
    }

    #[inline]
    pub fn error(&self, message: impl Into<String>) -> Result<()> {
        self.log(message, LogLevel::Error)
    }

    #[inline]
    pub fn warning(&self, message: impl Into<String>) -> Result<()> {
        self.log(message, LogLevel::Warning)
    }

    #[inline]
    pub fn info(&self, message: impl Into<String>) -> Result<()> {
        self.log(message, LogLevel::Info)
    }

    #[inline]
    pub fn verbose(&self, message: impl Into<String>) -> Result<()> {
        self.log(message, LogLevel::Verbose)
    }

    /// Stop accepting entries, wait for the consumer to write everything
    /// still queued, then close the sink.
    ///
    /// There is no timeout: a sink that never returns keeps this call
    /// blocked. If the sink failed while running, the service still ends up
    /// terminated and the failure is returned as [`LoggerError::SinkFailed`].
    pub fn terminate(&self) -> Result<()> {
        let mut consumer = self.consumer.lock();
        match self.phase() {
            Phase::Uninitialized => return Err(LoggerError::NotInitialized),
            Phase::Terminating | Phase::Terminated => {
                return Err(LoggerError::AlreadyTerminated)
            }
            Phase::Running => {}
        }

        self.set_phase(Phase::Terminating);
        self.queue.close();

        let handle = match consumer.take() {
            Some(handle) => handle,
            None => {
                self.set_phase(Phase::Terminated);
                return Err(LoggerError::other("consumer thread handle missing"));
            }
        };

        let outcome = match handle.join() {
            Ok(outcome) => outcome,
            Err(panic_info) => {
                self.set_phase(Phase::Terminated);
                let panic_msg = panic_message(&*panic_info);
                eprintln!(
                    "[LOGGER ERROR] Log consumer thread panicked during shutdown: {}",
                    panic_msg
                );
                return Err(LoggerError::ConsumerPanicked(panic_msg));
            }
        };

        let ConsumerOutcome { mut sink, failure } = outcome;
        let closed = sink.close();
        drop(sink);
        self.set_phase(Phase::Terminated);

        // A recorded write failure outranks a close error; keep both messages.
        match failure {
            Some(failure) => {
                let message = match closed {
                    Ok(()) => failure.message,
                    Err(e) => format!("{}; close also failed: {}", failure.message, e),
                };
                Err(LoggerError::SinkFailed {
                    sink: failure.sink,
                    message,
                    dropped: self.metrics.dropped_count(),
                })
            }
            None => closed,
        }
    }

    pub fn phase(&self) -> Phase {
        Phase::from_u8(self.phase.load(Ordering::Acquire))
    }

    fn set_phase(&self, phase: Phase) {
        self.phase.store(phase as u8, Ordering::Release);
    }

    pub fn is_running(&self) -> bool {
        self.phase() == Phase::Running
    }

    /// Get the logger metrics for detailed observability
    pub fn metrics(&self) -> &LoggerMetrics {
        &self.metrics
    }

    /// Channel on which sink failures are published as they happen.
    ///
    /// Every receiver shares one stream, so each failure is delivered to
    /// exactly one of them.
    pub fn failures(&self) -> Receiver<SinkFailure> {
        self.failure_rx.clone()
    }

    pub fn consumer_thread_name(&self) -> &str {
        &self.thread_name
    }
}

impl Default for LoggerService {
    fn default() -> Self {
        Self::new()
    }
}

impl Drop for LoggerService {
    fn drop(&mut self) {
        if self.phase() == Phase::Running {
            if let Err(e) = self.terminate() {
                eprintln!("[LOGGER ERROR] Failed to terminate logger during drop: {}", e);
            }
        }

        let dropped = self.metrics.dropped_count();
        if dropped > 0 {
            eprintln!(
                "[LOGGER WARNING] Logger shut down with {} dropped entries (drop rate: {:.2}%)",
                dropped,
                self.metrics.drop_rate()
            );
        }
    }
}

/// Builder for constructing LoggerService with a fluent API
///
/// # Example
/// ```
/// use threaded_logger::prelude::*;
///
/// let logger = LoggerService::builder()
///     .consumer_thread_name("Consumer thread")
///     .timestamp_format(TimestampFormat::Custom("%H:%M:%S%.3f".to_string()))
///     .build();
/// assert_eq!(logger.phase(), Phase::Uninitialized);
/// ```
pub struct LoggerBuilder {
    thread_name: String,
    timestamp_format: TimestampFormat,
}

impl LoggerBuilder {
    /// Create a new builder with default values
    pub fn new() -> Self {
        Self {
            thread_name: DEFAULT_CONSUMER_THREAD_NAME.to_string(),
            timestamp_format: TimestampFormat::default(),
        }
    }

    /// Set the name of the background consumer thread
    #[must_use = "builder methods return a new value"]
    pub fn consumer_thread_name(mut self, name: impl Into<String>) -> Self {
        self.thread_name = name.into();
        self
    }

    /// Set the timestamp written at the start of every line
    ///
    /// Default is `TimestampFormat::Clock` (`HH:mm:ss`).
    #[must_use = "builder methods return a new value"]
    pub fn timestamp_format(mut self, format: TimestampFormat) -> Self {
        self.timestamp_format = format;
        self
    }

    /// Build an uninitialized LoggerService
    pub fn build(self) -> LoggerService {
        LoggerService::with_config(self.thread_name, self.timestamp_format)
    }
}

impl Default for LoggerBuilder {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sinks::MemorySink;
    use std::time::Duration;

    fn running_with_memory() -> (LoggerService, MemorySink) {
        let sink = MemorySink::new();
        let logger = LoggerService::new();
        logger
            .initialize_with_sink(Box::new(sink.clone()))
            .expect("initialize");
        (logger, sink)
    }

    #[test]
    fn test_service_is_send_and_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<LoggerService>();
    }

    #[test]
    fn test_lifecycle_phases() {
        let sink = MemorySink::new();
        let logger = LoggerService::new();
        assert_eq!(logger.phase(), Phase::Uninitialized);

        logger.initialize_with_sink(Box::new(sink.clone())).unwrap();
        assert_eq!(logger.phase(), Phase::Running);
        assert!(logger.is_running());

        logger.info("hello").unwrap();
        logger.terminate().unwrap();
        assert_eq!(logger.phase(), Phase::Terminated);
        assert!(sink.is_closed());
        assert_eq!(sink.len(), 1);
    }

    #[test]
    fn test_log_before_initialize_is_usage_error() {
        let logger = LoggerService::new();
        let err = logger.info("too early").unwrap_err();
        assert!(matches!(err, LoggerError::NotInitialized));
        assert!(err.is_usage());
        assert!(matches!(logger.terminate(), Err(LoggerError::NotInitialized)));
    }

    #[test]
    fn test_second_initialize_fails_fast() {
        let (logger, _sink) = running_with_memory();
        let err = logger
            .initialize_with_sink(Box::new(MemorySink::new()))
            .unwrap_err();
        assert!(matches!(err, LoggerError::AlreadyInitialized));
        assert!(logger.is_running());
    }

    #[test]
    fn test_usage_errors_after_terminate() {
        let (logger, sink) = running_with_memory();
        logger.terminate().unwrap();

        assert!(matches!(logger.info("late"), Err(LoggerError::AlreadyTerminated)));
        assert!(matches!(logger.terminate(), Err(LoggerError::AlreadyTerminated)));
        assert!(matches!(
            logger.initialize_with_sink(Box::new(MemorySink::new())),
            Err(LoggerError::AlreadyInitialized)
        ));
        assert!(sink.is_empty());
    }

    #[test]
    fn test_empty_message_is_skipped() {
        let (logger, sink) = running_with_memory();
        logger.info("").unwrap();
        assert_eq!(logger.metrics().skipped_empty(), 1);
        assert_eq!(logger.metrics().enqueued(), 0);

        logger.terminate().unwrap();
        assert!(sink.is_empty());
    }

    #[test]
    fn test_nul_in_thread_name_is_configuration_error() {
        let logger = LoggerService::builder()
            .consumer_thread_name("bad\0name")
            .build();
        let err = logger
            .initialize_with_sink(Box::new(MemorySink::new()))
            .unwrap_err();
        assert!(err.is_configuration());
        assert_eq!(logger.phase(), Phase::Uninitialized);
    }

    #[test]
    fn test_consumer_thread_is_named() {
        struct ThreadNameSink(Arc<Mutex<Option<String>>>);

        impl EntrySink for ThreadNameSink {
            fn write_line(&mut self, _line: &str) -> Result<()> {
                *self.0.lock() = thread::current().name().map(String::from);
                Ok(())
            }

            fn name(&self) -> &str {
                "thread-name"
            }
        }

        let seen = Arc::new(Mutex::new(None));
        let logger = LoggerService::builder()
            .consumer_thread_name("Consumer thread")
            .build();
        logger
            .initialize_with_sink(Box::new(ThreadNameSink(Arc::clone(&seen))))
            .unwrap();
        logger.info("which thread?").unwrap();
        logger.terminate().unwrap();

        assert_eq!(seen.lock().as_deref(), Some("Consumer thread"));
    }

    #[test]
    fn test_invalid_timestamp_format_fails_initialize() {
        let logger = LoggerService::builder()
            .timestamp_format(TimestampFormat::Custom("%Q".to_string()))
            .build();
        let err = logger
            .initialize_with_sink(Box::new(MemorySink::new()))
            .unwrap_err();
        assert!(err.is_configuration());
        assert_eq!(logger.phase(), Phase::Uninitialized);
        assert!(matches!(logger.info("never queued"), Err(LoggerError::NotInitialized)));
    }

    #[test]
    fn test_write_failure_reported_even_when_close_fails() {
        struct BrokenDisk;

        impl EntrySink for BrokenDisk {
            fn write_line(&mut self, _line: &str) -> Result<()> {
                Err(LoggerError::writer("no space left on device"))
            }

            fn close(&mut self) -> Result<()> {
                Err(LoggerError::writer("flush on close failed"))
            }

            fn name(&self) -> &str {
                "broken-disk"
            }
        }

        let logger = LoggerService::new();
        logger.initialize_with_sink(Box::new(BrokenDisk)).unwrap();
        logger.error("first").unwrap();
        logger.error("second").unwrap();

        match logger.terminate() {
            Err(LoggerError::SinkFailed { sink, message, dropped }) => {
                assert_eq!(sink, "broken-disk");
                assert!(message.contains("no space left on device"));
                assert!(message.contains("flush on close failed"));
                assert_eq!(dropped, 2);
            }
            other => panic!("expected SinkFailed, got {:?}", other),
        }
        assert_eq!(logger.phase(), Phase::Terminated);
    }

    #[test]
    fn test_close_error_returned_without_write_failure() {
        struct CloseFails;

        impl EntrySink for CloseFails {
            fn write_line(&mut self, _line: &str) -> Result<()> {
                Ok(())
            }

            fn close(&mut self) -> Result<()> {
                Err(LoggerError::writer("close failed"))
            }

            fn name(&self) -> &str {
                "close-fails"
            }
        }

        let logger = LoggerService::new();
        logger.initialize_with_sink(Box::new(CloseFails)).unwrap();
        logger.info("written").unwrap();
        assert!(matches!(logger.terminate(), Err(LoggerError::Writer(_))));
    }

    #[test]
    fn test_drop_terminates_running_service() {
        let sink = MemorySink::new();
        {
            let logger = LoggerService::new();
            logger.initialize_with_sink(Box::new(sink.clone())).unwrap();
            for i in 0..10 {
                logger.verbose(format!("entry {}", i)).unwrap();
            }
        }
        assert!(sink.is_closed());
        assert_eq!(sink.len(), 10);
    }

    #[test]
    fn test_consumer_parks_until_work_arrives() {
        let (logger, _sink) = running_with_memory();
        std::thread::sleep(Duration::from_millis(50));
        assert_eq!(logger.metrics().wakeups(), 0);

        logger.warning("wake").unwrap();
        logger.terminate().unwrap();
        assert!(logger.metrics().wakeups() >= 1);
        assert_eq!(logger.metrics().written(), 1);
    }
}
