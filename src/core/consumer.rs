//! Background consumer loop
//!
//! The consumer owns the sink for as long as it runs. It parks on the queue,
//! writes each drained batch in order, and after observing the termination
//! flag performs one last drain before exiting.

use super::{
    formatter::LineFormatter,
    log_entry::LogEntry,
    log_queue::LogQueue,
    metrics::LoggerMetrics,
    sink::EntrySink,
};
use crossbeam_channel::Sender;
use std::any::Any;
use std::panic::{catch_unwind, AssertUnwindSafe};
use std::sync::Arc;

/// Report published on the failure channel when the sink stops working.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SinkFailure {
    /// Name of the failing sink
    pub sink: String,
    /// Error or panic message
    pub message: String,
}

/// Extract a readable message from a panic payload
pub(crate) fn panic_message(panic_info: &(dyn Any + Send)) -> String {
    if let Some(s) = panic_info.downcast_ref::<&str>() {
        s.to_string()
    } else if let Some(s) = panic_info.downcast_ref::<String>() {
        s.clone()
    } else {
        "Unknown panic".to_string()
    }
}

/// What the consumer hands back to the service once it has exited.
pub(crate) struct ConsumerOutcome {
    pub sink: Box<dyn EntrySink>,
    pub failure: Option<SinkFailure>,
}

pub(crate) struct Consumer {
    queue: Arc<LogQueue>,
    sink: Box<dyn EntrySink>,
    formatter: LineFormatter,
    metrics: Arc<LoggerMetrics>,
    failures: Sender<SinkFailure>,
    failure: Option<SinkFailure>,
}

impl Consumer {
    pub fn new(
        queue: Arc<LogQueue>,
        sink: Box<dyn EntrySink>,
        formatter: LineFormatter,
        metrics: Arc<LoggerMetrics>,
        failures: Sender<SinkFailure>,
    ) -> Self {
        Self {
            queue,
            sink,
            formatter,
            metrics,
            failures,
            failure: None,
        }
    }

    pub fn run(mut self) -> ConsumerOutcome {
        loop {
            let drain = self.queue.drain_or_wait();
            self.metrics.record_wakeup();
            self.write_batch(drain.entries);

            // The flag is checked after the batch is written; anything pushed
            // between the wake and this check is picked up by the final drain.
            if self.queue.is_closed() {
                let remaining = self.queue.drain();
                self.write_batch(remaining.entries);
                break;
            }
        }

        ConsumerOutcome {
            sink: self.sink,
            failure: self.failure,
        }
    }

    fn write_batch(&mut self, batch: Vec<LogEntry>) {
        if batch.is_empty() {
            return;
        }
        self.metrics.record_batch();

        for entry in batch {
            if self.failure.is_some() {
                self.metrics.record_dropped();
                continue;
            }

            let formatter = &self.formatter;
            let sink = &mut self.sink;
            match catch_unwind(AssertUnwindSafe(|| {
                let line = formatter.format(&entry);
                sink.write_line(&line)
            })) {
                Ok(Ok(())) => {
                    self.metrics.record_written();
                }
                Ok(Err(e)) => {
                    eprintln!(
                        "[LOGGER ERROR] Sink '{}' failed: {}. Further entries will be dropped.",
                        self.sink.name(),
                        e
                    );
                    self.fail(e.to_string());
                }
                Err(panic_info) => {
                    let panic_msg = panic_message(&*panic_info);
                    eprintln!(
                        "[LOGGER CRITICAL] Writing to sink '{}' panicked: {}. Further entries will be dropped.",
                        self.sink.name(),
                        panic_msg
                    );
                    self.fail(panic_msg);
                }
            }
        }
    }

    fn fail(&mut self, message: String) {
        self.metrics.record_dropped();
        let failure = SinkFailure {
            sink: self.sink.name().to_string(),
            message,
        };
        // Nobody listening is fine; the failure is also returned by terminate.
        let _ = self.failures.send(failure.clone());
        self.failure = Some(failure);
    }
}
