//! Lock-guarded hand-off queue between producers and the consumer
//!
//! Producers append with [`LogQueue::push`]; the single consumer parks in
//! [`LogQueue::drain_or_wait`] until there is work or the queue is closed,
//! then takes everything queued as one batch.

use super::error::{LoggerError, Result};
use super::log_entry::LogEntry;
use parking_lot::{Condvar, Mutex};
use std::collections::VecDeque;
use std::mem;
use std::time::Duration;

struct QueueState {
    entries: VecDeque<LogEntry>,
    closed: bool,
}

/// Everything the consumer removed in one drain, plus the termination flag
/// as it was observed under the same lock acquisition.
#[derive(Debug, Default)]
pub struct Drain {
    /// Removed entries, oldest first
    pub entries: Vec<LogEntry>,
    /// Whether the queue had been closed when the batch was taken
    pub closed: bool,
}

impl Drain {
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Unbounded FIFO guarded by a single mutex.
///
/// The entry sequence and the closed flag are only touched with the lock
/// held. There is no capacity limit and no backpressure.
pub struct LogQueue {
    state: Mutex<QueueState>,
    available: Condvar,
}

impl LogQueue {
    pub fn new() -> Self {
        Self {
            state: Mutex::new(QueueState {
                entries: VecDeque::new(),
                closed: false,
            }),
            available: Condvar::new(),
        }
    }

    /// Append `entry` at the tail and wake the consumer.
    ///
    /// Fails only once [`close`](Self::close) has run. An entry accepted here
    /// is always seen by the consumer's final drain.
    pub fn push(&self, entry: LogEntry) -> Result<()> {
        let mut state = self.state.lock();
        if state.closed {
            return Err(LoggerError::AlreadyTerminated);
        }
        state.entries.push_back(entry);
        // One consumer, so signalling one waiter is enough.
        self.available.notify_one();
        Ok(())
    }

    /// Block until entries are queued or the queue is closed, then remove
    /// all of them as one ordered batch.
    ///
    /// Must only be called from the single consumer. A wake caused by
    /// [`close`](Self::close) alone yields an empty batch.
    pub fn drain_or_wait(&self) -> Drain {
        let mut state = self.state.lock();
        while state.entries.is_empty() && !state.closed {
            self.available.wait(&mut state);
        }
        Self::take_all(&mut state)
    }

    /// Like [`drain_or_wait`](Self::drain_or_wait) but gives up after
    /// `timeout`, returning whatever is queued at that point.
    pub fn drain_or_wait_timeout(&self, timeout: Duration) -> Drain {
        let mut state = self.state.lock();
        if state.entries.is_empty() && !state.closed {
            // wait_while_for re-checks the predicate on spurious wakeups
            let _ = self.available.wait_while_for(
                &mut state,
                |state| state.entries.is_empty() && !state.closed,
                timeout,
            );
        }
        Self::take_all(&mut state)
    }

    /// Remove everything currently queued without waiting.
    pub fn drain(&self) -> Drain {
        let mut state = self.state.lock();
        Self::take_all(&mut state)
    }

    /// Set the termination flag and issue the final wake.
    pub fn close(&self) {
        let mut state = self.state.lock();
        state.closed = true;
        self.available.notify_one();
    }

    pub fn is_closed(&self) -> bool {
        self.state.lock().closed
    }

    pub fn len(&self) -> usize {
        self.state.lock().entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.state.lock().entries.is_empty()
    }

    fn take_all(state: &mut QueueState) -> Drain {
        Drain {
            entries: Vec::from(mem::take(&mut state.entries)),
            closed: state.closed,
        }
    }
}

impl Default for LogQueue {
    fn default() -> Self {
        Self::new()
    }
}
