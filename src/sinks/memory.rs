//! In-memory sink

use crate::core::{EntrySink, LoggerError, Result};
use parking_lot::Mutex;
use std::sync::Arc;

#[derive(Default)]
struct MemoryState {
    lines: Vec<String>,
    closed: bool,
}

/// Collects lines in memory. Clones share the same buffer, so a test can
/// keep one handle while the logger owns the other.
#[derive(Clone, Default)]
pub struct MemorySink {
    state: Arc<Mutex<MemoryState>>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of every line written so far
    pub fn lines(&self) -> Vec<String> {
        self.state.lock().lines.clone()
    }

    pub fn len(&self) -> usize {
        self.state.lock().lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.state.lock().lines.is_empty()
    }

    pub fn is_closed(&self) -> bool {
        self.state.lock().closed
    }
}

impl EntrySink for MemorySink {
    fn write_line(&mut self, line: &str) -> Result<()> {
        let mut state = self.state.lock();
        if state.closed {
            return Err(LoggerError::writer("Memory sink already closed"));
        }
        state.lines.push(line.to_string());
        Ok(())
    }

    fn close(&mut self) -> Result<()> {
        self.state.lock().closed = true;
        Ok(())
    }

    fn name(&self) -> &str {
        "memory"
    }
}
