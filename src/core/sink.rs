//! Sink trait for the durable log destination

use super::error::Result;

/// Anything that can durably append one formatted line.
///
/// The consumer thread is the only caller, so implementations need no
/// internal locking. Each `write_line` must be visible on the medium before
/// it returns.
pub trait EntrySink: Send {
    fn write_line(&mut self, line: &str) -> Result<()>;

    /// Release the underlying resource. Called once, after the consumer exits.
    fn close(&mut self) -> Result<()> {
        Ok(())
    }

    fn name(&self) -> &str;
}
