//! Sink implementations

pub mod file;
pub mod memory;

pub use file::FileSink;
pub use memory::MemorySink;

pub use crate::core::EntrySink;
