//! Trace input and replay.
//!
//! 1. **`trace`:** the fixed-size binary record format and a streaming
//!    reader over it.
//! 2. **`driver`:** the loop that replays records against a hierarchy.

/// The trace-replay driver loop.
pub mod driver;

/// Binary trace record format and reader.
pub mod trace;

pub use driver::{RunSummary, run};
pub use trace::{TraceReader, TraceRecord};
