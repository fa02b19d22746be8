//! Trace replay.
//!
//! Feeds each simulatable record to the hierarchy in order. Every event runs
//! to completion, including its writeback cascade, before the next record is
//! read; there is no buffering and no reordering.

use std::io::Read;

use crate::common::{AccessKind, TraceError};
use crate::hierarchy::Hierarchy;
use crate::sim::trace::TraceReader;

/// Outcome of a completed trace replay.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct RunSummary {
    /// Records replayed as fetch/read/write events.
    pub processed: u64,
    /// Records whose request type the core does not simulate.
    pub ignored: u64,
}

/// Replays every record from `reader` against `hierarchy`.
///
/// Stops at clean end of input; any I/O failure or truncated record aborts
/// the run with the underlying error and no statistics should be emitted.
pub fn run<R: Read>(
    hierarchy: &mut Hierarchy,
    reader: TraceReader<R>,
) -> Result<RunSummary, TraceError> {
    let mut summary = RunSummary::default();
    for record in reader {
        let record = record?;
        match record.kind() {
            Some(AccessKind::Fetch) => {
                let _ = hierarchy.fetch(record.addr);
            }
            Some(AccessKind::Read) => {
                let _ = hierarchy.read(record.addr);
            }
            Some(AccessKind::Write) => hierarchy.write(record.addr, 0),
            None => {
                summary.ignored += 1;
                continue;
            }
        }
        summary.processed += 1;
    }
    Ok(summary)
}
