//! Trace-driven CPU cache hierarchy simulator library.
//!
//! This crate implements a configurable multi-level cache hierarchy driven by a
//! recorded memory-access trace. It provides:
//! 1. **Hierarchy:** split L1 (instruction/data) and unified L2 caches over an
//!    always-hitting main memory, with per-level hit/miss accounting.
//! 2. **Policies:** write-through and write-back write policies; LRU and
//!    random replacement, with dirty evictions cascading toward memory.
//! 3. **Configuration:** JSON-deserializable geometry and policy settings,
//!    validated before any cache storage is allocated.
//! 4. **Trace input:** a reader for the fixed-size binary trace record format
//!    and a driver loop that replays records against a hierarchy.
//! 5. **Statistics:** per-level hit-rate reporting plus the executed event
//!    count.

/// Common types (address decomposition, access kinds, level names, errors).
pub mod common;
/// Simulator configuration (defaults, enums, per-level settings, validation).
pub mod config;
/// The cache data model and the hierarchy controller.
pub mod hierarchy;
/// Trace record format and the trace-replay driver.
pub mod sim;
/// Hit/miss counters and the end-of-run report.
pub mod stats;

/// Root configuration type; use `Config::default()` or deserialize from JSON.
pub use crate::config::Config;
/// The three-level cache hierarchy; owns all cache storage for a run.
pub use crate::hierarchy::Hierarchy;
/// Streaming reader over a binary address trace.
pub use crate::sim::trace::TraceReader;
/// End-of-run statistics snapshot.
pub use crate::stats::SimReport;
