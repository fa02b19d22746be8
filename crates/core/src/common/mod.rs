//! Common types shared across the simulator.
//!
//! This module provides the building blocks the rest of the crate is written
//! in terms of. It includes:
//! 1. **Address Math:** geometry-driven tag/index/offset decomposition.
//! 2. **Access Classification:** the kinds of trace events and the names of
//!    the hierarchy levels.
//! 3. **Error Handling:** configuration and trace input error types.

/// Address decomposition and recomposition.
pub mod addr;

/// Access kind and cache level identifiers.
pub mod data;

/// Error types for configuration validation and trace input.
pub mod error;

pub use addr::{AddressParts, Geometry};
pub use data::{AccessKind, Level};
pub use error::{ConfigError, TraceError};
