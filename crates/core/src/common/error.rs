//! Error types for configuration validation and trace input.
//!
//! All failures in this simulator are fatal: a configuration error aborts
//! before any storage is allocated, and a trace error aborts the run with no
//! partial statistics. Nothing is retried or recovered locally.

use thiserror::Error;

use super::data::Level;

/// A fatal configuration error detected before simulation starts.
///
/// Each variant names the offending level and parameter so the driver can
/// report a single descriptive line on standard error and exit non-zero.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    /// A geometry parameter that must be a power of two is not.
    #[error("{level}: {param} must be a non-zero power of two (got {value})")]
    NotPowerOfTwo {
        /// The cache level carrying the bad parameter.
        level: Level,
        /// The parameter name as it appears in the configuration.
        param: &'static str,
        /// The rejected value.
        value: usize,
    },

    /// Associativity of zero leaves no lines to fill.
    #[error("{level}: associativity must be at least 1")]
    ZeroAssociativity {
        /// The cache level carrying the bad parameter.
        level: Level,
    },

    /// The size, line size, and associativity do not divide into a whole
    /// number of sets.
    #[error(
        "{level}: size_bytes {size} is not divisible by line_bytes {line} x ways {ways}"
    )]
    GeometryMismatch {
        /// The cache level carrying the inconsistent geometry.
        level: Level,
        /// Configured total size in bytes.
        size: usize,
        /// Configured line size in bytes.
        line: usize,
        /// Configured associativity.
        ways: usize,
    },

    /// The mapping variant contradicts the rest of the geometry.
    #[error("{level}: {detail}")]
    MappingMismatch {
        /// The cache level carrying the contradiction.
        level: Level,
        /// Human-readable description of the contradiction.
        detail: String,
    },

    /// The configuration file could not be parsed.
    #[error("configuration parse error: {0}")]
    Parse(String),
}

/// An error while reading the binary trace stream.
#[derive(Debug, Error)]
pub enum TraceError {
    /// The underlying reader failed.
    #[error("trace input: {0}")]
    Io(#[from] std::io::Error),

    /// The stream ended in the middle of a record.
    #[error("truncated trace record at byte offset {offset}")]
    Truncated {
        /// Byte offset of the start of the incomplete record.
        offset: u64,
    },
}
