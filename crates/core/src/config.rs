//! Configuration for the cache hierarchy simulator.
//!
//! This module defines the configuration structures and enums that
//! parameterize a run. It provides:
//! 1. **Defaults:** the reference hierarchy (512 B split L1, 1 KiB unified
//!    L2, 2-way, 64 B lines, LRU, write-back).
//! 2. **Structures:** per-level geometry/policy settings and the three-level
//!    hierarchy configuration.
//! 3. **Enums:** mapping, write policy, and replacement policy variants.
//! 4. **Validation:** power-of-two and consistency checks performed before
//!    any cache storage is allocated.
//!
//! Configuration is supplied as JSON (`Config::from_json_str`) or use
//! `Config::default()` for the reference hierarchy.

use serde::Deserialize;

use crate::common::{ConfigError, Level};

/// Default configuration constants for the simulator.
///
/// These values define the reference hierarchy used when a level is not
/// explicitly configured.
mod defaults {
    /// L1 cache size in bytes (applies to both the instruction and data
    /// caches of the reference hierarchy).
    pub const L1_SIZE: usize = 512;

    /// Unified L2 cache size in bytes.
    pub const L2_SIZE: usize = 1024;

    /// Cache line size in bytes, all levels.
    ///
    /// Matches typical modern processor cache line sizes.
    pub const LINE_BYTES: usize = 64;

    /// Associativity, all levels (2-way set-associative).
    pub const WAYS: usize = 2;

    /// Width in bits of the bus to the next level.
    pub const BUS_WIDTH: usize = 64;
}

/// Block placement schemes.
///
/// Determines how many candidate slots a block has within the cache.
/// Direct mapping is the degenerate set-associative case with one way;
/// fully-associative is the degenerate case with one set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Mapping {
    /// One line per set; the index alone decides placement.
    Direct,
    /// A block may occupy any way of its indexed set.
    #[default]
    SetAssociative,
    /// A single set spanning the whole cache; any block may occupy any line.
    FullyAssociative,
}

/// Write hit/miss handling policies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum WritePolicy {
    /// Every write is propagated to the next level immediately; lines are
    /// never dirty.
    WriteThrough,
    /// Writes dirty the local line; modified blocks reach the next level
    /// only when evicted.
    #[default]
    WriteBack,
}

/// Victim selection algorithms for full sets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum ReplacementPolicy {
    /// Uniformly random victim selection.
    #[serde(alias = "Random")]
    Random,

    /// Least recently used: the line untouched for the longest is evicted.
    #[default]
    #[serde(alias = "Lru")]
    Lru,

    /// Reserved combined temporal/spatial policy.
    ///
    /// Not yet implemented; a level configured with it is simulated with
    /// LRU and the substitution is called out in the final report.
    #[serde(rename = "TEMPORAL_SPATIAL", alias = "TemporalSpatial")]
    TemporalSpatial,
}

/// Geometry and policy settings for a single cache level.
#[derive(Debug, Clone, Deserialize)]
pub struct CacheLevelConfig {
    /// Total capacity in bytes.
    #[serde(default = "CacheLevelConfig::default_size")]
    pub size_bytes: usize,

    /// Line (block) size in bytes; must be a power of two.
    #[serde(default = "CacheLevelConfig::default_line")]
    pub line_bytes: usize,

    /// Associativity (number of ways per set).
    #[serde(default = "CacheLevelConfig::default_ways")]
    pub ways: usize,

    /// Block placement scheme.
    #[serde(default)]
    pub mapping: Mapping,

    /// Victim selection policy.
    #[serde(default)]
    pub replacement_policy: ReplacementPolicy,

    /// Write hit/miss handling policy.
    #[serde(default)]
    pub write_policy: WritePolicy,

    /// Width in bits of the bus to the next level.
    ///
    /// Recorded for completeness; the simulator does not model transfer
    /// timing, so the value never influences hit/miss behavior.
    #[serde(default = "CacheLevelConfig::default_bus_width")]
    pub bus_width: usize,
}

impl CacheLevelConfig {
    /// Returns the default cache capacity in bytes.
    fn default_size() -> usize {
        defaults::L1_SIZE
    }

    /// Returns the default line size in bytes.
    fn default_line() -> usize {
        defaults::LINE_BYTES
    }

    /// Returns the default associativity.
    fn default_ways() -> usize {
        defaults::WAYS
    }

    /// Returns the default bus width in bits.
    fn default_bus_width() -> usize {
        defaults::BUS_WIDTH
    }

    /// The reference L2 configuration (1 KiB, otherwise identical to L1).
    fn default_l2() -> Self {
        Self {
            size_bytes: defaults::L2_SIZE,
            ..Self::default()
        }
    }

    /// Number of sets implied by the geometry.
    ///
    /// Meaningful only after [`validate`](Self::validate) has accepted the
    /// configuration.
    pub fn num_sets(&self) -> usize {
        self.size_bytes / (self.line_bytes * self.ways)
    }

    /// Checks the geometry and policy consistency of this level.
    ///
    /// Rules: `ways >= 1`; `line_bytes` and the derived set count are
    /// non-zero powers of two; `size_bytes` divides exactly into
    /// `num_sets x line_bytes x ways`; direct mapping requires one way and
    /// fully-associative mapping a single set.
    pub fn validate(&self, level: Level) -> Result<(), ConfigError> {
        if self.ways == 0 {
            return Err(ConfigError::ZeroAssociativity { level });
        }
        if self.line_bytes == 0 || !self.line_bytes.is_power_of_two() {
            return Err(ConfigError::NotPowerOfTwo {
                level,
                param: "line_bytes",
                value: self.line_bytes,
            });
        }
        if self.size_bytes == 0 || self.size_bytes % (self.line_bytes * self.ways) != 0 {
            return Err(ConfigError::GeometryMismatch {
                level,
                size: self.size_bytes,
                line: self.line_bytes,
                ways: self.ways,
            });
        }
        let num_sets = self.num_sets();
        if !num_sets.is_power_of_two() {
            return Err(ConfigError::NotPowerOfTwo {
                level,
                param: "derived set count",
                value: num_sets,
            });
        }
        match self.mapping {
            Mapping::Direct if self.ways != 1 => Err(ConfigError::MappingMismatch {
                level,
                detail: format!(
                    "direct mapping requires associativity 1 (got {})",
                    self.ways
                ),
            }),
            Mapping::FullyAssociative if num_sets != 1 => Err(ConfigError::MappingMismatch {
                level,
                detail: format!(
                    "fully-associative mapping requires a single set (got {num_sets})"
                ),
            }),
            _ => Ok(()),
        }
    }
}

impl Default for CacheLevelConfig {
    /// Creates the reference L1 level configuration.
    fn default() -> Self {
        Self {
            size_bytes: defaults::L1_SIZE,
            line_bytes: defaults::LINE_BYTES,
            ways: defaults::WAYS,
            mapping: Mapping::default(),
            replacement_policy: ReplacementPolicy::default(),
            write_policy: WritePolicy::default(),
            bus_width: defaults::BUS_WIDTH,
        }
    }
}

/// Root configuration: one entry per cache level.
///
/// # Examples
///
/// Creating the reference configuration:
///
/// ```
/// use cachesim_core::config::Config;
///
/// let config = Config::default();
/// assert_eq!(config.l1_d.size_bytes, 512);
/// assert_eq!(config.l2.size_bytes, 1024);
/// assert!(config.validate().is_ok());
/// ```
///
/// Deserializing from JSON:
///
/// ```
/// use cachesim_core::config::{Config, WritePolicy};
///
/// let json = r#"{
///     "l1_d": {
///         "size_bytes": 512,
///         "line_bytes": 64,
///         "ways": 2,
///         "write_policy": "write-through"
///     }
/// }"#;
///
/// let config = Config::from_json_str(json).unwrap();
/// assert_eq!(config.l1_d.write_policy, WritePolicy::WriteThrough);
/// assert_eq!(config.l2.size_bytes, 1024);
/// ```
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    /// L1 instruction cache.
    #[serde(default)]
    pub l1_i: CacheLevelConfig,

    /// L1 data cache.
    #[serde(default)]
    pub l1_d: CacheLevelConfig,

    /// Unified second-level cache.
    #[serde(default = "CacheLevelConfig::default_l2")]
    pub l2: CacheLevelConfig,
}

impl Config {
    /// Parses a configuration from JSON and validates every level.
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let config: Self =
            serde_json::from_str(json).map_err(|e| ConfigError::Parse(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Checks every level, reporting the first violation found.
    pub fn validate(&self) -> Result<(), ConfigError> {
        for (level, cfg) in self.levels() {
            cfg.validate(level)?;
        }
        Ok(())
    }

    /// The levels in probe order, paired with their identifiers.
    pub fn levels(&self) -> [(Level, &CacheLevelConfig); 3] {
        [
            (Level::L1I, &self.l1_i),
            (Level::L1D, &self.l1_d),
            (Level::L2, &self.l2),
        ]
    }
}

impl Default for Config {
    /// Creates the reference hierarchy configuration.
    fn default() -> Self {
        Self {
            l1_i: CacheLevelConfig::default(),
            l1_d: CacheLevelConfig::default(),
            l2: CacheLevelConfig::default_l2(),
        }
    }
}
