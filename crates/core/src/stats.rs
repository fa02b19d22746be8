//! Hit/miss accounting and the end-of-run report.
//!
//! Counters accumulate per level during simulation; the report is a pure
//! snapshot over the final values. Rates follow the convention
//! `100 x hits / total`, with `0.0` for a level that saw no probes of the
//! given kind.

use crate::common::Level;
use crate::config::ReplacementPolicy;

/// Per-level probe counters.
///
/// Every probe submitted to a level increments exactly one of these four
/// counters; fills are not probes and increment nothing.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct AccessCounters {
    /// Read probes that hit.
    pub read_hit: u64,
    /// Read probes that missed.
    pub read_miss: u64,
    /// Write probes that hit.
    pub write_hit: u64,
    /// Write probes that missed.
    pub write_miss: u64,
}

impl AccessCounters {
    /// Total read probes.
    pub fn reads(&self) -> u64 {
        self.read_hit + self.read_miss
    }

    /// Total write probes.
    pub fn writes(&self) -> u64 {
        self.write_hit + self.write_miss
    }

    /// Total probes of either kind.
    pub fn total(&self) -> u64 {
        self.reads() + self.writes()
    }

    /// Read hit percentage; `0.0` when no reads occurred.
    pub fn read_hit_rate(&self) -> f64 {
        Self::rate(self.read_hit, self.reads())
    }

    /// Write hit percentage; `0.0` when no writes occurred.
    pub fn write_hit_rate(&self) -> f64 {
        Self::rate(self.write_hit, self.writes())
    }

    /// Combined hit percentage; `0.0` when the level saw no probes.
    pub fn hit_rate(&self) -> f64 {
        Self::rate(self.read_hit + self.write_hit, self.total())
    }

    fn rate(hits: u64, total: u64) -> f64 {
        if total > 0 {
            100.0 * hits as f64 / total as f64
        } else {
            0.0
        }
    }
}

/// Final statistics for one level.
#[derive(Clone, Copy, Debug)]
pub struct LevelReport {
    /// Which level the counters belong to.
    pub level: Level,
    /// The level's probe counters.
    pub counters: AccessCounters,
    /// The replacement policy the level was configured with.
    pub policy: ReplacementPolicy,
}

/// End-of-run report: per-level counters plus the executed event count.
#[derive(Clone, Debug)]
pub struct SimReport {
    /// One entry per level, in probe order (L1I, L1D, L2).
    pub levels: Vec<LevelReport>,
    /// Number of trace events executed (fetches, reads, and writes).
    pub instructions: u64,
}

impl SimReport {
    /// Prints the report to stdout.
    ///
    /// One line of absolute counters and one line of percentages per level,
    /// a note for any level whose reserved replacement policy was simulated
    /// as LRU, and the executed-instruction count.
    pub fn print(&self) {
        println!("==========================================================");
        println!("CACHE HIERARCHY SIMULATION STATISTICS");
        println!("==========================================================");
        for entry in &self.levels {
            let name = entry.level.as_str();
            let c = &entry.counters;
            println!(
                "  {name:<4} read_hits: {:<9} read_misses: {:<9} write_hits: {:<9} write_misses: {:<9}",
                c.read_hit, c.read_miss, c.write_hit, c.write_miss
            );
            println!(
                "       read_hit%: {:6.2}   write_hit%: {:6.2}   hit%: {:6.2}",
                c.read_hit_rate(),
                c.write_hit_rate(),
                c.hit_rate()
            );
        }
        for entry in &self.levels {
            if entry.policy == ReplacementPolicy::TemporalSpatial {
                println!(
                    "  note: {} requested TEMPORAL_SPATIAL replacement; simulated as LRU",
                    entry.level
                );
            }
        }
        println!("----------------------------------------------------------");
        println!("Executed {} instructions.", self.instructions);
        println!("==========================================================");
    }
}
