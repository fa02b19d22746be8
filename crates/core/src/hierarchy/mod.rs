//! The cache hierarchy controller.
//!
//! Owns the three cache levels and implements the fetch/read/write flows
//! over them: probe L1, fall through to L2 on miss, fill upward, and apply
//! the configured write policy at L1D. Main memory is implicit and never
//! misses, so the lowest level's misses and writebacks are absorbed
//! silently.
//!
//! Every probe increments exactly one counter on the probed level; fills
//! increment nothing. Within one event, eviction-induced writebacks are
//! processed depth-first before the originating insert completes.

/// The cache data model (lines, sets, levels, replacement policies).
pub mod cache;

use self::cache::Cache;
use crate::common::{ConfigError, Level};
use crate::config::{Config, WritePolicy};
use crate::stats::{LevelReport, SimReport};

/// A three-level cache hierarchy over an always-hitting main memory.
///
/// All cache storage is allocated at construction and freed when the value
/// drops; the access paths allocate nothing. The hierarchy is strictly
/// single-threaded: each event runs to completion, including any writeback
/// cascade, before the next is accepted. Hosts that want to parallelize
/// multi-trace runs allocate one hierarchy per worker.
pub struct Hierarchy {
    l1_i: Cache,
    l1_d: Cache,
    l2: Cache,
    instructions: u64,
}

impl Hierarchy {
    /// Builds the hierarchy from a configuration, validating every level
    /// before allocating its storage.
    pub fn new(config: &Config) -> Result<Self, ConfigError> {
        Ok(Self {
            l1_i: Cache::new(Level::L1I, &config.l1_i)?,
            l1_d: Cache::new(Level::L1D, &config.l1_d)?,
            l2: Cache::new(Level::L2, &config.l2)?,
            instructions: 0,
        })
    }

    /// Instruction fetch at `addr`.
    ///
    /// Probes L1I, then L2 on miss, filling the missing levels. Returns the
    /// fetched data, which is always zero: the simulator models presence,
    /// not contents.
    pub fn fetch(&mut self, addr: u64) -> u64 {
        Self::read_through(&mut self.l1_i, &mut self.l2, addr);
        self.instructions += 1;
        0
    }

    /// Data read at `addr`; the same flow as [`fetch`](Self::fetch) via L1D.
    pub fn read(&mut self, addr: u64) -> u64 {
        Self::read_through(&mut self.l1_d, &mut self.l2, addr);
        self.instructions += 1;
        0
    }

    /// Data write at `addr`.
    ///
    /// `data` is accepted for interface parity and ignored; behavior depends
    /// on the L1D write policy.
    pub fn write(&mut self, addr: u64, _data: u64) {
        match self.l1_d.write_policy() {
            WritePolicy::WriteThrough => Self::write_through(&mut self.l1_d, &mut self.l2, addr),
            WritePolicy::WriteBack => Self::write_back(&mut self.l1_d, &mut self.l2, addr),
        }
        self.instructions += 1;
    }

    /// Number of trace events executed so far.
    pub fn instructions(&self) -> u64 {
        self.instructions
    }

    /// The L1 instruction cache.
    pub fn l1_i(&self) -> &Cache {
        &self.l1_i
    }

    /// The L1 data cache.
    pub fn l1_d(&self) -> &Cache {
        &self.l1_d
    }

    /// The unified L2 cache.
    pub fn l2(&self) -> &Cache {
        &self.l2
    }

    /// Snapshots the final counters into a report.
    pub fn report(&self) -> SimReport {
        let entry = |cache: &Cache| LevelReport {
            level: cache.level(),
            counters: cache.counters,
            policy: cache.policy_kind(),
        };
        SimReport {
            levels: vec![entry(&self.l1_i), entry(&self.l1_d), entry(&self.l2)],
            instructions: self.instructions,
        }
    }

    /// Read probe of `l1` with L2 behind it.
    ///
    /// A hit stops at L1. A miss probes L2; on an L2 miss the block is
    /// installed into L2 first, and either way the L1 fill completes last,
    /// with L2 standing by to absorb a dirty victim.
    fn read_through(l1: &mut Cache, l2: &mut Cache, addr: u64) {
        if let Some(way) = l1.lookup(addr) {
            l1.counters.read_hit += 1;
            l1.touch(addr, way);
            return;
        }
        l1.counters.read_miss += 1;

        if let Some(way) = l2.lookup(addr) {
            l2.counters.read_hit += 1;
            l2.touch(addr, way);
        } else {
            l2.counters.read_miss += 1;
            l2.insert(addr, false, None);
        }
        l1.insert(addr, false, Some(l2));
    }

    /// Write with a write-through L1D.
    ///
    /// Every write also probes L2 so the block ends up present there; no
    /// line at any level ever becomes dirty.
    fn write_through(l1_d: &mut Cache, l2: &mut Cache, addr: u64) {
        let l1_hit = match l1_d.lookup(addr) {
            Some(way) => {
                l1_d.counters.write_hit += 1;
                l1_d.touch(addr, way);
                true
            }
            None => {
                l1_d.counters.write_miss += 1;
                false
            }
        };

        if let Some(way) = l2.lookup(addr) {
            l2.counters.write_hit += 1;
            l2.touch(addr, way);
        } else {
            l2.counters.write_miss += 1;
            l2.insert(addr, false, None);
        }

        if !l1_hit {
            l1_d.insert(addr, false, Some(l2));
        }
    }

    /// Write with a write-back L1D.
    ///
    /// A hit dirties the L1D line in place and goes no further. A miss
    /// write-allocates into L1D (dirty), then probes L2 and fills it clean
    /// on miss; the L2 copy stays clean until the dirty L1D line is later
    /// evicted.
    fn write_back(l1_d: &mut Cache, l2: &mut Cache, addr: u64) {
        if let Some(way) = l1_d.lookup(addr) {
            l1_d.counters.write_hit += 1;
            l1_d.touch(addr, way);
            l1_d.mark_dirty(addr);
            return;
        }
        l1_d.counters.write_miss += 1;
        l1_d.insert(addr, true, Some(l2));

        if let Some(way) = l2.lookup(addr) {
            l2.counters.write_hit += 1;
            l2.touch(addr, way);
        } else {
            l2.counters.write_miss += 1;
            l2.insert(addr, false, None);
        }
    }
}
