//! Cache data model: lines, sets, and a single cache level.
//!
//! A `Cache` owns its pre-allocated sets and lines, its address geometry,
//! its write policy, and its replacement policy. The hierarchy controller
//! drives it through `lookup` (pure), `touch`/`mark_dirty` (metadata
//! updates), and `insert` (fill, with replacement and a depth-first
//! writeback of dirty victims into the next level).

/// Cache replacement policy implementations (LRU, Random).
pub mod policies;

use self::policies::{LruPolicy, RandomPolicy, ReplacementPolicy};
use crate::common::{AddressParts, ConfigError, Geometry, Level};
use crate::config::{CacheLevelConfig, ReplacementPolicy as PolicyKind, WritePolicy};
use crate::stats::AccessCounters;

/// One slot in a set: validity, stored tag, and dirty state.
///
/// An invalid line is always clean and its tag is meaningless; once valid,
/// the tag identifies the block resident in the slot.
#[derive(Clone, Copy, Debug, Default)]
pub struct CacheLine {
    /// Whether the slot holds a block.
    pub valid: bool,
    /// High-order address bits of the resident block.
    pub tag: u64,
    /// Whether the block has been modified relative to the next level.
    pub dirty: bool,
}

/// A group of `ways` lines sharing one index.
#[derive(Clone, Debug, Default)]
pub struct CacheSet {
    /// The lines of the set, in way order.
    pub lines: Vec<CacheLine>,
}

/// A single cache level.
///
/// Holds no references to other levels: when an eviction must write back, the
/// controller passes the downstream cache in as a parameter, so the ownership
/// graph stays acyclic.
pub struct Cache {
    level: Level,
    geometry: Geometry,
    write_policy: WritePolicy,
    /// The configured policy kind, kept for reporting (the reserved
    /// temporal/spatial policy is simulated as LRU).
    policy_kind: PolicyKind,
    policy: Box<dyn ReplacementPolicy + Send + Sync>,
    sets: Vec<CacheSet>,
    /// Hit/miss counters for every probe submitted to this level.
    pub counters: AccessCounters,
}

impl Cache {
    /// Builds a cache level from its configuration, pre-allocating every set
    /// and line.
    ///
    /// Validation runs first; a misconfigured geometry is a fatal error and
    /// no storage is allocated for it.
    pub fn new(level: Level, cfg: &CacheLevelConfig) -> Result<Self, ConfigError> {
        cfg.validate(level)?;
        let num_sets = cfg.num_sets();
        let geometry = Geometry::new(cfg.line_bytes, num_sets, cfg.ways);

        let policy: Box<dyn ReplacementPolicy + Send + Sync> = match cfg.replacement_policy {
            PolicyKind::Random => Box::new(RandomPolicy::new(num_sets, cfg.ways)),
            PolicyKind::Lru | PolicyKind::TemporalSpatial => {
                Box::new(LruPolicy::new(num_sets, cfg.ways))
            }
        };

        tracing::debug!(
            %level,
            size_bytes = cfg.size_bytes,
            line_bytes = cfg.line_bytes,
            ways = cfg.ways,
            num_sets,
            "cache allocated"
        );

        Ok(Self {
            level,
            geometry,
            write_policy: cfg.write_policy,
            policy_kind: cfg.replacement_policy,
            policy,
            sets: vec![
                CacheSet {
                    lines: vec![CacheLine::default(); cfg.ways],
                };
                num_sets
            ],
            counters: AccessCounters::default(),
        })
    }

    /// Which level this cache is.
    pub fn level(&self) -> Level {
        self.level
    }

    /// The cache's address geometry.
    pub fn geometry(&self) -> &Geometry {
        &self.geometry
    }

    /// The cache's write policy.
    pub fn write_policy(&self) -> WritePolicy {
        self.write_policy
    }

    /// The replacement policy the cache was configured with.
    pub fn policy_kind(&self) -> PolicyKind {
        self.policy_kind
    }

    /// The sets of this cache, for inspection by reports and tests.
    pub fn sets(&self) -> &[CacheSet] {
        &self.sets
    }

    /// Reports whether the block containing `addr` is resident, returning
    /// the hit way.
    ///
    /// Pure with respect to cache state; the caller records the probe
    /// outcome and refreshes recency separately.
    pub fn lookup(&self, addr: u64) -> Option<usize> {
        let parts = self.geometry.decode(addr);
        self.sets[parts.index as usize]
            .lines
            .iter()
            .position(|line| line.valid && line.tag == parts.tag)
    }

    /// Refreshes replacement recency for a way previously returned by
    /// [`lookup`](Self::lookup).
    pub fn touch(&mut self, addr: u64, way: usize) {
        let index = self.geometry.decode(addr).index as usize;
        self.policy.update(index, way);
    }

    /// Marks the resident block for `addr` dirty.
    ///
    /// Only meaningful under write-back; a write-through level keeps every
    /// line clean, so the call is a no-op there. A block that is not
    /// resident is left untouched.
    pub fn mark_dirty(&mut self, addr: u64) {
        if self.write_policy != WritePolicy::WriteBack {
            return;
        }
        let parts = self.geometry.decode(addr);
        if let Some(line) = self.sets[parts.index as usize]
            .lines
            .iter_mut()
            .find(|line| line.valid && line.tag == parts.tag)
        {
            line.dirty = true;
        }
    }

    /// Installs the block for `addr`, evicting if the set is full.
    ///
    /// `initial_dirty` is true for a write-allocate under write-back and for
    /// a dirty writeback arriving from the level above; a write-through
    /// level stores the line clean regardless, so no level ever violates
    /// `dirty implies write-back`.
    ///
    /// A block already resident only ORs in the dirty request and allocates
    /// nothing: a set never holds two valid copies of one tag. Otherwise the
    /// lowest invalid way is filled; a full set delegates to the replacement
    /// policy, and a valid dirty victim is written back into `downstream`
    /// before the incoming block lands. `None` downstream means main memory,
    /// which absorbs writebacks silently.
    pub fn insert(&mut self, addr: u64, initial_dirty: bool, downstream: Option<&mut Cache>) {
        let dirty = initial_dirty && self.write_policy == WritePolicy::WriteBack;
        let parts = self.geometry.decode(addr);
        let index = parts.index as usize;

        // Duplicate guard: refresh an already-resident block in place.
        if let Some(way) = self.lookup(addr) {
            self.sets[index].lines[way].dirty |= dirty;
            self.policy.update(index, way);
            return;
        }

        if let Some(way) = self.sets[index].lines.iter().position(|line| !line.valid) {
            self.sets[index].lines[way] = CacheLine {
                valid: true,
                tag: parts.tag,
                dirty,
            };
            self.policy.update(index, way);
            return;
        }

        self.replace(parts, dirty, downstream);
    }

    /// Evicts the policy's victim from a full set and installs the incoming
    /// block in its place, writing a dirty victim back to `downstream`.
    fn replace(&mut self, incoming: AddressParts, dirty: bool, downstream: Option<&mut Cache>) {
        let index = incoming.index as usize;
        let way = self.policy.get_victim(index);
        let victim = self.sets[index].lines[way];

        if victim.valid && victim.dirty {
            let victim_addr = self.geometry.block_addr(victim.tag, incoming.index);
            tracing::trace!(level = %self.level, victim_addr, "dirty writeback");
            if let Some(next) = downstream {
                next.receive_writeback(victim_addr);
            }
            // With no downstream cache the writeback reaches main memory,
            // which never misses.
        }

        self.sets[index].lines[way] = CacheLine {
            valid: true,
            tag: incoming.tag,
            dirty,
        };
        self.policy.update(index, way);
    }

    /// Receives a dirty block evicted from the level above.
    ///
    /// Counted as one write probe on this level: a hit refreshes and
    /// re-dirties the resident copy, a miss installs the block dirty. Any
    /// eviction this causes continues downward to main memory.
    pub fn receive_writeback(&mut self, addr: u64) {
        match self.lookup(addr) {
            Some(way) => {
                self.counters.write_hit += 1;
                let index = self.geometry.decode(addr).index as usize;
                self.sets[index].lines[way].dirty |=
                    self.write_policy == WritePolicy::WriteBack;
                self.policy.update(index, way);
            }
            None => {
                self.counters.write_miss += 1;
                self.insert(addr, true, None);
            }
        }
    }
}
