//! Cache address decomposition.
//!
//! Splits a 64-bit address into `(tag, index, offset)` for a given cache
//! geometry and recomposes a block address from a stored tag. All arithmetic
//! is mask-and-shift on `u64`; the shift widths are derived once from
//! geometry constants that configuration validation has already proven to be
//! powers of two, so decomposition itself is infallible.

/// Per-cache geometry: line size, set count, associativity, and the derived
/// field widths used for address decomposition.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Geometry {
    /// Cache line (block) size in bytes.
    pub line_bytes: usize,
    /// Number of sets.
    pub num_sets: usize,
    /// Associativity (lines per set).
    pub ways: usize,
    /// log2 of the line size; width of the offset field.
    pub offset_bits: u32,
    /// log2 of the set count; width of the index field.
    pub index_bits: u32,
}

/// A transient `(tag, index, offset)` decomposition of one address.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct AddressParts {
    /// High-order bits identifying the block within its set.
    pub tag: u64,
    /// Set selector.
    pub index: u64,
    /// Byte offset within the line.
    pub offset: u64,
}

impl Geometry {
    /// Derives a geometry from validated configuration values.
    ///
    /// `line_bytes` and `num_sets` must already be non-zero powers of two;
    /// validation rejects anything else before a cache is built from them.
    pub fn new(line_bytes: usize, num_sets: usize, ways: usize) -> Self {
        Self {
            line_bytes,
            num_sets,
            ways,
            offset_bits: line_bytes.trailing_zeros(),
            index_bits: num_sets.trailing_zeros(),
        }
    }

    /// Splits an address into its tag, index, and offset fields.
    ///
    /// The low `offset_bits` form the offset, the next `index_bits` the set
    /// index, and the remaining high bits the tag.
    #[inline]
    pub fn decode(&self, addr: u64) -> AddressParts {
        let offset = addr & ((1u64 << self.offset_bits) - 1);
        let index = (addr >> self.offset_bits) & ((1u64 << self.index_bits) - 1);
        let tag = addr >> (self.offset_bits + self.index_bits);
        AddressParts { tag, index, offset }
    }

    /// Recomposes the base address (offset zero) of the block identified by
    /// `tag` in set `index`.
    ///
    /// Inverse of [`decode`](Self::decode) up to the offset field; used to
    /// reconstruct a victim's address when writing it back.
    #[inline]
    pub fn block_addr(&self, tag: u64, index: u64) -> u64 {
        ((tag << self.index_bits) | index) << self.offset_bits
    }
}
