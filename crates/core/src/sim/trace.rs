//! Binary trace record format.
//!
//! A trace is a sequence of fixed 16-byte records with little-endian
//! fields. Only the address and request type drive simulation; the
//! remaining fields are carried through for completeness. Traces captured
//! on a big-endian host store `addr` and `time` byte-swapped, and
//! [`TraceReader::big_endian`] undoes that on the way in.

use std::io::{self, Read};

use crate::common::{AccessKind, TraceError};

/// Request type codes appearing in trace records.
///
/// Only the first four participate in simulation; the rest are recognized
/// so they can be skipped deliberately rather than rejected.
pub mod reqtype {
    /// Instruction fetch.
    pub const FETCH: u8 = 0x00;
    /// Memory read.
    pub const MEM_READ: u8 = 0x01;
    /// Memory read and invalidate; replayed as an ordinary read.
    pub const MEM_READ_INV: u8 = 0x02;
    /// Memory write.
    pub const MEM_WRITE: u8 = 0x03;

    /// I/O read.
    pub const IO_READ: u8 = 0x10;
    /// I/O write.
    pub const IO_WRITE: u8 = 0x11;

    /// Deferred reply.
    pub const DEFER_REPLY: u8 = 0x20;
    /// Interrupt acknowledge.
    pub const INT_ACK: u8 = 0x21;
    /// Central agent response.
    pub const CENTRAL_AGENT: u8 = 0x22;
    /// Branch trace record.
    pub const BRANCH_TRACE: u8 = 0x23;

    /// Shutdown.
    pub const SHUTDOWN: u8 = 0x31;
    /// Flush.
    pub const FLUSH: u8 = 0x32;
    /// Halt.
    pub const HALT: u8 = 0x33;
    /// Sync.
    pub const SYNC: u8 = 0x34;
    /// Flush acknowledge.
    pub const FLUSH_ACK: u8 = 0x35;
    /// Stop-clock acknowledge.
    pub const STOP_CLOCK_ACK: u8 = 0x36;
    /// SMI acknowledge.
    pub const SMI_ACK: u8 = 0x37;
}

/// Size in bytes of one trace record on disk.
pub const RECORD_BYTES: usize = 16;

/// One decoded trace record.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TraceRecord {
    /// Accessed memory address.
    pub addr: u64,
    /// Request type code (see [`reqtype`]).
    pub reqtype: u8,
    /// Access size in bytes, as recorded.
    pub size: u8,
    /// Attribute bits, as recorded.
    pub attr: u8,
    /// Originating processor, as recorded.
    pub proc: u8,
    /// Capture timestamp, as recorded.
    pub time: u32,
}

impl TraceRecord {
    /// Decodes one record from its on-disk little-endian layout.
    pub fn from_bytes(bytes: &[u8; RECORD_BYTES]) -> Self {
        let mut addr = [0u8; 8];
        addr.copy_from_slice(&bytes[0..8]);
        let mut time = [0u8; 4];
        time.copy_from_slice(&bytes[12..16]);
        Self {
            addr: u64::from_le_bytes(addr),
            reqtype: bytes[8],
            size: bytes[9],
            attr: bytes[10],
            proc: bytes[11],
            time: u32::from_le_bytes(time),
        }
    }

    /// Maps the request type to the access kind the core simulates.
    ///
    /// Read-and-invalidate replays as an ordinary read; I/O, replies, and
    /// bus-control records return `None` and are skipped by the driver.
    pub fn kind(&self) -> Option<AccessKind> {
        match self.reqtype {
            reqtype::FETCH => Some(AccessKind::Fetch),
            reqtype::MEM_READ | reqtype::MEM_READ_INV => Some(AccessKind::Read),
            reqtype::MEM_WRITE => Some(AccessKind::Write),
            _ => None,
        }
    }

    /// Undoes the byte order of a record captured on a big-endian host.
    ///
    /// `addr` and `time` are the only multi-byte fields.
    pub fn swap_endian(self) -> Self {
        Self {
            addr: self.addr.swap_bytes(),
            time: self.time.swap_bytes(),
            ..self
        }
    }
}

/// Streaming reader over a binary trace.
///
/// Iterates `Result<TraceRecord, TraceError>` until clean end of input; a
/// stream ending inside a record yields [`TraceError::Truncated`] with the
/// offset of the incomplete record.
pub struct TraceReader<R> {
    inner: R,
    /// Byte offset of the next unread record.
    offset: u64,
    byte_swap: bool,
}

impl<R: Read> TraceReader<R> {
    /// Wraps a byte stream of little-endian records.
    pub fn new(inner: R) -> Self {
        Self {
            inner,
            offset: 0,
            byte_swap: false,
        }
    }

    /// Wraps a byte stream whose `addr`/`time` fields need swapping because
    /// the trace was produced on a big-endian host.
    pub fn big_endian(inner: R) -> Self {
        Self {
            inner,
            offset: 0,
            byte_swap: true,
        }
    }

    fn read_record(&mut self) -> Result<Option<TraceRecord>, TraceError> {
        let mut buf = [0u8; RECORD_BYTES];
        let mut filled = 0;
        while filled < RECORD_BYTES {
            match self.inner.read(&mut buf[filled..]) {
                Ok(0) => break,
                Ok(n) => filled += n,
                Err(e) if e.kind() == io::ErrorKind::Interrupted => {}
                Err(e) => return Err(TraceError::Io(e)),
            }
        }
        if filled == 0 {
            return Ok(None);
        }
        if filled < RECORD_BYTES {
            return Err(TraceError::Truncated {
                offset: self.offset,
            });
        }
        self.offset += RECORD_BYTES as u64;
        let record = TraceRecord::from_bytes(&buf);
        Ok(Some(if self.byte_swap {
            record.swap_endian()
        } else {
            record
        }))
    }
}

impl<R: Read> Iterator for TraceReader<R> {
    type Item = Result<TraceRecord, TraceError>;

    fn next(&mut self) -> Option<Self::Item> {
        self.read_record().transpose()
    }
}
