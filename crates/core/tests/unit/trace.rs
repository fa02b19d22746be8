//! Trace Record Parsing Tests.
//!
//! Verifies the 16-byte record layout, request-type classification, the
//! big-endian swap, and the reader's end-of-stream and truncation behavior.

use std::io::Cursor;

use cachesim_core::common::{AccessKind, TraceError};
use cachesim_core::sim::trace::{RECORD_BYTES, TraceReader, TraceRecord, reqtype};

// ──────────────────────────────────────────────────────────
// Helpers
// ──────────────────────────────────────────────────────────

/// Encodes a record in the on-disk little-endian layout.
fn encode(addr: u64, kind: u8, time: u32) -> [u8; RECORD_BYTES] {
    let mut bytes = [0u8; RECORD_BYTES];
    bytes[0..8].copy_from_slice(&addr.to_le_bytes());
    bytes[8] = kind;
    bytes[9] = 8; // size
    bytes[10] = 0; // attr
    bytes[11] = 0; // proc
    bytes[12..16].copy_from_slice(&time.to_le_bytes());
    bytes
}

// ══════════════════════════════════════════════════════════
// 1. Record layout
// ══════════════════════════════════════════════════════════

/// Field-by-field decode of a hand-built record.
#[test]
fn from_bytes_decodes_all_fields() {
    let mut bytes = [0u8; RECORD_BYTES];
    bytes[0..8].copy_from_slice(&0x1122_3344_5566_7788u64.to_le_bytes());
    bytes[8] = reqtype::MEM_WRITE;
    bytes[9] = 4;
    bytes[10] = 0xA5;
    bytes[11] = 2;
    bytes[12..16].copy_from_slice(&0xDEAD_BEEFu32.to_le_bytes());

    let record = TraceRecord::from_bytes(&bytes);
    assert_eq!(
        record,
        TraceRecord {
            addr: 0x1122_3344_5566_7788,
            reqtype: reqtype::MEM_WRITE,
            size: 4,
            attr: 0xA5,
            proc: 2,
            time: 0xDEAD_BEEF,
        }
    );
}

/// `swap_endian` reverses only the multi-byte fields.
#[test]
fn swap_endian_touches_addr_and_time_only() {
    let record = TraceRecord {
        addr: 0x0102_0304_0506_0708,
        reqtype: reqtype::FETCH,
        size: 8,
        attr: 1,
        proc: 3,
        time: 0x0A0B_0C0D,
    };
    let swapped = record.swap_endian();

    assert_eq!(swapped.addr, 0x0807_0605_0403_0201);
    assert_eq!(swapped.time, 0x0D0C_0B0A);
    assert_eq!(swapped.reqtype, record.reqtype);
    assert_eq!(swapped.size, record.size);
    assert_eq!(swapped.attr, record.attr);
    assert_eq!(swapped.proc, record.proc);
}

// ══════════════════════════════════════════════════════════
// 2. Request-type classification
// ══════════════════════════════════════════════════════════

/// Fetch/read/write map to their access kinds; read-and-invalidate is an
/// ordinary read.
#[test]
fn kind_maps_memory_reqtypes() {
    let kind_of = |rt: u8| TraceRecord::from_bytes(&encode(0, rt, 0)).kind();

    assert_eq!(kind_of(reqtype::FETCH), Some(AccessKind::Fetch));
    assert_eq!(kind_of(reqtype::MEM_READ), Some(AccessKind::Read));
    assert_eq!(kind_of(reqtype::MEM_READ_INV), Some(AccessKind::Read));
    assert_eq!(kind_of(reqtype::MEM_WRITE), Some(AccessKind::Write));
}

/// I/O, reply, and bus-control records are not simulated.
#[test]
fn kind_ignores_non_memory_reqtypes() {
    let kind_of = |rt: u8| TraceRecord::from_bytes(&encode(0, rt, 0)).kind();

    for rt in [
        reqtype::IO_READ,
        reqtype::IO_WRITE,
        reqtype::DEFER_REPLY,
        reqtype::INT_ACK,
        reqtype::CENTRAL_AGENT,
        reqtype::BRANCH_TRACE,
        reqtype::SHUTDOWN,
        reqtype::FLUSH,
        reqtype::HALT,
        reqtype::SYNC,
        reqtype::FLUSH_ACK,
        reqtype::STOP_CLOCK_ACK,
        reqtype::SMI_ACK,
        0xFF,
    ] {
        assert_eq!(kind_of(rt), None, "reqtype {rt:#04x} must be ignored");
    }
}

// ══════════════════════════════════════════════════════════
// 3. Reader behavior
// ══════════════════════════════════════════════════════════

/// An empty stream yields no records.
#[test]
fn empty_stream_yields_nothing() {
    let mut reader = TraceReader::new(Cursor::new(Vec::new()));
    assert!(reader.next().is_none());
}

/// Records come back in order, and the stream ends cleanly at a record
/// boundary.
#[test]
fn reads_records_in_order() {
    let mut bytes = Vec::new();
    bytes.extend_from_slice(&encode(0x40, reqtype::FETCH, 1));
    bytes.extend_from_slice(&encode(0x80, reqtype::MEM_WRITE, 2));

    let records: Vec<TraceRecord> = TraceReader::new(Cursor::new(bytes))
        .collect::<Result<_, _>>()
        .unwrap();

    assert_eq!(records.len(), 2);
    assert_eq!(records[0].addr, 0x40);
    assert_eq!(records[0].kind(), Some(AccessKind::Fetch));
    assert_eq!(records[1].addr, 0x80);
    assert_eq!(records[1].kind(), Some(AccessKind::Write));
}

/// A stream ending inside a record reports the offset of the bad record.
#[test]
fn truncated_record_is_an_error() {
    // One full record followed by ten stray bytes.
    let mut bytes = Vec::new();
    bytes.extend_from_slice(&encode(0x40, reqtype::MEM_READ, 0));
    bytes.extend_from_slice(&[0u8; 10]);

    let mut reader = TraceReader::new(Cursor::new(bytes));
    assert!(reader.next().unwrap().is_ok());

    match reader.next() {
        Some(Err(TraceError::Truncated { offset })) => assert_eq!(offset, 16),
        other => panic!("expected truncation error, got {other:?}"),
    }
}

/// The big-endian reader swaps `addr` and `time` back to host order.
#[test]
fn big_endian_reader_swaps_fields() {
    let mut bytes = [0u8; RECORD_BYTES];
    bytes[0..8].copy_from_slice(&0x4000u64.to_be_bytes());
    bytes[8] = reqtype::MEM_READ;
    bytes[12..16].copy_from_slice(&7u32.to_be_bytes());

    let record = TraceReader::big_endian(Cursor::new(bytes.to_vec()))
        .next()
        .unwrap()
        .unwrap();

    assert_eq!(record.addr, 0x4000);
    assert_eq!(record.time, 7);
}
