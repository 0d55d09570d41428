#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
//! Edge-case tests for malformed streams, broken sinks and malformed arenas

use random_list_codec::config::CodecConfig;
use random_list_codec::transport::ResetSink;
use random_list_codec::{
    BinaryListCodec, BinaryListSerializer, DecodeError, ListError, ListSerializer, NodeArena,
    NodeList,
};
use std::error::Error as _;
use std::io::{self, Cursor, Read, Seek, SeekFrom, Write};

fn le(value: i32) -> [u8; 4] {
    value.to_le_bytes()
}

fn decode(bytes: &[u8]) -> Result<NodeList, ListError> {
    BinaryListSerializer::default().deserialize(&mut Cursor::new(bytes.to_vec()))
}

fn expect_invalid(bytes: &[u8]) -> DecodeError {
    match decode(bytes) {
        Err(ListError::InvalidStreamData(cause)) => cause,
        other => panic!("Unexpected result: {other:?}"),
    }
}

fn valid_two_nodes() -> Vec<u8> {
    let list = NodeList::from_values(["ab", "c"]);
    BinaryListCodec::default()
        .encode(&list.arena, list.head)
        .unwrap()
        .to_vec()
}

// ============================================================================
// STREAM VALIDATION
// ============================================================================

#[test]
fn test_ten_zero_bytes_rejected() {
    // count 0 followed by a 6-byte tail that is not a whole random pair
    let cause = expect_invalid(&[0u8; 10]);
    assert!(matches!(cause, DecodeError::TruncatedRandomPair(6)));
}

#[test]
fn test_shorter_than_count_rejected() {
    for len in 0..4 {
        let cause = expect_invalid(&vec![0u8; len]);
        assert!(matches!(cause, DecodeError::TruncatedCount { available } if available == len));
    }
}

#[test]
fn test_four_zero_bytes_is_empty_list() {
    let list = decode(&[0, 0, 0, 0]).expect("empty list");
    assert!(list.is_empty());
}

#[test]
fn test_count_exceeding_data_rejected() {
    let mut bytes = le(1000).to_vec();
    bytes.extend_from_slice(&le(0));
    let cause = expect_invalid(&bytes);
    assert!(matches!(cause, DecodeError::CountExceedsData { count: 1000, .. }));
}

#[test]
fn test_negative_count_rejected() {
    let cause = expect_invalid(&le(-1));
    assert!(matches!(cause, DecodeError::NegativeCount(-1)));
}

#[test]
fn test_negative_payload_length_rejected() {
    let mut bytes = le(1).to_vec();
    bytes.extend_from_slice(&le(-4));
    let cause = expect_invalid(&bytes);
    assert!(matches!(cause, DecodeError::NegativeLength { index: 0, length: -4 }));
}

#[test]
fn test_payload_length_past_end_rejected() {
    let mut bytes = valid_two_nodes();
    // drop the last payload byte
    bytes.pop();
    let cause = expect_invalid(&bytes);
    assert!(matches!(
        cause,
        DecodeError::TruncatedPayload {
            index: 1,
            expected: 2,
            available: 1
        }
    ));
}

#[test]
fn test_odd_payload_length_rejected() {
    let mut bytes = le(1).to_vec();
    bytes.extend_from_slice(&le(3));
    bytes.extend_from_slice(&[0x41, 0x00, 0x42]);
    let cause = expect_invalid(&bytes);
    assert!(matches!(cause, DecodeError::InvalidText { index: 0 }));
}

#[test]
fn test_partial_random_pair_rejected() {
    let mut bytes = valid_two_nodes();
    bytes.extend_from_slice(&le(0));
    let cause = expect_invalid(&bytes);
    assert!(matches!(cause, DecodeError::TruncatedRandomPair(4)));
}

#[test]
fn test_random_index_out_of_range_rejected() {
    for (source, target) in [(2, 0), (0, 2), (-1, 0), (0, i32::MIN)] {
        let mut bytes = valid_two_nodes();
        bytes.extend_from_slice(&le(source));
        bytes.extend_from_slice(&le(target));
        let cause = expect_invalid(&bytes);
        assert!(matches!(cause, DecodeError::IndexOutOfRange { count: 2, .. }));
    }
}

#[test]
fn test_random_pair_on_empty_list_rejected() {
    let mut bytes = le(0).to_vec();
    bytes.extend_from_slice(&le(0));
    bytes.extend_from_slice(&le(0));
    let cause = expect_invalid(&bytes);
    assert!(matches!(cause, DecodeError::IndexOutOfRange { index: 0, count: 0 }));
}

#[test]
fn test_payload_limit_rejected() {
    let codec = BinaryListCodec::new(&CodecConfig {
        max_payload_bytes: 2,
        ..CodecConfig::default()
    });
    let err = codec.decode(&valid_two_nodes()).unwrap_err();
    assert!(matches!(
        err,
        ListError::InvalidStreamData(DecodeError::PayloadLimitExceeded { index: 0, length: 4, limit: 2 })
    ));
}

#[test]
fn test_invalid_stream_error_exposes_cause() {
    let err = decode(&[1, 2]).unwrap_err();
    assert_eq!(err.to_string(), "Stream contains invalid data");
    let source = err.source().expect("cause attached");
    assert!(source.to_string().contains("node count"));
}

// ============================================================================
// BROKEN STREAMS
// ============================================================================

struct FailingSink {
    kind: io::ErrorKind,
}

impl Write for FailingSink {
    fn write(&mut self, _buf: &[u8]) -> io::Result<usize> {
        Err(io::Error::new(self.kind, "sink rejected write"))
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl ResetSink for FailingSink {
    fn reset(&mut self) -> io::Result<()> {
        Ok(())
    }
}

struct FailingSource;

impl Read for FailingSource {
    fn read(&mut self, _buf: &mut [u8]) -> io::Result<usize> {
        Err(io::Error::new(io::ErrorKind::ConnectionReset, "source gone"))
    }
}

impl Seek for FailingSource {
    fn seek(&mut self, _pos: SeekFrom) -> io::Result<u64> {
        Ok(0)
    }
}

#[test]
fn test_write_error_propagates_unchanged() {
    let list = NodeList::from_values(["x"]);
    let mut sink = FailingSink {
        kind: io::ErrorKind::PermissionDenied,
    };
    let err = BinaryListSerializer::default()
        .serialize(&list.arena, list.head, &mut sink)
        .unwrap_err();

    match err {
        ListError::Io(e) => {
            assert_eq!(e.kind(), io::ErrorKind::PermissionDenied);
            assert_eq!(e.to_string(), "sink rejected write");
        }
        other => panic!("Unexpected result: {other:?}"),
    }
}

#[test]
fn test_read_error_is_invalid_stream_data() {
    let err = BinaryListSerializer::default()
        .deserialize(&mut FailingSource)
        .unwrap_err();
    assert!(matches!(
        err,
        ListError::InvalidStreamData(DecodeError::Read(ref e)) if e.kind() == io::ErrorKind::ConnectionReset
    ));
}

// ============================================================================
// MALFORMED ARENAS
// ============================================================================

#[test]
fn test_foreign_head_rejected() {
    let mut other = NodeArena::new();
    other.push("a");
    let foreign = other.push("b");

    let err = BinaryListCodec::default()
        .encode(&NodeArena::new(), Some(foreign))
        .unwrap_err();
    assert!(matches!(err, ListError::UnknownNode(1)));

    let err = random_list_codec::deep_copy(&NodeArena::new(), Some(foreign)).unwrap_err();
    assert!(matches!(err, ListError::UnknownNode(1)));
}

#[test]
fn test_cyclic_next_rejected_by_encode_and_copy() {
    let mut arena = NodeArena::new();
    let a = arena.push("a");
    let b = arena.push("b");
    let c = arena.push("c");
    arena.link(a, b).unwrap();
    arena.link(b, c).unwrap();
    arena.link(c, a).unwrap();

    let err = BinaryListCodec::default().encode(&arena, Some(a)).unwrap_err();
    assert!(matches!(err, ListError::CyclicChain(_)));

    let err = random_list_codec::deep_copy(&arena, Some(a)).unwrap_err();
    assert!(matches!(err, ListError::CyclicChain(_)));
}

#[test]
fn test_failed_encode_leaves_sink_untouched() {
    let mut arena = NodeArena::new();
    let head = arena.push("head");
    let stray = arena.push("stray");
    arena.set_random(head, Some(stray)).unwrap();

    let mut sink = Cursor::new(vec![1, 2, 3]);
    let err = BinaryListSerializer::default()
        .serialize(&arena, Some(head), &mut sink)
        .unwrap_err();

    assert!(matches!(err, ListError::DanglingRandom { source_index: 0 }));
    assert_eq!(sink.into_inner(), vec![1, 2, 3]);
}
