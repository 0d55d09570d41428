//! # Binary List Codec
//!
//! Converts a chain of [`ListNode`](crate::core::node::ListNode)s with random
//! references to a flat little-endian byte stream and back.
//!
//! ## Wire Format
//! ```text
//! [NodeCount(i32)]
//! NodeCount x [PayloadLen(i32)] [Payload(PayloadLen bytes, UTF-16LE)]
//! until end of stream: [SourceIndex(i32)] [TargetIndex(i32)]
//! ```
//!
//! Nodes appear in traversal order from the head; that position is the only
//! identifier used by the random reference section. The random section has no
//! count prefix and ends with the stream, so a sink must be truncated before it
//! is rewritten (see [`ResetSink`]).
//!
//! ## Security
//! - Declared node counts and payload lengths are checked against the
//!   remaining input and the configured limits before allocating
//! - Every malformed stream is rejected as [`ListError::InvalidStreamData`]

use crate::config::CodecConfig;
use crate::core::node::{NodeArena, NodeId, NodeList};
use crate::core::text;
use crate::error::{DecodeError, ListError, Result};
use crate::transport::stream::ResetSink;
use bytes::{Buf, BufMut, Bytes, BytesMut};
use std::collections::HashMap;
use std::io::{Read, Seek, SeekFrom};
use tracing::{debug, instrument, warn};

/// Size of the node count and payload length fields
pub const LENGTH_FIELD_SIZE: usize = 4;

/// Size of one (source, target) block in the random reference section
pub const RANDOM_PAIR_SIZE: usize = 8;

/// Encoder/decoder for the binary list format.
#[derive(Debug, Clone, Copy)]
pub struct BinaryListCodec {
    max_nodes: usize,
    max_payload_bytes: usize,
}

impl Default for BinaryListCodec {
    fn default() -> Self {
        Self::new(&CodecConfig::default())
    }
}

impl BinaryListCodec {
    pub fn new(config: &CodecConfig) -> Self {
        Self {
            max_nodes: config.max_nodes,
            max_payload_bytes: config.max_payload_bytes,
        }
    }

    /// Encode the chain starting at `head`.
    ///
    /// Nodes are indexed in one forward walk. Random targets are only
    /// remembered during the walk and resolved to indices once every node on
    /// the chain has one, since a target may come later in traversal order.
    #[instrument(skip(self, arena), level = "debug")]
    pub fn encode(&self, arena: &NodeArena, head: Option<NodeId>) -> Result<Bytes> {
        let mut node_to_index: HashMap<NodeId, usize> = HashMap::new();
        let mut pending_randoms: Vec<(usize, NodeId)> = Vec::new();
        let mut records = BytesMut::new();

        let mut cursor = head;
        while let Some(id) = cursor {
            let node = arena.node(id)?;
            let index = node_to_index.len();
            if node_to_index.insert(id, index).is_some() {
                return Err(ListError::CyclicChain(id.index()));
            }
            if let Some(target) = node.random {
                pending_randoms.push((index, target));
            }

            let payload_len = text::encoded_len(&node.data);
            let length =
                i32::try_from(payload_len).map_err(|_| ListError::PayloadTooLarge(payload_len))?;
            records.reserve(LENGTH_FIELD_SIZE + payload_len);
            records.put_i32_le(length);
            text::put_utf16le(&mut records, &node.data);

            cursor = node.next;
        }

        let count = node_to_index.len();
        let wire_count = i32::try_from(count).map_err(|_| ListError::ChainTooLong(count))?;

        let mut out = BytesMut::with_capacity(
            LENGTH_FIELD_SIZE + records.len() + pending_randoms.len() * RANDOM_PAIR_SIZE,
        );
        out.put_i32_le(wire_count);
        out.put_slice(&records);
        for &(source_index, target) in &pending_randoms {
            let target_index = node_to_index
                .get(&target)
                .copied()
                .ok_or(ListError::DanglingRandom { source_index })?;
            // both indices are below `count`, which fits in i32
            out.put_i32_le(source_index as i32);
            out.put_i32_le(target_index as i32);
        }

        debug!(
            nodes = count,
            random_pairs = pending_randoms.len(),
            bytes = out.len(),
            "Encoded chain"
        );
        Ok(out.freeze())
    }

    /// Decode a complete stream into a new chain.
    ///
    /// Any malformed input is reported as [`ListError::InvalidStreamData`];
    /// nothing is returned for a partially decoded stream.
    #[instrument(skip(self, data), fields(bytes = data.len()), level = "debug")]
    pub fn decode(&self, data: &[u8]) -> Result<NodeList> {
        match self.decode_chain(data) {
            Ok(list) => Ok(list),
            Err(cause) => {
                warn!(%cause, "Rejected list stream");
                Err(ListError::InvalidStreamData(cause))
            }
        }
    }

    /// Truncate `sink` and write the encoded chain into it.
    ///
    /// Encoding completes before the sink is touched; a write failure may
    /// leave the sink partially written.
    #[instrument(skip(self, arena, sink), level = "debug")]
    pub fn write_to<W: ResetSink + ?Sized>(
        &self,
        arena: &NodeArena,
        head: Option<NodeId>,
        sink: &mut W,
    ) -> Result<()> {
        let bytes = self.encode(arena, head)?;
        sink.reset()?;
        sink.write_all(&bytes)?;
        sink.flush()?;
        Ok(())
    }

    /// Rewind `source`, read it to the end and decode it.
    #[instrument(skip(self, source), level = "debug")]
    pub fn read_from<R: Read + Seek + ?Sized>(&self, source: &mut R) -> Result<NodeList> {
        let data = read_to_end_from_start(source)
            .map_err(|e| ListError::InvalidStreamData(DecodeError::Read(e)))?;
        self.decode(&data)
    }

    fn decode_chain(&self, mut buf: &[u8]) -> std::result::Result<NodeList, DecodeError> {
        if buf.remaining() < LENGTH_FIELD_SIZE {
            return Err(DecodeError::TruncatedCount {
                available: buf.remaining(),
            });
        }
        let raw_count = buf.get_i32_le();
        let count = usize::try_from(raw_count).map_err(|_| DecodeError::NegativeCount(raw_count))?;
        if count > self.max_nodes {
            return Err(DecodeError::NodeLimitExceeded {
                count,
                limit: self.max_nodes,
            });
        }
        // every record carries at least its length field
        if count.saturating_mul(LENGTH_FIELD_SIZE) > buf.remaining() {
            return Err(DecodeError::CountExceedsData {
                count,
                remaining: buf.remaining(),
            });
        }

        let mut arena = NodeArena::with_capacity(count);
        let mut index_to_node: Vec<NodeId> = Vec::with_capacity(count);

        for index in 0..count {
            let data = self.read_payload(&mut buf, index)?;
            let id = arena.push(data);
            if let Some(&prev) = index_to_node.last() {
                arena.attach(prev, id);
            }
            index_to_node.push(id);
        }

        let trailing = buf.remaining() % RANDOM_PAIR_SIZE;
        if trailing != 0 {
            return Err(DecodeError::TruncatedRandomPair(trailing));
        }

        let mut random_pairs = 0usize;
        while buf.has_remaining() {
            let source = resolve_index(&index_to_node, buf.get_i32_le())?;
            let target = resolve_index(&index_to_node, buf.get_i32_le())?;
            if let Some(node) = arena.get_mut(source) {
                node.random = Some(target);
            }
            random_pairs += 1;
        }

        debug!(nodes = count, random_pairs, "Decoded chain");
        Ok(NodeList::new(arena, index_to_node.first().copied()))
    }

    fn read_payload(&self, buf: &mut &[u8], index: usize) -> std::result::Result<String, DecodeError> {
        if buf.remaining() < LENGTH_FIELD_SIZE {
            return Err(DecodeError::TruncatedLength { index });
        }
        let raw_length = buf.get_i32_le();
        let length = usize::try_from(raw_length).map_err(|_| DecodeError::NegativeLength {
            index,
            length: raw_length,
        })?;
        if length > self.max_payload_bytes {
            return Err(DecodeError::PayloadLimitExceeded {
                index,
                length,
                limit: self.max_payload_bytes,
            });
        }
        if length > buf.remaining() {
            return Err(DecodeError::TruncatedPayload {
                index,
                expected: length,
                available: buf.remaining(),
            });
        }

        let text = text::decode_utf16le(&(*buf)[..length]).ok_or(DecodeError::InvalidText { index })?;
        buf.advance(length);
        Ok(text)
    }
}

fn resolve_index(index_to_node: &[NodeId], raw: i32) -> std::result::Result<NodeId, DecodeError> {
    usize::try_from(raw)
        .ok()
        .and_then(|index| index_to_node.get(index).copied())
        .ok_or(DecodeError::IndexOutOfRange {
            index: raw,
            count: index_to_node.len(),
        })
}

fn read_to_end_from_start<R: Read + Seek + ?Sized>(source: &mut R) -> std::io::Result<Vec<u8>> {
    source.seek(SeekFrom::Start(0))?;
    let mut data = Vec::new();
    source.read_to_end(&mut data)?;
    Ok(data)
}
