//! Tokio codec adapter for the binary list format.
//!
//! The random reference section runs to the end of the stream, so one stream
//! carries exactly one list. The decoder buffers everything and only produces
//! a [`NodeList`] from [`Decoder::decode_eof`].

use crate::core::codec::BinaryListCodec;
use crate::core::node::{NodeArena, NodeId, NodeList};
use crate::error::ListError;
use bytes::BytesMut;
use tokio_util::codec::{Decoder, Encoder};

/// Borrowed view of a chain for encoding.
#[derive(Debug, Clone, Copy)]
pub struct ChainRef<'a> {
    pub arena: &'a NodeArena,
    pub head: Option<NodeId>,
}

impl<'a> From<&'a NodeList> for ChainRef<'a> {
    fn from(list: &'a NodeList) -> Self {
        Self {
            arena: &list.arena,
            head: list.head,
        }
    }
}

#[derive(Debug, Default)]
pub struct ListFrameCodec {
    codec: BinaryListCodec,
    finished: bool,
}

impl ListFrameCodec {
    pub fn new(codec: BinaryListCodec) -> Self {
        Self {
            codec,
            finished: false,
        }
    }
}

impl Encoder<ChainRef<'_>> for ListFrameCodec {
    type Error = ListError;

    fn encode(&mut self, item: ChainRef<'_>, dst: &mut BytesMut) -> Result<(), Self::Error> {
        let bytes = self.codec.encode(item.arena, item.head)?;
        dst.extend_from_slice(&bytes);
        Ok(())
    }
}

impl Decoder for ListFrameCodec {
    type Item = NodeList;
    type Error = ListError;

    fn decode(&mut self, _src: &mut BytesMut) -> Result<Option<Self::Item>, Self::Error> {
        // the list is only complete at end of stream
        Ok(None)
    }

    fn decode_eof(&mut self, buf: &mut BytesMut) -> Result<Option<Self::Item>, Self::Error> {
        if self.finished && buf.is_empty() {
            return Ok(None);
        }
        let frame = buf.split();
        let list = self.codec.decode(&frame)?;
        self.finished = true;
        Ok(Some(list))
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used, clippy::expect_used)]

    use super::*;
    use crate::error::DecodeError;

    #[test]
    fn test_decode_waits_for_eof() {
        let list = NodeList::from_values(["a", "b"]);
        let mut codec = ListFrameCodec::default();
        let mut buf = BytesMut::new();
        codec.encode(ChainRef::from(&list), &mut buf).unwrap();

        assert!(codec.decode(&mut buf).unwrap().is_none());
        let decoded = codec.decode_eof(&mut buf).unwrap().unwrap();
        assert_eq!(decoded.values(), vec!["a", "b"]);
        assert!(buf.is_empty());
        assert!(codec.decode_eof(&mut buf).unwrap().is_none());
    }

    #[test]
    fn test_empty_stream_is_invalid() {
        let mut codec = ListFrameCodec::default();
        let err = codec.decode_eof(&mut BytesMut::new()).unwrap_err();
        assert!(matches!(
            err,
            ListError::InvalidStreamData(DecodeError::TruncatedCount { available: 0 })
        ));
    }
}
