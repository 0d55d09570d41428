//! # List Serializer
//!
//! The operation surface for lists with random references: serialize into a
//! sink, deserialize from a source, and deep copy without going through bytes.
//!
//! [`BinaryListSerializer`] implements [`ListSerializer`] on top of
//! [`BinaryListCodec`] and [`deep_copy`]. The async methods are thin wrappers
//! for tokio hosts: all encoding and decoding happens in memory and the stream
//! sees one sequential write or one read to the end.
//!
//! ## Usage
//! ```rust
//! use random_list_codec::{BinaryListSerializer, ListSerializer, NodeArena};
//!
//! let mut arena = NodeArena::new();
//! let head = arena.push_chain(["left", "right"]);
//! arena.set_random(head.unwrap(), head).unwrap();
//!
//! let serializer = BinaryListSerializer::default();
//! let copy = serializer.deep_copy(&arena, head).unwrap();
//! assert_eq!(copy.random_values(), vec![Some("left"), None]);
//! ```

use crate::config::{CodecConfig, CodecSettings};
use crate::core::codec::BinaryListCodec;
use crate::core::deep_copy::deep_copy;
use crate::core::node::{NodeArena, NodeId, NodeList};
use crate::error::{DecodeError, ListError, Result};
use crate::transport::stream::{AsyncResetSink, ResetSink};
use std::io::{Read, Seek, SeekFrom};
use tokio::io::{AsyncRead, AsyncReadExt, AsyncSeek, AsyncSeekExt, AsyncWriteExt};
use tracing::instrument;

/// Serialize, deserialize and deep copy lists with random references.
pub trait ListSerializer {
    /// Write the chain starting at `head` into `sink`, replacing its content.
    fn serialize<W: ResetSink + ?Sized>(
        &self,
        arena: &NodeArena,
        head: Option<NodeId>,
        sink: &mut W,
    ) -> Result<()>;

    /// Rebuild a chain from the full content of `source`.
    fn deserialize<R: Read + Seek + ?Sized>(&self, source: &mut R) -> Result<NodeList>;

    /// Clone the chain starting at `head` without sharing any node.
    fn deep_copy(&self, arena: &NodeArena, head: Option<NodeId>) -> Result<NodeList>;
}

/// [`ListSerializer`] using the binary wire format.
#[derive(Debug, Clone, Copy, Default)]
pub struct BinaryListSerializer {
    codec: BinaryListCodec,
}

impl BinaryListSerializer {
    pub fn new(config: &CodecConfig) -> Self {
        Self {
            codec: BinaryListCodec::new(config),
        }
    }

    pub fn from_settings(settings: &CodecSettings) -> Self {
        Self::new(&settings.codec)
    }

    pub fn codec(&self) -> &BinaryListCodec {
        &self.codec
    }

    /// Async variant of [`ListSerializer::serialize`].
    #[instrument(skip(self, arena, sink), level = "debug")]
    pub async fn serialize_async<W: AsyncResetSink>(
        &self,
        arena: &NodeArena,
        head: Option<NodeId>,
        sink: &mut W,
    ) -> Result<()> {
        let bytes = self.codec.encode(arena, head)?;
        sink.reset().await?;
        sink.write_all(&bytes).await?;
        sink.flush().await?;
        Ok(())
    }

    /// Async variant of [`ListSerializer::deserialize`].
    #[instrument(skip(self, source), level = "debug")]
    pub async fn deserialize_async<R>(&self, source: &mut R) -> Result<NodeList>
    where
        R: AsyncRead + AsyncSeek + Unpin,
    {
        let mut data = Vec::new();
        let read = async {
            source.seek(SeekFrom::Start(0)).await?;
            source.read_to_end(&mut data).await
        };
        read.await
            .map_err(|e| ListError::InvalidStreamData(DecodeError::Read(e)))?;
        self.codec.decode(&data)
    }
}

impl ListSerializer for BinaryListSerializer {
    fn serialize<W: ResetSink + ?Sized>(
        &self,
        arena: &NodeArena,
        head: Option<NodeId>,
        sink: &mut W,
    ) -> Result<()> {
        self.codec.write_to(arena, head, sink)
    }

    fn deserialize<R: Read + Seek + ?Sized>(&self, source: &mut R) -> Result<NodeList> {
        self.codec.read_from(source)
    }

    fn deep_copy(&self, arena: &NodeArena, head: Option<NodeId>) -> Result<NodeList> {
        deep_copy(arena, head)
    }
}
