//! # Error Types
//!
//! Error handling for list serialization, deserialization and deep copy.
//!
//! ## Error Categories
//! - **I/O Errors**: the sink or source rejected an operation; the original
//!   [`std::io::Error`] is passed through unchanged
//! - **Invalid Stream Data**: every deserialize failure, reported as one kind
//!   with the precise cause attached as [`DecodeError`]
//! - **Malformed Arena**: walks over caller-built arenas that reference unknown
//!   nodes, loop back on themselves or point outside the chain
//! - **Configuration Errors**: config loading, validation and logging setup
//!
//! ## Example Usage
//! ```rust
//! use random_list_codec::{BinaryListCodec, ListError};
//! use std::error::Error;
//! use tracing::warn;
//!
//! let codec = BinaryListCodec::default();
//! match codec.decode(&[0x01, 0x00]) {
//!     Ok(list) => println!("decoded {} nodes", list.len()),
//!     Err(ListError::InvalidStreamData(cause)) => warn!(%cause, "rejected stream"),
//!     Err(e) => warn!(error = %e, source = ?e.source(), "unexpected failure"),
//! }
//! ```

use std::io;
use thiserror::Error;

/// Error message constants for configuration and logging failures.
pub mod constants {
    pub const ERR_CONFIG_OPEN: &str = "Failed to open config file";
    pub const ERR_CONFIG_READ: &str = "Failed to read config file";
    pub const ERR_CONFIG_PARSE: &str = "Failed to parse TOML";
    pub const ERR_CONFIG_SERIALIZE: &str = "Failed to serialize config";
    pub const ERR_CONFIG_WRITE: &str = "Failed to write config file";
    pub const ERR_CONFIG_INVALID: &str = "Configuration validation failed";
    pub const ERR_LOG_FILE: &str = "Failed to open log file";
    pub const ERR_LOG_INIT: &str = "Failed to install tracing subscriber";
}

/// Primary error type for all list operations
#[derive(Error, Debug)]
pub enum ListError {
    #[error(transparent)]
    Io(#[from] io::Error),

    #[error("Stream contains invalid data")]
    InvalidStreamData(#[source] DecodeError),

    #[error("Node {0} does not belong to this arena")]
    UnknownNode(usize),

    #[error("Chain loops back to node {0}")]
    CyclicChain(usize),

    #[error("Node {0} is already linked on that side")]
    AlreadyLinked(usize),

    #[error("Random reference of node at index {source_index} points outside the chain")]
    DanglingRandom { source_index: usize },

    #[error("Chain of {0} nodes does not fit the wire format")]
    ChainTooLong(usize),

    #[error("Payload of {0} bytes does not fit the wire format")]
    PayloadTooLarge(usize),

    #[error("Configuration error: {0}")]
    ConfigError(String),
}

/// Precise cause of an [`ListError::InvalidStreamData`] failure.
#[derive(Error, Debug)]
pub enum DecodeError {
    #[error("stream ends before the node count ({available} of 4 bytes)")]
    TruncatedCount { available: usize },

    #[error("negative node count {0}")]
    NegativeCount(i32),

    #[error("node count {count} cannot fit in the remaining {remaining} bytes")]
    CountExceedsData { count: usize, remaining: usize },

    #[error("node count {count} exceeds the configured limit of {limit}")]
    NodeLimitExceeded { count: usize, limit: usize },

    #[error("stream ends inside the length field of node {index}")]
    TruncatedLength { index: usize },

    #[error("node {index} declares negative payload length {length}")]
    NegativeLength { index: usize, length: i32 },

    #[error("node {index} payload needs {expected} bytes but only {available} remain")]
    TruncatedPayload {
        index: usize,
        expected: usize,
        available: usize,
    },

    #[error("node {index} payload of {length} bytes exceeds the configured limit of {limit}")]
    PayloadLimitExceeded {
        index: usize,
        length: usize,
        limit: usize,
    },

    #[error("node {index} payload is not valid UTF-16LE text")]
    InvalidText { index: usize },

    #[error("random reference section ends with a partial block of {0} bytes")]
    TruncatedRandomPair(usize),

    #[error("random reference index {index} is outside 0..{count}")]
    IndexOutOfRange { index: i32, count: usize },

    #[error("failed to read stream: {0}")]
    Read(#[from] io::Error),
}

impl From<DecodeError> for ListError {
    fn from(err: DecodeError) -> Self {
        ListError::InvalidStreamData(err)
    }
}

/// Type alias for Results using ListError
pub type Result<T> = std::result::Result<T, ListError>;
