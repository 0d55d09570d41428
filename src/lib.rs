//! # random-list-codec
//!
//! Binary serialization and single-pass deep copy for doubly-linked lists whose
//! nodes carry an extra "random" reference to any node of the same list.
//!
//! ## Modules
//! - [`core`]: node arena, binary codec, deep copier, framed codec
//! - [`service`]: the [`ListSerializer`] operation surface
//! - [`transport`]: truncate-and-rewind sink contracts
//! - [`config`]: TOML / environment configuration
//! - [`utils`]: logging setup
//!
//! ## Example
//! ```rust
//! use random_list_codec::{BinaryListSerializer, ListSerializer, NodeArena};
//! use std::io::Cursor;
//!
//! let mut arena = NodeArena::new();
//! let head = arena.push_chain(["a", "b", "c"]).unwrap();
//! let tail = arena.tail(head).unwrap();
//! arena.set_random(head, Some(tail)).unwrap();
//!
//! let serializer = BinaryListSerializer::default();
//! let mut stream = Cursor::new(Vec::new());
//! serializer.serialize(&arena, Some(head), &mut stream).unwrap();
//!
//! let list = serializer.deserialize(&mut stream).unwrap();
//! assert_eq!(list.values(), vec!["a", "b", "c"]);
//! ```

pub mod config;
pub mod core;
pub mod error;
pub mod service;
pub mod transport;
pub mod utils;

pub use crate::core::codec::BinaryListCodec;
pub use crate::core::deep_copy::{deep_copy, deep_copy_into};
pub use crate::core::framed::{ChainRef, ListFrameCodec};
pub use crate::core::node::{ListNode, NodeArena, NodeId, NodeList};
pub use crate::error::{DecodeError, ListError, Result};
pub use crate::service::serializer::{BinaryListSerializer, ListSerializer};
