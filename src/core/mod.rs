//! # Core List Components
//!
//! Data model, binary codec and deep copy for doubly-linked lists with random
//! references.
//!
//! ## Components
//! - **Node**: arena-backed nodes addressed by [`NodeId`](node::NodeId)
//! - **Codec**: count-prefixed binary encoding with a trailing random section
//! - **Deep Copy**: single-pass clone driven by a get-or-create table
//! - **Framed**: `tokio_util` codec for whole-stream I/O
//! - **Text**: UTF-16LE payload transform
//!
//! ## Wire Format
//! ```text
//! [Count(4)] Count x ([Len(4)] [Payload(Len)]) ... [Source(4)] [Target(4)] until EOF
//! ```

pub mod codec;
pub mod deep_copy;
pub mod framed;
pub mod node;
pub mod text;
