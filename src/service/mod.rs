//! # Service Layer
//!
//! The public operation surface that ties the codec and the deep copier to
//! configuration and I/O.
//!
//! ## Components
//! - **Serializer**: the [`ListSerializer`](serializer::ListSerializer) trait and its binary implementation

pub mod serializer;
