//! # Transport
//!
//! Byte sinks and sources the codec reads from and writes to.
//!
//! ## Components
//! - **Stream**: truncate-and-rewind sink contracts for blocking and tokio I/O

pub mod stream;

pub use stream::{AsyncResetSink, ResetSink};
