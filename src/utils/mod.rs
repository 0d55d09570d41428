//! # Utility Modules
//!
//! Supporting utilities shared by the codec and its hosts.
//!
//! ## Components
//! - **Logging**: tracing subscriber setup from [`LoggingConfig`](crate::config::LoggingConfig)

pub mod logging;

pub use logging::init_logging;
