//! Structured logging setup driven by [`LoggingConfig`].
//!
//! The configured level applies to [`LoggingConfig::target`]; everything else
//! logs at `warn`. `RUST_LOG` replaces both when set.

use crate::config::LoggingConfig;
use crate::error::{constants, ListError, Result};
use std::fs::OpenOptions;
use std::sync::Arc;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, EnvFilter, Layer, Registry};

type BoxedLayer = Box<dyn Layer<Registry> + Send + Sync>;

/// Install the global tracing subscriber.
///
/// Fails if a global subscriber is already installed or the log file cannot be
/// opened.
pub fn init_logging(config: &LoggingConfig) -> Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(config.filter_directive()));

    let mut layers: Vec<BoxedLayer> = Vec::new();

    if config.log_to_console {
        let layer = fmt::layer().with_writer(std::io::stderr);
        layers.push(if config.json_format {
            layer.json().boxed()
        } else {
            layer.boxed()
        });
    }

    if let Some(path) = config.log_file.as_deref() {
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)
            .map_err(|e| ListError::ConfigError(format!("{}: {e}", constants::ERR_LOG_FILE)))?;
        let layer = fmt::layer().with_ansi(false).with_writer(Arc::new(file));
        layers.push(if config.json_format {
            layer.json().boxed()
        } else {
            layer.boxed()
        });
    }

    tracing_subscriber::registry()
        .with(layers)
        .with(filter)
        .try_init()
        .map_err(|e| ListError::ConfigError(format!("{}: {e}", constants::ERR_LOG_INIT)))?;

    tracing::info!(target = %config.target, level = %config.log_level, "Logging initialized");
    Ok(())
}
