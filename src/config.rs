//! # Configuration Management
//!
//! Centralized configuration for the list codec.
//!
//! Holds the decoder's allocation guards and the logging setup.
//!
//! ## Configuration Sources
//! - TOML files via `from_file()`
//! - Direct instantiation with defaults
//! - Environment variable overrides via `from_env()`
//!
//! ## Security Considerations
//! - Allocation is always bounded by the input size: a declared count or
//!   length larger than the remaining bytes is rejected before allocating
//! - Defaults accept everything the encoder can produce; lower limits are
//!   opt-in and apply to decoding only

use crate::error::{constants, ListError, Result};
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};
use tracing::Level;

/// Largest node count the `i32` count field can carry
pub const MAX_NODE_COUNT: usize = i32::MAX as usize;

/// Largest UTF-16 payload the `i32` length field can carry (even byte count)
pub const MAX_PAYLOAD_SIZE: usize = i32::MAX as usize - 1;

/// Top-level settings: codec limits and logging
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
pub struct CodecSettings {
    /// Decoder limits
    #[serde(default)]
    pub codec: CodecConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl CodecSettings {
    /// Load configuration from a TOML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let mut file = File::open(path)
            .map_err(|e| ListError::ConfigError(format!("{}: {e}", constants::ERR_CONFIG_OPEN)))?;

        let mut contents = String::new();
        file.read_to_string(&mut contents)
            .map_err(|e| ListError::ConfigError(format!("{}: {e}", constants::ERR_CONFIG_READ)))?;

        Self::from_toml(&contents)
    }

    /// Load configuration from TOML string
    pub fn from_toml(content: &str) -> Result<Self> {
        toml::from_str::<Self>(content)
            .map_err(|e| ListError::ConfigError(format!("{}: {e}", constants::ERR_CONFIG_PARSE)))
    }

    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        let mut config = Self::default();

        if let Ok(max_nodes) = std::env::var("RANDOM_LIST_CODEC_MAX_NODES") {
            if let Ok(val) = max_nodes.parse::<usize>() {
                config.codec.max_nodes = val;
            }
        }

        if let Ok(max_payload) = std::env::var("RANDOM_LIST_CODEC_MAX_PAYLOAD_BYTES") {
            if let Ok(val) = max_payload.parse::<usize>() {
                config.codec.max_payload_bytes = val;
            }
        }

        if let Ok(level) = std::env::var("RANDOM_LIST_CODEC_LOG_LEVEL") {
            if let Ok(val) = level.parse::<Level>() {
                config.logging.log_level = val;
            }
        }

        Ok(config)
    }

    /// Defaults with `mutator` applied, mostly for tests and embedding
    pub fn default_with_overrides<F>(mutator: F) -> Self
    where
        F: FnOnce(&mut Self),
    {
        let mut config = Self::default();
        mutator(&mut config);
        config
    }

    /// Default settings rendered as a commented TOML document
    pub fn example_config() -> String {
        match toml::to_string_pretty(&Self::default()) {
            Ok(body) => format!(
                "# random-list-codec settings\n\
                 # codec limits default to the wire format maxima\n\n{body}"
            ),
            Err(e) => format!("# {}: {e}\n", constants::ERR_CONFIG_SERIALIZE),
        }
    }

    /// Save configuration to a file
    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let content = toml::to_string_pretty(self).map_err(|e| {
            ListError::ConfigError(format!("{}: {e}", constants::ERR_CONFIG_SERIALIZE))
        })?;

        std::fs::write(path, content)
            .map_err(|e| ListError::ConfigError(format!("{}: {e}", constants::ERR_CONFIG_WRITE)))?;

        Ok(())
    }

    /// Validate the configuration for common issues and misconfigurations
    ///
    /// Returns a list of validation errors. Empty list means configuration is valid.
    pub fn validate(&self) -> Vec<String> {
        let mut errors = Vec::new();
        errors.extend(self.codec.validate());
        errors.extend(self.logging.validate());
        errors
    }

    /// Like [`validate`](Self::validate), folding every problem into one `ConfigError`
    pub fn validate_strict(&self) -> Result<()> {
        let errors = self.validate();
        if errors.is_empty() {
            return Ok(());
        }
        Err(ListError::ConfigError(format!(
            "{}:\n  - {}",
            constants::ERR_CONFIG_INVALID,
            errors.join("\n  - ")
        )))
    }
}

/// Decoder limits. Defaults are the wire format maxima.
#[derive(Debug, Clone, Copy, Deserialize, Serialize, PartialEq, Eq)]
pub struct CodecConfig {
    /// Largest node count a stream may declare
    pub max_nodes: usize,

    /// Largest payload a single node may declare, in bytes
    pub max_payload_bytes: usize,
}

impl Default for CodecConfig {
    fn default() -> Self {
        Self {
            max_nodes: MAX_NODE_COUNT,
            max_payload_bytes: MAX_PAYLOAD_SIZE,
        }
    }
}

impl CodecConfig {
    /// Validate codec configuration
    pub fn validate(&self) -> Vec<String> {
        let mut errors = Vec::new();
        let wire_max = i32::MAX as usize;

        if self.max_nodes == 0 {
            errors.push("Max nodes must be greater than 0".to_string());
        } else if self.max_nodes > wire_max {
            errors.push(format!(
                "Max nodes too large: {} (wire format maximum: {wire_max})",
                self.max_nodes
            ));
        }

        if self.max_payload_bytes > wire_max {
            errors.push(format!(
                "Max payload bytes too large: {} (wire format maximum: {wire_max})",
                self.max_payload_bytes
            ));
        } else if self.max_payload_bytes % 2 != 0 {
            errors.push(format!(
                "Max payload bytes must be even (UTF-16 code units are 2 bytes): {}",
                self.max_payload_bytes
            ));
        }

        errors
    }
}

/// Tracing setup used by [`init_logging`](crate::utils::logging::init_logging)
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct LoggingConfig {
    /// Tracing target the configured level applies to; other targets stay at `warn`
    pub target: String,

    #[serde(with = "log_level_serde")]
    pub log_level: Level,

    /// Write events to stderr
    pub log_to_console: bool,

    /// Append events to this file as well
    #[serde(default)]
    pub log_file: Option<PathBuf>,

    pub json_format: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            target: String::from(env!("CARGO_CRATE_NAME")),
            log_level: Level::INFO,
            log_to_console: true,
            log_file: None,
            json_format: false,
        }
    }
}

impl LoggingConfig {
    /// `EnvFilter` directive for the configured target and level.
    pub fn filter_directive(&self) -> String {
        format!(
            "warn,{}={}",
            self.target,
            self.log_level.as_str().to_ascii_lowercase()
        )
    }

    /// Validate logging configuration
    pub fn validate(&self) -> Vec<String> {
        let mut errors = Vec::new();

        if self.target.is_empty() {
            errors.push("Log target cannot be empty".to_string());
        } else if !is_target_path(&self.target) {
            errors.push(format!(
                "Log target must be a module path like `random_list_codec::core`: {}",
                self.target
            ));
        }

        if let Some(parent) = self.log_file.as_deref().and_then(Path::parent) {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                errors.push(format!(
                    "Log file directory does not exist: {}",
                    parent.display()
                ));
            }
        }

        if !self.log_to_console && self.log_file.is_none() {
            errors.push("At least one logging output (console or file) must be enabled".to_string());
        }

        errors
    }
}

fn is_target_path(target: &str) -> bool {
    target.split("::").all(|segment| {
        let mut chars = segment.chars();
        chars
            .next()
            .is_some_and(|c| c.is_ascii_alphabetic() || c == '_')
            && chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
    })
}

/// Helper module for tracing::Level serialization/deserialization
mod log_level_serde {
    use serde::{Deserialize, Deserializer, Serialize, Serializer};
    use std::str::FromStr;
    use tracing::Level;

    pub fn serialize<S>(level: &Level, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let level_str = level.as_str().to_ascii_lowercase();
        level_str.serialize(serializer)
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Level, D::Error>
    where
        D: Deserializer<'de>,
    {
        let level_str = String::deserialize(deserializer)?;
        Level::from_str(&level_str)
            .map_err(|_| serde::de::Error::custom(format!("Invalid log level: {level_str}")))
    }
}
