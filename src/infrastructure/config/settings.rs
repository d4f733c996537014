//! Application configuration loading and validation.
//!
//! Provides the main [`Config`] struct that aggregates all application settings.
//! Configuration is loaded from a TOML file; every section is optional and
//! falls back to defaults. Telegram credentials are read from the
//! environment, never from the file.
//!
//! # Example
//!
//! ```no_run
//! use dexwatch::infrastructure::config::settings::Config;
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = Config::load("config.toml")?;
//!     config.init_logging();
//!     Ok(())
//! }
//! ```

use std::net::SocketAddr;
use std::path::Path;

use serde::Deserialize;

use super::feed::FeedConfig;
use super::keepalive::KeepaliveConfig;
use super::ledger::LedgerConfig;
use super::logging::LoggingConfig;
use super::poll::PollConfig;
use super::telegram::TelegramAppConfig;
use crate::application::notifier::TRUNCATION_MARKER;
use crate::error::{ConfigError, Result};

/// Main application configuration.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    /// Upstream token feed.
    #[serde(default)]
    pub feed: FeedConfig,

    /// Telegram delivery settings.
    #[serde(default)]
    pub telegram: TelegramAppConfig,

    /// Poll loop cadence and ledger batching.
    #[serde(default)]
    pub poll: PollConfig,

    #[serde(default)]
    pub ledger: LedgerConfig,

    /// Logging and tracing configuration.
    #[serde(default)]
    pub logging: LoggingConfig,

    /// Optional liveness responder.
    #[serde(default)]
    pub keepalive: KeepaliveConfig,
}

impl Config {
    /// Parse configuration from TOML content.
    ///
    /// # Errors
    ///
    /// Returns an error if the TOML content is malformed or validation fails.
    pub fn parse_toml(content: &str) -> Result<Self> {
        let config: Self = toml::from_str(content).map_err(ConfigError::Parse)?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The file cannot be read
    /// - The TOML content is malformed
    /// - Validation fails
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(ConfigError::ReadFile)?;
        Self::parse_toml(&content)
    }

    /// Like [`Config::load`], but a missing file yields the defaults.
    pub fn load_or_default<P: AsRef<Path>>(path: P) -> Result<Self> {
        match std::fs::read_to_string(path) {
            Ok(content) => Self::parse_toml(&content),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                let config = Self::default();
                config.validate()?;
                Ok(config)
            }
            Err(e) => Err(ConfigError::ReadFile(e).into()),
        }
    }

    /// Initialize the tracing subscriber from the `[logging]` section.
    pub fn init_logging(&self) {
        self.logging.init();
    }

    /// Check that values are present and within acceptable ranges.
    pub fn validate(&self) -> Result<()> {
        if self.feed.url.trim().is_empty() {
            return Err(ConfigError::MissingField { field: "feed.url" }.into());
        }
        if self.feed.attempts == 0 {
            return Err(ConfigError::InvalidValue {
                field: "feed.attempts",
                reason: "must be greater than 0".to_string(),
            }
            .into());
        }
        if self.feed.timeout_secs == 0 {
            return Err(ConfigError::InvalidValue {
                field: "feed.timeout_secs",
                reason: "must be greater than 0".to_string(),
            }
            .into());
        }
        if self.telegram.attempts == 0 {
            return Err(ConfigError::InvalidValue {
                field: "telegram.attempts",
                reason: "must be greater than 0".to_string(),
            }
            .into());
        }
        let marker_chars = TRUNCATION_MARKER.chars().count();
        if self.telegram.max_message_chars <= marker_chars {
            return Err(ConfigError::InvalidValue {
                field: "telegram.max_message_chars",
                reason: format!("must be greater than {marker_chars}"),
            }
            .into());
        }
        if self.poll.persist_every == 0 {
            return Err(ConfigError::InvalidValue {
                field: "poll.persist_every",
                reason: "must be greater than 0".to_string(),
            }
            .into());
        }
        if self.ledger.path.as_os_str().is_empty() {
            return Err(ConfigError::MissingField {
                field: "ledger.path",
            }
            .into());
        }
        if self.keepalive.enabled && self.keepalive.bind.parse::<SocketAddr>().is_err() {
            return Err(ConfigError::InvalidValue {
                field: "keepalive.bind",
                reason: format!("'{}' is not a socket address", self.keepalive.bind),
            }
            .into());
        }

        Ok(())
    }
}
