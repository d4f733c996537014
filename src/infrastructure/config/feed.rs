//! Upstream feed configuration.

use std::time::Duration;

use serde::Deserialize;

use crate::adapter::outbound::dexscreener::DEFAULT_FEED_URL;
use crate::application::RetryPolicy;

/// Token feed endpoint and fetch retry settings.
#[derive(Debug, Clone, Deserialize)]
pub struct FeedConfig {
    /// Endpoint returning a JSON array of token records.
    #[serde(default = "default_url")]
    pub url: String,
    /// Per-attempt request timeout in seconds (default: 10).
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
    /// Attempts per cycle, including the first (default: 3).
    #[serde(default = "default_attempts")]
    pub attempts: u32,
    /// Delay after a timeout or transport failure in seconds (default: 2).
    #[serde(default = "default_backoff_secs")]
    pub backoff_secs: u64,
}

fn default_url() -> String {
    DEFAULT_FEED_URL.to_string()
}

const fn default_timeout_secs() -> u64 {
    10
}

const fn default_attempts() -> u32 {
    3
}

const fn default_backoff_secs() -> u64 {
    2
}

impl FeedConfig {
    #[must_use]
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    #[must_use]
    pub fn retry(&self) -> RetryPolicy {
        RetryPolicy::new(self.attempts, Duration::from_secs(self.backoff_secs))
    }
}

impl Default for FeedConfig {
    fn default() -> Self {
        Self {
            url: default_url(),
            timeout_secs: default_timeout_secs(),
            attempts: default_attempts(),
            backoff_secs: default_backoff_secs(),
        }
    }
}
