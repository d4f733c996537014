//! Poll loop cadence.

use std::time::Duration;

use serde::Deserialize;

use crate::application::DispatchPolicy;

/// Poll loop configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct PollConfig {
    /// Sleep between cycles in seconds (default: 60).
    #[serde(default = "default_interval_secs")]
    pub interval_secs: u64,
    /// Pause after every notification attempt in milliseconds (default: 1000).
    #[serde(default = "default_rate_limit_ms")]
    pub rate_limit_ms: u64,
    /// Persist the ledger after this many successful notifications (default: 3).
    #[serde(default = "default_persist_every")]
    pub persist_every: usize,
}

const fn default_interval_secs() -> u64 {
    60
}

const fn default_rate_limit_ms() -> u64 {
    1_000
}

const fn default_persist_every() -> usize {
    3
}

impl PollConfig {
    #[must_use]
    pub fn policy(&self) -> DispatchPolicy {
        DispatchPolicy {
            poll_interval: Duration::from_secs(self.interval_secs),
            rate_limit_delay: Duration::from_millis(self.rate_limit_ms),
            persist_every: self.persist_every,
        }
    }
}

impl Default for PollConfig {
    fn default() -> Self {
        Self {
            interval_secs: default_interval_secs(),
            rate_limit_ms: default_rate_limit_ms(),
            persist_every: default_persist_every(),
        }
    }
}
