//! Telegram notification configuration.
//!
//! Credentials never live in the config file; they are read from
//! `TELEGRAM_BOT_TOKEN` and `TELEGRAM_CHAT_ID` at startup.

use std::time::Duration;

use serde::Deserialize;

use crate::application::{NotifyPolicy, RetryPolicy};

const fn default_true() -> bool {
    true
}

/// Telegram notification configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct TelegramAppConfig {
    /// Deliver to Telegram. When false, announcements are only logged.
    #[serde(default = "default_true")]
    pub enabled: bool,
    /// Transport limit on message length in characters (default: 4096).
    #[serde(default = "default_max_message_chars")]
    pub max_message_chars: usize,
    /// Delivery attempts per announcement (default: 3).
    #[serde(default = "default_attempts")]
    pub attempts: u32,
    /// Delay between delivery attempts in seconds (default: 2).
    #[serde(default = "default_backoff_secs")]
    pub backoff_secs: u64,
}

const fn default_max_message_chars() -> usize {
    4096
}

const fn default_attempts() -> u32 {
    3
}

const fn default_backoff_secs() -> u64 {
    2
}

impl TelegramAppConfig {
    #[must_use]
    pub fn policy(&self) -> NotifyPolicy {
        NotifyPolicy {
            retry: RetryPolicy::new(self.attempts, Duration::from_secs(self.backoff_secs)),
            max_chars: self.max_message_chars,
        }
    }
}

impl Default for TelegramAppConfig {
    fn default() -> Self {
        Self {
            enabled: default_true(),
            max_message_chars: default_max_message_chars(),
            attempts: default_attempts(),
            backoff_secs: default_backoff_secs(),
        }
    }
}
