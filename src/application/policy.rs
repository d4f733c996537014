//! Timing and retry policies shared by the application services.

use std::time::Duration;

/// Bounded retry with a fixed delay between attempts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Total attempts, including the first one. Never zero.
    pub attempts: u32,
    /// Delay between consecutive attempts.
    pub backoff: Duration,
}

impl RetryPolicy {
    #[must_use]
    pub fn new(attempts: u32, backoff: Duration) -> Self {
        Self {
            attempts: attempts.max(1),
            backoff,
        }
    }

    /// Policy without delays, for tests.
    #[must_use]
    pub fn immediate(attempts: u32) -> Self {
        Self::new(attempts, Duration::ZERO)
    }
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self::new(3, Duration::from_secs(2))
    }
}

/// Delivery retry plus the transport's length limit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NotifyPolicy {
    pub retry: RetryPolicy,
    /// Maximum message length in characters.
    pub max_chars: usize,
}

impl Default for NotifyPolicy {
    fn default() -> Self {
        Self {
            retry: RetryPolicy::default(),
            max_chars: 4096,
        }
    }
}

/// Cadence of the poll loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DispatchPolicy {
    /// Sleep between cycles.
    pub poll_interval: Duration,
    /// Pause after every attempted notification.
    pub rate_limit_delay: Duration,
    /// Persist the ledger after every this many successful notifications.
    pub persist_every: usize,
}

impl DispatchPolicy {
    /// Policy without delays, for tests.
    #[must_use]
    pub fn immediate(persist_every: usize) -> Self {
        Self {
            poll_interval: Duration::ZERO,
            rate_limit_delay: Duration::ZERO,
            persist_every: persist_every.max(1),
        }
    }
}

impl Default for DispatchPolicy {
    fn default() -> Self {
        Self {
            poll_interval: Duration::from_secs(60),
            rate_limit_delay: Duration::from_secs(1),
            persist_every: 3,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn retry_policy_never_zero_attempts() {
        assert_eq!(RetryPolicy::new(0, Duration::ZERO).attempts, 1);
        assert_eq!(RetryPolicy::immediate(3).attempts, 3);
    }

    #[test]
    fn defaults_match_documented_values() {
        let retry = RetryPolicy::default();
        assert_eq!(retry.attempts, 3);
        assert_eq!(retry.backoff, Duration::from_secs(2));

        let dispatch = DispatchPolicy::default();
        assert_eq!(dispatch.poll_interval, Duration::from_secs(60));
        assert_eq!(dispatch.rate_limit_delay, Duration::from_secs(1));
        assert_eq!(dispatch.persist_every, 3);

        assert_eq!(NotifyPolicy::default().max_chars, 4096);
    }
}
