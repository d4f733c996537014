//! Bounded-retry fetching of the current feed snapshot.

use std::sync::Arc;

use tokio::time::sleep;
use tracing::{debug, warn};

use super::policy::RetryPolicy;
use crate::domain::RawRecord;
use crate::error::{FeedError, FetchError};
use crate::port::TokenFeed;

/// Retrieves the full record set, retrying per [`RetryPolicy`].
///
/// Timeouts and transport failures back off before the next attempt. A
/// non-success status or an undecodable body counts against the budget
/// but is retried immediately.
pub struct Fetcher {
    feed: Arc<dyn TokenFeed>,
    policy: RetryPolicy,
}

impl Fetcher {
    #[must_use]
    pub fn new(feed: Arc<dyn TokenFeed>, policy: RetryPolicy) -> Self {
        Self { feed, policy }
    }

    /// Fetch the current records or report exhaustion.
    pub async fn fetch(&self) -> Result<Vec<RawRecord>, FetchError> {
        let attempts = self.policy.attempts;
        let mut last = FeedError::Transport("no attempt made".into());

        for attempt in 1..=attempts {
            match self.feed.latest().await {
                Ok(records) => {
                    debug!(attempt, records = records.len(), feed = self.feed.name(), "Feed fetched");
                    return Ok(records);
                }
                Err(e) => {
                    warn!(attempt, attempts, error = %e, feed = self.feed.name(), "Feed fetch failed");
                    let back_off = e.is_transient() && attempt < attempts;
                    last = e;
                    if back_off {
                        sleep(self.policy.backoff).await;
                    }
                }
            }
        }

        Err(FetchError::Exhausted { attempts, last })
    }
}

#[cfg(test)]
mod tests {
    use std::time::{Duration, Instant};

    use super::*;
    use crate::testkit::feed::ScriptedFeed;
    use serde_json::json;

    #[tokio::test]
    async fn returns_first_success() {
        let feed = ScriptedFeed::new().with_responses(vec![
            Err(FeedError::Timeout),
            Ok(vec![json!({"tokenAddress": "a"})]),
        ]);
        let calls = feed.calls();
        let fetcher = Fetcher::new(Arc::new(feed), RetryPolicy::immediate(3));

        let records = fetcher.fetch().await.unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(calls.load(std::sync::atomic::Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn exhausts_after_budget() {
        let feed = ScriptedFeed::failing(FeedError::Transport("reset".into()));
        let calls = feed.calls();
        let fetcher = Fetcher::new(Arc::new(feed), RetryPolicy::immediate(3));

        let err = fetcher.fetch().await.unwrap_err();
        assert_eq!(
            err,
            FetchError::Exhausted {
                attempts: 3,
                last: FeedError::Transport("reset".into()),
            }
        );
        assert_eq!(calls.load(std::sync::atomic::Ordering::SeqCst), 3);
    }

    #[tokio::test]
    async fn status_errors_count_toward_budget() {
        let feed = ScriptedFeed::new()
            .with_responses(vec![Err(FeedError::Status(429)), Err(FeedError::Status(500))])
            .with_fallback(Ok(vec![json!({})]));
        let fetcher = Fetcher::new(Arc::new(feed), RetryPolicy::immediate(2));

        let err = fetcher.fetch().await.unwrap_err();
        assert!(matches!(
            err,
            FetchError::Exhausted {
                last: FeedError::Status(500),
                ..
            }
        ));
    }

    #[tokio::test]
    async fn status_errors_do_not_back_off() {
        let feed = ScriptedFeed::failing(FeedError::Status(503));
        let fetcher = Fetcher::new(
            Arc::new(feed),
            RetryPolicy::new(3, Duration::from_secs(30)),
        );

        let started = Instant::now();
        assert!(fetcher.fetch().await.is_err());
        assert!(started.elapsed() < Duration::from_secs(5));
    }
}
