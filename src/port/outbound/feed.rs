//! Listing feed port.

use async_trait::async_trait;

use crate::domain::RawRecord;
use crate::error::FeedError;

/// Source of the current full set of listing records.
///
/// One call is one attempt; retry policy lives in
/// [`Fetcher`](crate::application::fetcher::Fetcher).
#[async_trait]
pub trait TokenFeed: Send + Sync {
    /// Fetch the current record set.
    async fn latest(&self) -> Result<Vec<RawRecord>, FeedError>;

    /// Human-readable feed name for logging.
    fn name(&self) -> &str;
}
