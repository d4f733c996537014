//! Scripted feed for testing fetch and dispatch behavior.

use std::collections::VecDeque;
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use parking_lot::Mutex;

use crate::domain::RawRecord;
use crate::error::FeedError;
use crate::port::TokenFeed;

type Response = Result<Vec<RawRecord>, FeedError>;

/// A mock feed that pops pre-loaded responses, then repeats a fallback.
///
/// Each call to `latest()` pops the next scripted response; once the script
/// is exhausted the fallback is returned (an empty record set by default).
pub struct ScriptedFeed {
    responses: Mutex<VecDeque<Response>>,
    fallback: Response,
    calls: Arc<AtomicU32>,
}

impl ScriptedFeed {
    pub fn new() -> Self {
        Self {
            responses: Mutex::new(VecDeque::new()),
            fallback: Ok(Vec::new()),
            calls: Arc::new(AtomicU32::new(0)),
        }
    }

    /// A feed that returns the same records on every call.
    pub fn always(records: Vec<RawRecord>) -> Self {
        Self::new().with_fallback(Ok(records))
    }

    /// A feed that fails every call with `error`.
    pub fn failing(error: FeedError) -> Self {
        Self::new().with_fallback(Err(error))
    }

    pub fn with_responses(mut self, responses: Vec<Response>) -> Self {
        self.responses = Mutex::new(responses.into());
        self
    }

    pub fn with_fallback(mut self, fallback: Response) -> Self {
        self.fallback = fallback;
        self
    }

    /// Shared call counter, usable after the feed has been moved.
    pub fn calls(&self) -> Arc<AtomicU32> {
        self.calls.clone()
    }
}

impl Default for ScriptedFeed {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl TokenFeed for ScriptedFeed {
    async fn latest(&self) -> Response {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.responses
            .lock()
            .pop_front()
            .unwrap_or_else(|| self.fallback.clone())
    }

    fn name(&self) -> &str {
        "scripted"
    }
}
