//! DEX Screener REST client.
//!
//! Fetches the latest token profiles. The endpoint returns a bare JSON array
//! of loosely-typed records; anything else counts as a malformed response.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde_json::Value;
use tracing::debug;

use crate::domain::RawRecord;
use crate::error::{FeedError, Result};
use crate::port::TokenFeed;

/// Latest token profiles endpoint.
pub const DEFAULT_FEED_URL: &str = "https://api.dexscreener.com/token-profiles/latest/v1";

/// HTTP client for the DEX Screener token-profile feed.
pub struct DexScreenerFeed {
    client: Client,
    url: String,
}

impl DexScreenerFeed {
    /// Create a feed client with a per-request timeout.
    pub fn new(url: impl Into<String>, timeout: Duration) -> Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .user_agent(concat!("dexwatch/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self {
            client,
            url: url.into(),
        })
    }
}

#[async_trait]
impl TokenFeed for DexScreenerFeed {
    async fn latest(&self) -> std::result::Result<Vec<RawRecord>, FeedError> {
        let response = self.client.get(&self.url).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(FeedError::Status(status.as_u16()));
        }

        let body: Value = response.json().await?;
        let records = into_records(body)?;
        debug!(count = records.len(), "Fetched token profiles");

        Ok(records)
    }

    fn name(&self) -> &str {
        &self.url
    }
}

fn into_records(body: Value) -> std::result::Result<Vec<RawRecord>, FeedError> {
    match body {
        Value::Array(records) => Ok(records),
        other => Err(FeedError::Decode(format!(
            "expected a JSON array, got {}",
            kind_of(&other)
        ))),
    }
}

fn kind_of(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
