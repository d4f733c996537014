//! DEX Screener token-profile feed.

mod client;

pub use client::{DexScreenerFeed, DEFAULT_FEED_URL};
