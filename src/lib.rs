//! dexwatch - announce newly listed tokens to a Telegram chat.
//!
//! Polls a token-listing feed, normalizes its loosely-typed records, and
//! posts one announcement per token that carries a Telegram link. A durable
//! ledger of announced contract addresses keeps announcements unique across
//! restarts.
//!
//! # Architecture
//!
//! - [`domain`] - Record normalization and token types (no I/O)
//! - [`port`] - Traits for the feed, the chat transport and ledger storage
//! - [`adapter`] - DEX Screener client, Telegram and log senders, ledger files, CLI
//! - [`application`] - Fetcher, notifier, ledger and the poll loop
//! - [`infrastructure`] - Configuration, runtime wiring, keep-alive listener
//! - [`error`] - Error types for the crate
//!
//! # Features
//!
//! - `telegram` (default) - Telegram delivery via `teloxide`
//! - `testkit` - Scripted feeds, recording senders and record builders for tests
//!
//! # Example
//!
//! ```no_run
//! use dexwatch::infrastructure::{bootstrap, config::Config};
//!
//! # async fn demo() -> dexwatch::error::Result<()> {
//! let config = Config::load("config.toml")?;
//! let mut dispatcher = bootstrap::build_dispatcher(&config)?;
//! let summary = dispatcher.run_cycle().await;
//! println!("announced {}", summary.notified);
//! # Ok(())
//! # }
//! ```

pub mod adapter;
pub mod application;
pub mod domain;
pub mod error;
pub mod infrastructure;
pub mod port;

#[cfg(any(test, feature = "testkit"))]
pub mod testkit;
