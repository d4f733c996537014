//! Composition root: builds the runtime graph from [`Config`].

use std::sync::Arc;

use tracing::{info, warn};

use crate::adapter::outbound::dexscreener::DexScreenerFeed;
use crate::adapter::outbound::ledger::{JsonFileStore, MemoryStore};
use crate::adapter::outbound::notifier::LogSender;
#[cfg(feature = "telegram")]
use crate::adapter::outbound::notifier::telegram::{TelegramConfig, TelegramSender};
use crate::application::{Dispatcher, Fetcher, Ledger, Notifier};
#[cfg(not(feature = "telegram"))]
use crate::error::ConfigError;
use crate::error::{LedgerError, Result};
use crate::infrastructure::config::Config;
use crate::port::{LedgerStore, MessageSender, TokenFeed};

/// Build the upstream feed client.
pub fn build_feed(config: &Config) -> Result<Arc<dyn TokenFeed>> {
    let feed = DexScreenerFeed::new(config.feed.url.clone(), config.feed.timeout())?;
    Ok(Arc::new(feed))
}

/// Build the chat sender.
///
/// With Telegram enabled, missing or invalid credentials are a startup
/// error. With it disabled, announcements go to the log.
#[cfg(feature = "telegram")]
pub fn build_sender(config: &Config) -> Result<Arc<dyn MessageSender>> {
    if !config.telegram.enabled {
        info!("Telegram delivery disabled, announcements will be logged");
        return Ok(Arc::new(LogSender));
    }

    let telegram = TelegramConfig::from_env()?;
    let sender = TelegramSender::new(&telegram)?;
    info!(chat_id = %telegram.chat_id, token = %telegram.masked_token(), "Telegram sender ready");
    Ok(Arc::new(sender))
}

/// Build the chat sender (non-telegram variant).
#[cfg(not(feature = "telegram"))]
pub fn build_sender(config: &Config) -> Result<Arc<dyn MessageSender>> {
    if config.telegram.enabled {
        return Err(ConfigError::InvalidValue {
            field: "telegram.enabled",
            reason: "built without the telegram feature".to_string(),
        }
        .into());
    }
    info!("Telegram delivery disabled, announcements will be logged");
    Ok(Arc::new(LogSender))
}

/// Build the ledger store at the configured path.
///
/// With Telegram disabled nothing is confirmed delivered, so the file is
/// only read: its keys seed an in-memory store and are never written back.
#[must_use]
pub fn build_store(config: &Config) -> Box<dyn LedgerStore> {
    let file = JsonFileStore::new(config.ledger.path.clone());
    if config.telegram.enabled {
        return Box::new(file);
    }

    let known = match file.read() {
        Ok(keys) => keys,
        Err(LedgerError::Missing { .. }) => Vec::new(),
        Err(e) => {
            warn!(error = %e, "Ledger unreadable, log-only run starts empty");
            Vec::new()
        }
    };
    info!(ledger = %file.location(), known = known.len(), "Log-only delivery, ledger file left untouched");
    Box::new(MemoryStore::with_keys(known))
}

/// Wire a dispatcher from already-built adapters.
#[must_use]
pub fn assemble(
    config: &Config,
    feed: Arc<dyn TokenFeed>,
    sender: Arc<dyn MessageSender>,
    store: Box<dyn LedgerStore>,
) -> Dispatcher {
    let fetcher = Fetcher::new(feed, config.feed.retry());
    let notifier = Notifier::new(sender, config.telegram.policy());
    let ledger = Ledger::load(store);
    Dispatcher::new(fetcher, notifier, ledger, config.poll.policy())
}

/// Build a dispatcher with production adapters.
pub fn build_dispatcher(config: &Config) -> Result<Dispatcher> {
    let feed = build_feed(config)?;
    let sender = build_sender(config)?;
    let store = build_store(config);

    info!(
        feed = feed.name(),
        destination = %sender.destination(),
        ledger = %store.location(),
        "Runtime wired"
    );
    Ok(assemble(config, feed, sender, store))
}
