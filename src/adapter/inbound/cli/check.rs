//! Diagnostic command handlers.

use std::path::Path;

use chrono::Utc;
use serde_json::json;

use crate::adapter::inbound::cli::command::CheckCommand;
use crate::adapter::inbound::cli::output;
use crate::application::{Fetcher, Ledger};
use crate::domain::normalize;
use crate::error::Result;
use crate::infrastructure::bootstrap;
use crate::infrastructure::config::Config;

const BOT_TOKEN_VAR: &str = "TELEGRAM_BOT_TOKEN";
const CHAT_ID_VAR: &str = "TELEGRAM_CHAT_ID";

/// Raw records dumped by `check feed -vv`.
const RAW_SAMPLE: usize = 5;

/// Execute a `check` subcommand.
pub async fn execute(command: &CheckCommand) -> Result<()> {
    match command {
        CheckCommand::Config(arg) => execute_config(&arg.config),
        CheckCommand::Feed(arg) => execute_feed(&arg.config).await,
        CheckCommand::Telegram(arg) => execute_telegram(&arg.config).await,
    }
}

fn env_present(name: &str) -> bool {
    std::env::var(name).is_ok_and(|value| !value.trim().is_empty())
}

/// Validate the configuration file without starting the poll loop.
pub fn execute_config(config_path: &Path) -> Result<()> {
    let exists = config_path.exists();
    let config = Config::load_or_default(config_path)?;
    let token_present = env_present(BOT_TOKEN_VAR);
    let chat_present = env_present(CHAT_ID_VAR);

    if output::is_json() {
        output::report(json!({
            "command": "check.config",
            "config": config_path.display().to_string(),
            "file_found": exists,
            "feed_url": config.feed.url,
            "ledger": config.ledger.path.display().to_string(),
            "telegram_enabled": config.telegram.enabled,
            "telegram_token_present": token_present,
            "telegram_chat_present": chat_present,
            "status": "valid",
        }));
        return Ok(());
    }

    output::section("Configuration Check");
    output::field("Config", config_path.display());
    if exists {
        output::ok("Configuration file is valid");
    } else {
        output::warn("Configuration file not found, using defaults");
    }

    output::section("Summary");
    output::field("Feed", &config.feed.url);
    output::field(
        "Fetch",
        format!(
            "{} attempts, {}s timeout",
            config.feed.attempts, config.feed.timeout_secs
        ),
    );
    output::field("Interval", format!("{}s", config.poll.interval_secs));
    output::field("Ledger", config.ledger.path.display());

    if config.telegram.enabled {
        if token_present && chat_present {
            output::ok("Telegram integration configured");
        } else {
            output::warn("Telegram enabled but environment variables are missing");
            if !token_present {
                output::field("Missing", BOT_TOKEN_VAR);
            }
            if !chat_present {
                output::field("Missing", CHAT_ID_VAR);
            }
        }
    } else {
        output::field("Telegram", "disabled");
    }

    if config.keepalive.enabled {
        output::field("Keep-alive", &config.keepalive.bind);
    }

    output::ok("Configuration check complete");
    Ok(())
}

/// Fetch the feed once and report how many records would be announced.
pub async fn execute_feed(config_path: &Path) -> Result<()> {
    let config = Config::load_or_default(config_path)?;
    let fetcher = Fetcher::new(bootstrap::build_feed(&config)?, config.feed.retry());
    let ledger = Ledger::load(bootstrap::build_store(&config));

    output::section("Feed Check");
    output::field("Feed", &config.feed.url);

    let records = fetcher.fetch().await?;
    let tokens: Vec<_> = records.iter().map(normalize).collect();
    let eligible = tokens.iter().filter(|token| token.is_eligible()).count();
    let new = tokens
        .iter()
        .filter(|token| token.is_eligible())
        .filter_map(|token| token.identity_key.as_ref())
        .filter(|key| !ledger.contains(key))
        .count();

    if output::is_json() {
        let sample = (output::verbosity() > 1)
            .then(|| records.iter().take(RAW_SAMPLE).collect::<Vec<_>>());
        output::report(json!({
            "command": "check.feed",
            "url": config.feed.url,
            "records": records.len(),
            "eligible": eligible,
            "new": new,
            "sample": sample,
        }));
        return Ok(());
    }

    output::ok(&format!("Fetched {} records", records.len()));
    output::field("Eligible", eligible);
    output::field("New", new);
    if output::verbosity() > 0 {
        for token in tokens.iter().filter(|token| token.is_eligible()) {
            output::field(&token.chain, &token.display_name);
        }
    }
    if output::verbosity() > 1 {
        for (index, record) in records.iter().take(RAW_SAMPLE).enumerate() {
            output::raw_record(index, record);
        }
    }
    Ok(())
}

/// Send a test message through the configured Telegram chat.
pub async fn execute_telegram(config_path: &Path) -> Result<()> {
    let mut config = Config::load_or_default(config_path)?;
    config.telegram.enabled = true;
    let sender = bootstrap::build_sender(&config)?;
    let destination = sender.destination();

    output::section("Telegram Check");
    output::field("Destination", &destination);

    let text = format!(
        "✅ <b>dexwatch test message</b>\n<i>Sent at {}</i>",
        Utc::now().format("%Y-%m-%d %H:%M:%S UTC")
    );
    sender.send(&text).await?;

    if output::is_json() {
        output::report(json!({
            "command": "check.telegram",
            "destination": destination,
            "status": "sent",
        }));
        return Ok(());
    }

    output::ok("Test message sent, check the chat");
    Ok(())
}
