//! Telegram sender.

use async_trait::async_trait;
use teloxide::prelude::*;
use teloxide::types::{ParseMode, Recipient};
use teloxide::RequestError;
use tracing::debug;

use crate::error::{ConfigError, SendError};
use crate::port::MessageSender;

const BOT_TOKEN_VAR: &str = "TELEGRAM_BOT_TOKEN";
const CHAT_ID_VAR: &str = "TELEGRAM_CHAT_ID";

/// Credentials and destination for the Telegram sender.
#[derive(Clone)]
pub struct TelegramConfig {
    /// Bot API token obtained from BotFather.
    pub bot_token: String,
    /// Numeric chat id (`-100…` for channels) or `@channel` username.
    pub chat_id: String,
}

impl std::fmt::Debug for TelegramConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TelegramConfig")
            .field("bot_token", &self.masked_token())
            .field("chat_id", &self.chat_id)
            .finish()
    }
}

impl TelegramConfig {
    /// Read `TELEGRAM_BOT_TOKEN` and `TELEGRAM_CHAT_ID` from the environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        let bot_token = env_var(BOT_TOKEN_VAR)?;
        let chat_id = env_var(CHAT_ID_VAR)?;
        let config = Self { bot_token, chat_id };
        config.recipient()?;
        Ok(config)
    }

    /// Parse the configured chat id into a Bot API recipient.
    pub fn recipient(&self) -> Result<Recipient, ConfigError> {
        let chat = self.chat_id.trim();
        if chat.starts_with('@') && chat.len() > 1 {
            return Ok(Recipient::ChannelUsername(chat.to_string()));
        }
        chat.parse::<i64>()
            .map(|id| Recipient::Id(ChatId(id)))
            .map_err(|_| ConfigError::InvalidValue {
                field: CHAT_ID_VAR,
                reason: format!("expected a numeric id or @channel, got '{chat}'"),
            })
    }

    /// Token with everything but the bot id hidden.
    #[must_use]
    pub fn masked_token(&self) -> String {
        match self.bot_token.split_once(':') {
            Some((id, _)) => format!("{id}:****"),
            None => "****".to_string(),
        }
    }
}

fn env_var(name: &'static str) -> Result<String, ConfigError> {
    std::env::var(name)
        .ok()
        .filter(|value| !value.trim().is_empty())
        .ok_or(ConfigError::MissingEnv { name })
}

/// Sends HTML-formatted messages to one Telegram chat.
pub struct TelegramSender {
    bot: Bot,
    recipient: Recipient,
    chat_id: String,
}

impl TelegramSender {
    /// Create a sender for the configured chat.
    pub fn new(config: &TelegramConfig) -> Result<Self, ConfigError> {
        Ok(Self {
            bot: Bot::new(&config.bot_token),
            recipient: config.recipient()?,
            chat_id: config.chat_id.clone(),
        })
    }
}

#[async_trait]
impl MessageSender for TelegramSender {
    async fn send(&self, text: &str) -> Result<(), SendError> {
        let message = self
            .bot
            .send_message(self.recipient.clone(), text)
            .parse_mode(ParseMode::Html)
            .await
            .map_err(|e| match e {
                RequestError::Api(api) => SendError::Rejected(api.to_string()),
                other => SendError::Transport(other.to_string()),
            })?;

        debug!(message_id = message.id.0, "Telegram message delivered");
        Ok(())
    }

    fn destination(&self) -> String {
        format!("telegram:{}", self.chat_id)
    }
}
