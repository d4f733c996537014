//! Telegram delivery.
//!
//! Sends rendered announcements to a single chat or channel through the
//! Bot API. Requires the `telegram` feature to be enabled.

mod notifier;

pub use notifier::{TelegramConfig, TelegramSender};
