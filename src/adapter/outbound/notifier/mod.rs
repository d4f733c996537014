//! Chat delivery adapters.
//!
//! Implements the `port::MessageSender` trait for the Telegram transport and
//! for a log-only fallback used when Telegram delivery is disabled.

mod log;

#[cfg(feature = "telegram")]
pub mod telegram;

pub use log::LogSender;
