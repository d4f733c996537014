//! Log-only sender.

use async_trait::async_trait;
use tracing::info;

use crate::error::SendError;
use crate::port::MessageSender;

/// A sender that writes messages to the log instead of a chat.
///
/// Used when Telegram delivery is disabled; every send succeeds.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogSender;

#[async_trait]
impl MessageSender for LogSender {
    async fn send(&self, text: &str) -> Result<(), SendError> {
        info!(chars = text.chars().count(), message = %text, "Message (delivery disabled)");
        Ok(())
    }

    fn destination(&self) -> String {
        "log".to_string()
    }
}
