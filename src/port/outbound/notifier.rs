//! Chat delivery port.

use async_trait::async_trait;

use crate::error::SendError;

/// Delivers pre-rendered text to a single fixed destination.
///
/// One call is one attempt; retry and truncation live in
/// [`Notifier`](crate::application::notifier::Notifier).
///
/// # Implementation Notes
///
/// - Implementations must be thread-safe (`Send + Sync`)
/// - Text uses Telegram HTML markup (`<b>`, `<i>`, `<code>`, `<a>`)
#[async_trait]
pub trait MessageSender: Send + Sync {
    /// Send one message.
    async fn send(&self, text: &str) -> Result<(), SendError>;

    /// Human-readable destination for logging.
    fn destination(&self) -> String;
}
