//! Bounded-retry delivery of rendered announcements.

use std::borrow::Cow;
use std::sync::Arc;

use tokio::time::sleep;
use tracing::{debug, warn};

use super::policy::NotifyPolicy;
use crate::error::SendError;
use crate::port::MessageSender;

/// Appended to messages cut down to the transport limit.
pub const TRUNCATION_MARKER: &str = "\n… (truncated)";

/// Outcome of one notification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Delivery {
    /// Accepted by the transport.
    Sent { attempts: u32, truncated: bool },
    /// Every attempt failed.
    Failed { attempts: u32, last: SendError },
}

impl Delivery {
    #[must_use]
    pub fn is_sent(&self) -> bool {
        matches!(self, Self::Sent { .. })
    }
}

/// Sends messages to the configured destination with bounded retry.
pub struct Notifier {
    sender: Arc<dyn MessageSender>,
    policy: NotifyPolicy,
}

impl Notifier {
    #[must_use]
    pub fn new(sender: Arc<dyn MessageSender>, policy: NotifyPolicy) -> Self {
        Self { sender, policy }
    }

    /// Deliver `message`, never failing loudly.
    ///
    /// The final attempt sends an over-long message truncated to the
    /// transport limit.
    pub async fn notify(&self, message: &str) -> Delivery {
        let attempts = self.policy.retry.attempts;
        let mut last = SendError::Transport("no attempt made".into());

        for attempt in 1..=attempts {
            let final_attempt = attempt == attempts;
            let text = if final_attempt {
                truncate_for_transport(message, self.policy.max_chars)
            } else {
                Cow::Borrowed(message)
            };
            let truncated = matches!(text, Cow::Owned(_));

            match self.sender.send(&text).await {
                Ok(()) => {
                    debug!(attempt, truncated, destination = %self.sender.destination(), "Message sent");
                    return Delivery::Sent {
                        attempts: attempt,
                        truncated,
                    };
                }
                Err(e) => {
                    warn!(attempt, attempts, error = %e, "Failed to send message");
                    last = e;
                    if !final_attempt {
                        sleep(self.policy.retry.backoff).await;
                    }
                }
            }
        }

        Delivery::Failed { attempts, last }
    }
}

/// Cut `message` to at most `max_chars` characters, marker included.
///
/// Prefers the last line break that fits so single-line markup stays
/// balanced; falls back to a character boundary.
pub fn truncate_for_transport(message: &str, max_chars: usize) -> Cow<'_, str> {
    if message.chars().count() <= max_chars {
        return Cow::Borrowed(message);
    }

    let marker_chars = TRUNCATION_MARKER.chars().count();
    if max_chars <= marker_chars {
        return Cow::Owned(message[..char_boundary(message, max_chars)].to_string());
    }

    let prefix = &message[..char_boundary(message, max_chars - marker_chars)];
    let prefix = match prefix.rfind('\n') {
        Some(line_end) if line_end > 0 => &prefix[..line_end],
        _ => prefix,
    };

    Cow::Owned(format!("{prefix}{TRUNCATION_MARKER}"))
}

/// Byte offset just past the first `chars` characters.
fn char_boundary(text: &str, chars: usize) -> usize {
    text.char_indices()
        .nth(chars)
        .map_or(text.len(), |(index, _)| index)
}
