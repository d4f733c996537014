//! Recording sender for notification assertions in tests.

use std::sync::Arc;

use async_trait::async_trait;
use parking_lot::Mutex;

use crate::error::SendError;
use crate::port::MessageSender;

/// When a [`RecordingSender`] should fail.
#[derive(Debug, Clone)]
enum FailureMode {
    Never,
    Always,
    /// Fail this many more attempts, then succeed.
    First(u32),
    /// Fail every message containing the text.
    Containing(String),
}

#[derive(Debug, Default)]
struct Log {
    attempts: Vec<String>,
    delivered: Vec<String>,
}

/// Thread-safe sender that records every attempt and delivery.
#[derive(Clone)]
pub struct RecordingSender {
    log: Arc<Mutex<Log>>,
    mode: Arc<Mutex<FailureMode>>,
}

impl RecordingSender {
    /// A sender where every attempt succeeds.
    pub fn new() -> Self {
        Self::with_mode(FailureMode::Never)
    }

    /// A sender where every attempt fails.
    pub fn failing() -> Self {
        Self::with_mode(FailureMode::Always)
    }

    /// A sender whose first `n` attempts fail.
    pub fn failing_first(n: u32) -> Self {
        Self::with_mode(FailureMode::First(n))
    }

    /// A sender that rejects messages containing `needle`.
    pub fn failing_when_containing(needle: impl Into<String>) -> Self {
        Self::with_mode(FailureMode::Containing(needle.into()))
    }

    fn with_mode(mode: FailureMode) -> Self {
        Self {
            log: Arc::new(Mutex::new(Log::default())),
            mode: Arc::new(Mutex::new(mode)),
        }
    }

    /// Every text passed to `send`, in order.
    pub fn attempts(&self) -> Vec<String> {
        self.log.lock().attempts.clone()
    }

    /// Texts that were accepted, in order.
    pub fn delivered(&self) -> Vec<String> {
        self.log.lock().delivered.clone()
    }

    /// Stop failing from now on.
    pub fn recover(&self) {
        *self.mode.lock() = FailureMode::Never;
    }

    fn should_fail(&self, text: &str) -> bool {
        let mut mode = self.mode.lock();
        match &mut *mode {
            FailureMode::Never => false,
            FailureMode::Always => true,
            FailureMode::First(remaining) if *remaining > 0 => {
                *remaining -= 1;
                true
            }
            FailureMode::First(_) => false,
            FailureMode::Containing(needle) => text.contains(needle.as_str()),
        }
    }
}

impl Default for RecordingSender {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl MessageSender for RecordingSender {
    async fn send(&self, text: &str) -> Result<(), SendError> {
        self.log.lock().attempts.push(text.to_string());
        if self.should_fail(text) {
            return Err(SendError::Transport("scripted failure".into()));
        }
        self.log.lock().delivered.push(text.to_string());
        Ok(())
    }

    fn destination(&self) -> String {
        "recording".to_string()
    }
}
