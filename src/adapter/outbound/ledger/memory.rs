//! In-memory ledger storage for tests and dry runs.

use std::sync::atomic::{AtomicUsize, Ordering};

use parking_lot::RwLock;

use crate::error::LedgerError;
use crate::port::LedgerStore;

/// Ledger storage kept in process memory.
#[derive(Debug, Default)]
pub struct MemoryStore {
    keys: RwLock<Option<Vec<String>>>,
    writes: AtomicUsize,
}

impl MemoryStore {
    /// Create an empty store with nothing persisted yet.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store that already holds `keys`.
    #[must_use]
    pub fn with_keys<I, S>(keys: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            keys: RwLock::new(Some(keys.into_iter().map(Into::into).collect())),
            writes: AtomicUsize::new(0),
        }
    }

    /// Snapshot of the last written keys.
    #[must_use]
    pub fn snapshot(&self) -> Option<Vec<String>> {
        self.keys.read().clone()
    }

    /// Number of completed writes.
    #[must_use]
    pub fn write_count(&self) -> usize {
        self.writes.load(Ordering::SeqCst)
    }
}

impl LedgerStore for MemoryStore {
    fn read(&self) -> Result<Vec<String>, LedgerError> {
        self.keys.read().clone().ok_or_else(|| LedgerError::Missing {
            path: "memory".into(),
        })
    }

    fn write(&self, keys: &[String]) -> Result<(), LedgerError> {
        *self.keys.write() = Some(keys.to_vec());
        self.writes.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }

    fn location(&self) -> String {
        "memory".to_string()
    }
}
