//! Durable set of identity keys that have already been announced.
//!
//! The ledger only grows: a key is added after its notification was
//! confirmed sent and is never removed. Persisting writes a full snapshot,
//! so repeated persists of the same content are harmless.

use std::collections::BTreeSet;

use tracing::{debug, info, warn};

use crate::domain::IdentityKey;
use crate::error::LedgerError;
use crate::port::LedgerStore;

/// In-memory notified-set backed by a [`LedgerStore`].
pub struct Ledger {
    keys: BTreeSet<String>,
    store: Box<dyn LedgerStore>,
}

impl Ledger {
    /// Load the ledger from `store`.
    ///
    /// A missing or unreadable ledger degrades to an empty one; the loss is
    /// logged and may cause duplicate announcements on this run.
    pub fn load(store: Box<dyn LedgerStore>) -> Self {
        let keys = match store.read() {
            Ok(keys) => {
                let keys: BTreeSet<String> = keys.into_iter().collect();
                info!(keys = keys.len(), location = %store.location(), "Ledger loaded");
                keys
            }
            Err(LedgerError::Missing { .. }) => {
                info!(location = %store.location(), "No ledger yet, starting empty");
                BTreeSet::new()
            }
            Err(e) => {
                warn!(error = %e, location = %store.location(), "Ledger unreadable, starting empty");
                BTreeSet::new()
            }
        };

        Self { keys, store }
    }

    /// Whether `key` has already been announced.
    #[must_use]
    pub fn contains(&self, key: &IdentityKey) -> bool {
        self.keys.contains(key.as_str())
    }

    /// Record `key` in memory. Does not persist.
    ///
    /// Returns `false` if the key was already present.
    pub fn add(&mut self, key: &IdentityKey) -> bool {
        self.keys.insert(key.as_str().to_string())
    }

    /// Write the full key set to the store, replacing prior content.
    pub fn persist(&self) -> Result<(), LedgerError> {
        let snapshot: Vec<String> = self.keys.iter().cloned().collect();
        self.store.write(&snapshot)?;
        debug!(keys = snapshot.len(), "Ledger persisted");
        Ok(())
    }

    /// Number of recorded keys.
    #[must_use]
    pub fn len(&self) -> usize {
        self.keys.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    /// Recorded keys in sorted order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.keys.iter().map(String::as_str)
    }

    /// Location of the backing store.
    #[must_use]
    pub fn location(&self) -> String {
        self.store.location()
    }
}
