//! Ledger storage port.

use crate::error::LedgerError;

/// Durable storage for the list of notified identity keys.
///
/// `write` replaces the stored content wholesale; it is never an
/// incremental patch.
pub trait LedgerStore: Send + Sync {
    /// Read the stored keys.
    ///
    /// Returns [`LedgerError::Missing`] when nothing has been stored yet.
    fn read(&self) -> Result<Vec<String>, LedgerError>;

    /// Replace the stored keys.
    fn write(&self, keys: &[String]) -> Result<(), LedgerError>;

    /// Human-readable location for logging.
    fn location(&self) -> String;
}

impl<T: LedgerStore + ?Sized> LedgerStore for std::sync::Arc<T> {
    fn read(&self) -> Result<Vec<String>, LedgerError> {
        (**self).read()
    }

    fn write(&self, keys: &[String]) -> Result<(), LedgerError> {
        (**self).write(keys)
    }

    fn location(&self) -> String {
        (**self).location()
    }
}
