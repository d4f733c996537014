//! Ledger file location.

use std::path::PathBuf;

use serde::Deserialize;

/// Ledger storage configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct LedgerConfig {
    /// JSON file holding announced identity keys.
    #[serde(default = "default_path")]
    pub path: PathBuf,
}

fn default_path() -> PathBuf {
    PathBuf::from("notified_tokens.json")
}

impl Default for LedgerConfig {
    fn default() -> Self {
        Self {
            path: default_path(),
        }
    }
}
