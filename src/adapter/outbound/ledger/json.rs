//! JSON file ledger storage.
//!
//! Stores the notified keys as a pretty-printed JSON array. Writes use the
//! write-to-temp-then-rename pattern so a crash mid-write never leaves a
//! truncated ledger behind.

use std::fs;
use std::io::{ErrorKind, Write};
use std::path::PathBuf;

use crate::error::LedgerError;
use crate::port::LedgerStore;

/// Ledger stored as a JSON array of strings in a single file.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    /// Create a store backed by `path`. Nothing is touched until read or write.
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl LedgerStore for JsonFileStore {
    fn read(&self) -> Result<Vec<String>, LedgerError> {
        let content = match fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                return Err(LedgerError::Missing {
                    path: self.path.clone(),
                });
            }
            Err(e) => return Err(e.into()),
        };

        serde_json::from_str(&content).map_err(|source| LedgerError::Malformed {
            path: self.path.clone(),
            source,
        })
    }

    fn write(&self, keys: &[String]) -> Result<(), LedgerError> {
        let json = serde_json::to_string_pretty(keys)?;

        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }

        let temp_path = self.path.with_extension("tmp");
        let mut file = fs::File::create(&temp_path)?;

        let cleanup_and_err = |e: std::io::Error| {
            let _ = fs::remove_file(&temp_path);
            LedgerError::Io(e)
        };

        file.write_all(json.as_bytes()).map_err(cleanup_and_err)?;
        file.sync_all().map_err(cleanup_and_err)?;
        fs::rename(&temp_path, &self.path).map_err(cleanup_and_err)?;

        Ok(())
    }

    fn location(&self) -> String {
        self.path.display().to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_file_is_reported() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonFileStore::new(dir.path().join("absent.json"));
        assert!(matches!(store.read(), Err(LedgerError::Missing { .. })));
    }

    #[test]
    fn malformed_file_is_reported() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("ledger.json");
        fs::write(&path, "{not json").unwrap();

        let store = JsonFileStore::new(&path);
        assert!(matches!(store.read(), Err(LedgerError::Malformed { .. })));
    }

    #[test]
    fn wrong_json_shape_is_malformed() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("ledger.json");
        fs::write(&path, r#"{"keys": ["a"]}"#).unwrap();

        let store = JsonFileStore::new(&path);
        assert!(matches!(store.read(), Err(LedgerError::Malformed { .. })));
    }

    #[test]
    fn write_then_read() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonFileStore::new(dir.path().join("ledger.json"));
        let keys = vec!["0xabc".to_string(), "So1ana".to_string()];

        store.write(&keys).unwrap();
        assert_eq!(store.read().unwrap(), keys);
        assert!(!dir.path().join("ledger.tmp").exists());
    }

    #[test]
    fn write_replaces_previous_content() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonFileStore::new(dir.path().join("ledger.json"));

        store.write(&["a".to_string(), "b".to_string()]).unwrap();
        store.write(&["c".to_string()]).unwrap();
        assert_eq!(store.read().unwrap(), vec!["c".to_string()]);
    }

    #[test]
    fn write_creates_parent_directory() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested/deeper/ledger.json");
        let store = JsonFileStore::new(&path);

        store.write(&[]).unwrap();
        assert!(path.exists());
        assert_eq!(store.read().unwrap(), Vec::<String>::new());
    }
}
