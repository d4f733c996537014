//! Domain identifier types with proper encapsulation.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Stable identity of a token across polling cycles (its contract address).
///
/// The inner String is private to ensure all construction goes through
/// [`IdentityKey::parse`], which rejects blank input.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct IdentityKey(String);

impl IdentityKey {
    /// Build a key from raw text, trimming whitespace.
    ///
    /// Returns `None` when nothing usable remains.
    #[must_use]
    pub fn parse(raw: &str) -> Option<Self> {
        let trimmed = raw.trim();
        (!trimmed.is_empty()).then(|| Self(trimmed.to_string()))
    }

    /// Get the key as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Abbreviated form used when a record carries no usable name.
    ///
    /// Short (Solana-style) keys keep their first 8 characters; longer
    /// (EVM-style) keys keep the first 6 and the last 4.
    #[must_use]
    pub fn short_form(&self) -> String {
        let chars: Vec<char> = self.0.chars().collect();
        if chars.len() < 15 {
            let head: String = chars.iter().take(8).collect();
            format!("{head}…")
        } else {
            let head: String = chars[..6].iter().collect();
            let tail: String = chars[chars.len() - 4..].iter().collect();
            format!("{head}…{tail}")
        }
    }
}

impl fmt::Display for IdentityKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl AsRef<str> for IdentityKey {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
