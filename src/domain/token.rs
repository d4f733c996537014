//! Normalized view of one feed record.

use std::collections::BTreeMap;

use super::ids::IdentityKey;

/// Display name used when no rule yields a name.
pub const UNKNOWN_TOKEN: &str = "Unknown Token";

/// Chain label used when the record names no network.
pub const NOT_AVAILABLE: &str = "N/A";

/// Kinds of secondary links carried alongside the contact link.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum LinkKind {
    /// Project website.
    Website,
    /// Social profile (Twitter / X).
    Social,
    /// Chart page on the feed source.
    Chart,
}

/// Immutable, presentable view derived from one raw record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NormalizedToken {
    /// Dedup key; `None` means the record can never be notified.
    pub identity_key: Option<IdentityKey>,
    /// Best-effort name, never empty.
    pub display_name: String,
    /// Network identifier or [`NOT_AVAILABLE`].
    pub chain: String,
    /// Community chat link; gates notification.
    pub contact_link: Option<String>,
    /// Website, social and chart links, each independently optional.
    pub secondary_links: BTreeMap<LinkKind, Option<String>>,
    /// Free-text description, verbatim.
    pub short_description: Option<String>,
}

impl NormalizedToken {
    /// Secondary link of the given kind, if present.
    #[must_use]
    pub fn link(&self, kind: LinkKind) -> Option<&str> {
        self.secondary_links
            .get(&kind)
            .and_then(|link| link.as_deref())
    }

    /// Whether this token may be announced at all.
    #[must_use]
    pub fn is_eligible(&self) -> bool {
        self.identity_key.is_some() && self.contact_link.is_some()
    }
}
