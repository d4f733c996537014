//! Builders for raw feed records.
//!
//! Records mirror the DEX Screener token-profile shape so tests focus on
//! assertions rather than JSON boilerplate.

use serde_json::{json, Value};

use crate::domain::RawRecord;

/// A token profile with a Telegram link.
pub fn listed(address: &str, name: &str) -> RawRecord {
    json!({
        "url": format!("https://dexscreener.com/solana/{address}"),
        "chainId": "solana",
        "tokenAddress": address,
        "name": name,
        "description": format!("{name} community token"),
        "links": [
            {"label": "Website", "url": format!("https://{}.xyz", name.to_lowercase())},
            {"type": "twitter", "url": format!("https://x.com/{}", name.to_lowercase())},
            {"type": "telegram", "url": format!("https://t.me/{}", name.to_lowercase())}
        ]
    })
}

/// A token profile without any chat link.
pub fn without_contact(address: &str, name: &str) -> RawRecord {
    json!({
        "chainId": "ethereum",
        "tokenAddress": address,
        "name": name,
        "links": [
            {"label": "Website", "url": "https://example.org"}
        ]
    })
}

/// A token profile with a Telegram link but no usable address.
pub fn without_identity(name: &str) -> RawRecord {
    json!({
        "chainId": "base",
        "tokenAddress": "",
        "name": name,
        "links": [{"type": "telegram", "url": "https://t.me/orphan"}]
    })
}

/// Replace or add a top-level field.
pub fn with_field(mut record: RawRecord, key: &str, value: Value) -> RawRecord {
    if let Some(object) = record.as_object_mut() {
        object.insert(key.to_string(), value);
    }
    record
}
