//! Announcement rendering in Telegram HTML.

use chrono::{DateTime, Utc};

use crate::domain::{IdentityKey, LinkKind, NormalizedToken};

/// Maximum description snippet length in characters.
pub const DESCRIPTION_SNIPPET_CHARS: usize = 100;

const RULE: &str = "━━━━━━━━━━━━━━━━━━━━━";

/// A token that passed the eligibility gate and can be rendered.
#[derive(Debug, Clone, Copy)]
pub struct Announcement<'a> {
    token: &'a NormalizedToken,
    key: &'a IdentityKey,
    contact: &'a str,
}

impl<'a> Announcement<'a> {
    /// Returns `None` unless the token has both an identity key and a
    /// contact link.
    #[must_use]
    pub fn new(token: &'a NormalizedToken) -> Option<Self> {
        Some(Self {
            token,
            key: token.identity_key.as_ref()?,
            contact: token.contact_link.as_deref()?,
        })
    }

    #[must_use]
    pub fn key(&self) -> &IdentityKey {
        self.key
    }

    /// Render the announcement body.
    #[must_use]
    pub fn render(&self, detected_at: DateTime<Utc>) -> String {
        let token = self.token;
        let mut lines = vec![
            RULE.to_string(),
            "🚀 <b>NEW TOKEN DETECTED!</b> 🚀".to_string(),
            RULE.to_string(),
            String::new(),
            format!("💎 <b>Token:</b> <code>{}</code>", escape_html(&token.display_name)),
            format!("⛓️ <b>Network:</b> <code>{}</code>", escape_html(&token.chain)),
            "📝 <b>Contract:</b>".to_string(),
            format!("<code>{}</code>", escape_html(self.key.as_str())),
            String::new(),
            "📱 <b>Community:</b>".to_string(),
            link(self.contact, "Telegram Group"),
        ];

        if let Some(website) = token.link(LinkKind::Website) {
            lines.push("🌐 <b>Website:</b>".to_string());
            lines.push(link(website, "Official Website"));
        }
        if let Some(social) = token.link(LinkKind::Social) {
            lines.push("🐦 <b>Twitter:</b>".to_string());
            lines.push(link(social, "Follow on X"));
        }
        if let Some(snippet) = token.short_description.as_deref().and_then(snippet) {
            lines.push(format!("ℹ️ <i>{}</i>", escape_html(&snippet)));
        }
        if let Some(chart) = token.link(LinkKind::Chart) {
            lines.push(String::new());
            lines.push(format!(
                "📊 <a href=\"{}\"><b>View Chart on DEXScreener</b></a>",
                escape_html(chart)
            ));
        }

        lines.push(String::new());
        lines.push(RULE.to_string());
        lines.push(format!(
            "⏰ <i>Detected at: {}</i>",
            detected_at.format("%Y-%m-%d %H:%M:%S UTC")
        ));
        lines.join("\n")
    }
}

fn link(url: &str, text: &str) -> String {
    format!("<a href=\"{}\">{}</a>", escape_html(url), escape_html(text))
}

/// First line of a description, capped at [`DESCRIPTION_SNIPPET_CHARS`].
/// A blank first line yields no snippet.
fn snippet(description: &str) -> Option<String> {
    let first_line = description.lines().next()?.trim();
    if first_line.is_empty() {
        return None;
    }
    Some(truncate(first_line, DESCRIPTION_SNIPPET_CHARS))
}

/// Truncate a string with ellipsis (Unicode-safe).
pub fn truncate(s: &str, max_chars: usize) -> String {
    let char_count = s.chars().count();
    if char_count > max_chars {
        let truncated: String = s.chars().take(max_chars).collect();
        format!("{}...", truncated)
    } else {
        s.to_string()
    }
}

/// Escape text for Telegram HTML parse mode.
pub fn escape_html(text: &str) -> String {
    let mut result = String::with_capacity(text.len());

    for c in text.chars() {
        match c {
            '&' => result.push_str("&amp;"),
            '<' => result.push_str("&lt;"),
            '>' => result.push_str("&gt;"),
            '"' => result.push_str("&quot;"),
            other => result.push(other),
        }
    }

    result
}
