//! Record normalization.
//!
//! Derives a [`NormalizedToken`] from one loosely-typed feed record. Field
//! shapes differ between feed versions, so every attribute is resolved by an
//! ordered list of rules evaluated lazily until one yields a non-empty value.
//! Normalization is pure and total: unexpected shapes fall through to the
//! next rule and finally to a sentinel.

use std::collections::BTreeMap;

use serde_json::{Map, Value};
use url::Url;

use super::ids::IdentityKey;
use super::token::{LinkKind, NormalizedToken, NOT_AVAILABLE, UNKNOWN_TOKEN};
use super::value::{entries, text, text_at};

/// Fields that may hold the contract address, in priority order.
const IDENTITY_PATHS: &[&[&str]] = &[
    &["tokenAddress"],
    &["address"],
    &["contractAddress"],
    &["baseToken", "address"],
    &["tokenInfo", "address"],
];

const CHAIN_PATHS: &[&[&str]] = &[&["chainId"], &["chain"], &["baseToken", "chainId"]];

/// How a display name may be derived from a record.
#[derive(Debug, Clone, Copy)]
enum NameRule {
    /// Non-blank string at a (possibly nested) path.
    Field(&'static [&'static str]),
    /// Word following the first `$` on the description's first line.
    DescriptionTicker,
    /// Abbreviated contract address.
    ShortAddress,
}

const NAME_RULES: &[NameRule] = &[
    NameRule::Field(&["name"]),
    NameRule::Field(&["tokenName"]),
    NameRule::Field(&["symbol"]),
    NameRule::Field(&["tokenSymbol"]),
    NameRule::Field(&["ticker"]),
    NameRule::Field(&["tokenInfo", "name"]),
    NameRule::Field(&["baseTokenInfo", "name"]),
    NameRule::Field(&["profile", "name"]),
    NameRule::Field(&["pairInfo", "baseToken", "name"]),
    NameRule::Field(&["baseToken", "name"]),
    NameRule::DescriptionTicker,
    NameRule::ShortAddress,
];

impl NameRule {
    fn apply(self, record: &Value, key: Option<&IdentityKey>) -> Option<String> {
        match self {
            Self::Field(path) => text_at(record, path).map(|name| name.trim().to_string()),
            Self::DescriptionTicker => {
                text_at(record, &["description"]).and_then(description_ticker)
            }
            Self::ShortAddress => key.map(IdentityKey::short_form),
        }
    }
}

const CHAT_HOSTS: &[&str] = &["t.me", "telegram.me", "telegram.dog"];
const SOCIAL_HOSTS: &[&str] = &["twitter.com", "x.com"];

/// Normalize one raw record.
#[must_use]
pub fn normalize(record: &Value) -> NormalizedToken {
    let identity_key = IDENTITY_PATHS
        .iter()
        .find_map(|path| text_at(record, path).and_then(IdentityKey::parse));

    let display_name = NAME_RULES
        .iter()
        .find_map(|rule| rule.apply(record, identity_key.as_ref()))
        .unwrap_or_else(|| UNKNOWN_TOKEN.to_string());

    let chain = CHAIN_PATHS
        .iter()
        .find_map(|path| text_at(record, path))
        .unwrap_or(NOT_AVAILABLE)
        .trim()
        .to_string();

    let links: Vec<LinkEntry<'_>> = entries(record, "links").map(LinkEntry::new).collect();

    let contact_link = links
        .iter()
        .find(|link| link.is_contact())
        .and_then(LinkEntry::url);

    let mut secondary_links = BTreeMap::new();
    secondary_links.insert(
        LinkKind::Website,
        links
            .iter()
            .find(|link| link.is_website())
            .and_then(LinkEntry::url),
    );
    secondary_links.insert(
        LinkKind::Social,
        links
            .iter()
            .find(|link| link.is_social())
            .and_then(LinkEntry::url),
    );
    secondary_links.insert(
        LinkKind::Chart,
        text(record.get("url")).map(str::to_string),
    );

    NormalizedToken {
        identity_key,
        display_name,
        chain,
        contact_link,
        secondary_links,
        short_description: text(record.get("description")).map(str::to_string),
    }
}

/// Extract a ticker such as `PEPE` from `"$PEPE to the moon"`.
fn description_ticker(description: &str) -> Option<String> {
    let first_line = description.lines().next()?;
    first_line.split('$').skip(1).find_map(|rest| {
        rest.split(char::is_whitespace)
            .next()
            .filter(|word| !word.is_empty())
            .map(str::to_string)
    })
}

/// One element of a record's `links` array.
struct LinkEntry<'a> {
    tags: Vec<String>,
    url: Option<&'a str>,
    host: Option<String>,
    is_http: bool,
}

impl<'a> LinkEntry<'a> {
    fn new(entry: &'a Map<String, Value>) -> Self {
        let tags = ["type", "label"]
            .iter()
            .filter_map(|field| text(entry.get(*field)))
            .map(|tag| tag.trim().to_ascii_lowercase())
            .collect();
        let url = text(entry.get("url")).map(str::trim);
        let strict = url.and_then(|raw| Url::parse(raw).ok());
        let is_http = strict
            .as_ref()
            .is_some_and(|parsed| matches!(parsed.scheme(), "http" | "https"));
        let host = strict
            .filter(Url::has_host)
            .or_else(|| url.and_then(|raw| Url::parse(&format!("https://{raw}")).ok()))
            .and_then(|parsed| parsed.host_str().map(str::to_ascii_lowercase));

        Self {
            tags,
            url,
            host,
            is_http,
        }
    }

    fn url(&self) -> Option<String> {
        self.url.map(str::to_string)
    }

    fn tagged(&self, names: &[&str]) -> bool {
        self.tags.iter().any(|tag| names.contains(&tag.as_str()))
    }

    fn host_in(&self, domains: &[&str]) -> bool {
        self.host.as_deref().is_some_and(|host| {
            domains.iter().any(|domain| {
                host == *domain
                    || host
                        .strip_suffix(domain)
                        .is_some_and(|prefix| prefix.ends_with('.'))
            })
        })
    }

    fn is_contact(&self) -> bool {
        self.url.is_some() && (self.tagged(&["telegram"]) || self.host_in(CHAT_HOSTS))
    }

    fn is_website(&self) -> bool {
        self.url.is_some()
            && (self.tagged(&["website"]) || (self.is_http && !self.host_in(CHAT_HOSTS)))
    }

    fn is_social(&self) -> bool {
        self.url.is_some() && (self.tagged(&["twitter", "x"]) || self.host_in(SOCIAL_HOSTS))
    }
}
