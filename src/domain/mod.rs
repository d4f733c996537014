//! Feed-agnostic domain logic: record access, normalization, token views.

mod ids;
mod token;

pub mod normalize;
pub mod value;

pub use ids::IdentityKey;
pub use normalize::normalize;
pub use token::{LinkKind, NormalizedToken, NOT_AVAILABLE, UNKNOWN_TOKEN};

/// One loosely-typed record as delivered by the upstream feed.
pub type RawRecord = serde_json::Value;
