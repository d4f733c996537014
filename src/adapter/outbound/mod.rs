//! Outbound adapters (driven side).

pub mod dexscreener;
pub mod ledger;
pub mod notifier;
