//! Infrastructure configuration modules.

pub mod feed;
pub mod keepalive;
pub mod ledger;
pub mod logging;
pub mod poll;
pub mod settings;
pub mod telegram;

pub use settings::Config;
