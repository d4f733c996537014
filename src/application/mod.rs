//! Application services (use cases).
//!
//! These services orchestrate domain logic and coordinate adapters to run
//! the deduplicated polling-and-notification pipeline.

pub mod dispatcher;
pub mod fetcher;
pub mod ledger;
pub mod message;
pub mod notifier;
pub mod policy;

pub use dispatcher::{CycleSummary, Dispatcher, RecordOutcome};
pub use fetcher::Fetcher;
pub use ledger::Ledger;
pub use notifier::{Delivery, Notifier};
pub use policy::{DispatchPolicy, NotifyPolicy, RetryPolicy};
