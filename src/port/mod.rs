//! Trait definitions (hexagonal ports). Depend only on domain.
//!
//! Ports define the extension points in the hexagonal architecture.
//! They are traits that adapters implement to integrate with external
//! systems (the listing feed, the chat transport, ledger storage).
//!
//! # Architecture
//!
//! ```text
//!                    ┌─────────────────────────┐
//!                    │      Application        │
//!                    │                         │
//!     ┌──────────────┤  Domain + Port          ├──────────────┐
//!     │              │                         │              │
//!     │              └─────────────────────────┘              │
//!     │                         │                             │
//!     ▼                         ▼                             ▼
//! ┌─────────┐            ┌─────────────┐              ┌───────────┐
//! │  Feed   │            │   Ledger    │              │  Sender   │
//! │ Adapter │            │   Store     │              │  Adapter  │
//! └─────────┘            └─────────────┘              └───────────┘
//! ```
//!
//! # Available Ports
//!
//! - [`TokenFeed`] - Current record set from the upstream listing feed
//! - [`MessageSender`] - Text delivery to the configured chat
//! - [`LedgerStore`] - Durable storage for notified identity keys

pub mod outbound;

pub use outbound::feed::TokenFeed;
pub use outbound::notifier::MessageSender;
pub use outbound::store::LedgerStore;
