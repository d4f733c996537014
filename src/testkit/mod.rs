//! Shared test utilities available to both unit and integration tests.
//!
//! Enabled via `#[cfg(test)]` (unit tests) or the `testkit` feature
//! (integration tests).
//!
//! # Modules
//!
//! - [`feed`] - Mock [`TokenFeed`](crate::port::TokenFeed): `ScriptedFeed`.
//! - [`sender`] - Mock [`MessageSender`](crate::port::MessageSender):
//!   `RecordingSender` with configurable failures.
//! - [`record`] - Builders for raw feed records.

pub mod feed;
pub mod record;
pub mod sender;
