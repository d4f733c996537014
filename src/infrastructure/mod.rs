//! Infrastructure layer.
//!
//! Provides technical concerns that support the application without containing
//! business logic: configuration, runtime wiring and the keep-alive listener.
//!
//! # Submodules
//!
//! - [`bootstrap`] - Composition root for runtime wiring
//! - [`config`] - Configuration loading and validation
//! - [`keepalive`] - Optional liveness responder

pub mod bootstrap;
pub mod config;
pub mod keepalive;
