//! Inbound adapters: the operator-facing command line.

pub mod cli;
