//! Command-line interface definitions.
//!
//! Defines the CLI structure for dexwatch using `clap`: the long-running
//! poll loop, diagnostic checks, and ledger inspection.

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

/// Announce newly listed tokens to a Telegram chat
#[derive(Parser, Debug)]
#[command(name = "dexwatch")]
#[command(version, about)]
pub struct Cli {
    /// JSON output for scripting
    #[arg(long, global = true)]
    pub json: bool,

    /// Decrease output verbosity
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Increase output verbosity
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Commands,
}

/// Top-level subcommands for the dexwatch CLI.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Poll the feed and announce new tokens until interrupted
    Run(RunArgs),

    /// Run diagnostic checks
    #[command(subcommand)]
    Check(CheckCommand),

    /// Inspect the notification ledger
    #[command(subcommand)]
    Ledger(LedgerCommand),
}

/// Subcommands for `dexwatch check`.
#[derive(Subcommand, Debug)]
pub enum CheckCommand {
    /// Validate the configuration file and environment.
    Config(ConfigPathArg),
    /// Fetch the feed once and report what would be announced.
    Feed(ConfigPathArg),
    /// Send a test message to the configured chat.
    Telegram(ConfigPathArg),
}

/// Subcommands for `dexwatch ledger`.
#[derive(Subcommand, Debug)]
pub enum LedgerCommand {
    /// Print the number of announced tokens and their addresses.
    Show(ConfigPathArg),
}

/// Shared `--config` argument.
#[derive(Args, Debug, Clone)]
pub struct ConfigPathArg {
    /// Path to the configuration file.
    #[arg(short, long, default_value = "config.toml")]
    pub config: PathBuf,
}

/// Arguments for the `run` subcommand.
#[derive(Args, Debug, Clone)]
pub struct RunArgs {
    /// Path to the configuration file.
    #[arg(short, long, default_value = "config.toml")]
    pub config: PathBuf,

    /// Run a single cycle and exit.
    #[arg(long)]
    pub once: bool,

    /// Override the configured log level.
    #[arg(long)]
    pub log_level: Option<String>,

    /// Emit logs as JSON.
    #[arg(long)]
    pub json_logs: bool,

    /// Log announcements instead of sending them to Telegram.
    #[arg(long)]
    pub no_telegram: bool,
}
