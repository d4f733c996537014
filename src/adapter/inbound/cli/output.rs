//! Terminal output for CLI handlers.
//!
//! Commands print human-readable reports styled with `owo-colors`. Under
//! `--json` every command prints exactly one JSON report on stdout and the
//! human lines are dropped. `--quiet` keeps warnings and errors only.

use std::fmt::Display;

use owo_colors::OwoColorize;
use parking_lot::RwLock;
use serde_json::json;

use crate::application::CycleSummary;
use crate::domain::RawRecord;

/// Output flags shared by CLI handlers.
#[derive(Debug, Clone, Copy, Default)]
pub struct OutputConfig {
    pub json: bool,
    pub quiet: bool,
    /// Number of `-v` flags.
    pub verbose: u8,
}

impl OutputConfig {
    #[must_use]
    pub const fn new(json: bool, quiet: bool, verbose: u8) -> Self {
        Self {
            json,
            quiet,
            verbose,
        }
    }
}

static OUTPUT: RwLock<OutputConfig> = RwLock::new(OutputConfig::new(false, false, 0));

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Level {
    Info,
    Warn,
}

fn shows(config: OutputConfig, level: Level) -> bool {
    !config.json && (level == Level::Warn || !config.quiet)
}

fn print_at(level: Level, line: impl Display) {
    if shows(*OUTPUT.read(), level) {
        println!("{line}");
    }
}

/// Apply the global `--json`, `--quiet` and `-v` flags.
pub fn configure(config: OutputConfig) {
    *OUTPUT.write() = config;
}

#[must_use]
pub fn is_json() -> bool {
    OUTPUT.read().json
}

#[must_use]
pub fn verbosity() -> u8 {
    OUTPUT.read().verbose
}

/// `dexwatch <version>` banner printed before a long-running command.
pub fn banner() {
    print_at(
        Level::Info,
        format_args!(
            "{} {}\n",
            "dexwatch".bold(),
            env!("CARGO_PKG_VERSION").dimmed()
        ),
    );
}

pub fn section(title: &str) {
    print_at(Level::Info, format_args!("\n{}", title.bold()));
}

pub fn field(label: &str, value: impl Display) {
    print_at(Level::Info, format_args!("  {:<12} {}", label.dimmed(), value));
}

pub fn ok(message: &str) {
    print_at(Level::Info, format_args!("  {} {message}", "✓".green()));
}

pub fn warn(message: &str) {
    print_at(Level::Warn, format_args!("  {} {message}", "⚠".yellow()));
}

/// Report a failed command on stderr.
pub fn error(message: &str) {
    if is_json() {
        eprintln!("{}", json!({ "error": message }));
    } else {
        eprintln!("  {} {message}", "×".red());
    }
}

/// Print the single JSON report of a command.
pub fn report(value: serde_json::Value) {
    println!("{value}");
}

/// Human summary of a single poll cycle.
///
/// The per-reason skip counts are shown from `-v` up.
pub fn cycle_summary(summary: &CycleSummary, ledger_len: usize) {
    if summary.fetch_failed {
        warn("No data received from feed");
        return;
    }

    ok(&format!(
        "Cycle complete: {} fetched, {} announced, {} skipped",
        summary.fetched,
        summary.notified,
        summary.skipped()
    ));
    if summary.failed > 0 {
        warn(&format!(
            "{} announcements not delivered, they are retried next cycle",
            summary.failed
        ));
    }
    if verbosity() > 0 {
        field("No address", summary.skipped_no_identity);
        field("No Telegram", summary.skipped_no_contact);
        field("Known", summary.skipped_seen);
    }
    field("Ledger", format!("{ledger_len} tokens"));
}

/// Sorted identity keys stored at `location`.
pub fn ledger_listing(location: &str, found: bool, keys: &[String]) {
    section("Ledger");
    field("Path", location);
    if !found {
        warn("No ledger file yet");
    }
    field("Tokens", keys.len().cyan());
    if keys.is_empty() {
        return;
    }

    print_at(Level::Info, "");
    for key in keys {
        print_at(Level::Info, format_args!("  {key}"));
    }
}

/// Dump one feed record as pretty JSON.
pub fn raw_record(index: usize, record: &RawRecord) {
    section(&format!("Record #{}", index + 1));
    let pretty = serde_json::to_string_pretty(record).unwrap_or_else(|_| record.to_string());
    for line in pretty.lines() {
        print_at(Level::Info, format_args!("  {}", line.dimmed()));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn quiet_keeps_warnings_only() {
        let quiet = OutputConfig::new(false, true, 0);
        assert!(!shows(quiet, Level::Info));
        assert!(shows(quiet, Level::Warn));
    }

    #[test]
    fn json_mode_drops_human_lines() {
        let json = OutputConfig::new(true, false, 0);
        assert!(!shows(json, Level::Info));
        assert!(!shows(json, Level::Warn));
    }

    #[test]
    fn default_shows_everything() {
        assert!(shows(OutputConfig::default(), Level::Info));
        assert!(shows(OutputConfig::default(), Level::Warn));
    }
}
