//! Handler for `ledger show`.

use std::path::Path;

use serde_json::json;

use crate::adapter::inbound::cli::command::LedgerCommand;
use crate::adapter::inbound::cli::output;
use crate::adapter::outbound::ledger::JsonFileStore;
use crate::error::{LedgerError, Result};
use crate::infrastructure::config::Config;
use crate::port::LedgerStore;

/// Execute a `ledger` subcommand.
pub fn execute(command: &LedgerCommand) -> Result<()> {
    match command {
        LedgerCommand::Show(arg) => execute_show(&arg.config),
    }
}

/// Print the ledger size and its identity keys.
///
/// A missing ledger file is reported as empty; a malformed one is an error.
pub fn execute_show(config_path: &Path) -> Result<()> {
    let config = Config::load_or_default(config_path)?;
    let store = JsonFileStore::new(config.ledger.path.clone());

    let (keys, found) = match store.read() {
        Ok(mut keys) => {
            keys.sort();
            keys.dedup();
            (keys, true)
        }
        Err(LedgerError::Missing { .. }) => (Vec::new(), false),
        Err(e) => return Err(e.into()),
    };

    if output::is_json() {
        output::report(json!({
            "command": "ledger.show",
            "path": store.location(),
            "exists": found,
            "count": keys.len(),
            "keys": keys,
        }));
        return Ok(());
    }

    output::ledger_listing(&store.location(), found, &keys);
    Ok(())
}
