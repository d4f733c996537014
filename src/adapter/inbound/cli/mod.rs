//! CLI module graph.

pub mod check;
pub mod command;
pub mod ledger;
pub mod output;
pub mod run;

pub use command::{Cli, Commands};

use crate::error::Result;

/// Dispatch a parsed command line to its handler.
pub async fn dispatch(cli: Cli) -> Result<()> {
    output::configure(output::OutputConfig::new(cli.json, cli.quiet, cli.verbose));

    match cli.command {
        Commands::Run(args) => run::execute(&args).await,
        Commands::Check(command) => check::execute(&command).await,
        Commands::Ledger(command) => ledger::execute(&command),
    }
}
