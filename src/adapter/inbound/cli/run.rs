//! Handler for the `run` command.

use tokio::signal;
use tokio::sync::watch;
use tracing::{error, info};

use crate::adapter::inbound::cli::command::RunArgs;
use crate::adapter::inbound::cli::output;
use crate::error::{Error, Result};
use crate::infrastructure::bootstrap;
use crate::infrastructure::config::Config;
use crate::infrastructure::keepalive;

/// Execute the run command.
pub async fn execute(args: &RunArgs) -> Result<()> {
    let mut config = Config::load_or_default(&args.config)?;
    apply_run_overrides(&mut config, args);
    config.init_logging();

    print_startup_config(&config, args);

    let mut dispatcher = bootstrap::build_dispatcher(&config)?;

    if args.once {
        let summary = dispatcher.run_cycle().await;
        if output::is_json() {
            output::report(serde_json::json!({
                "command": "run.once",
                "fetch_failed": summary.fetch_failed,
                "fetched": summary.fetched,
                "notified": summary.notified,
                "failed": summary.failed,
                "skipped": summary.skipped(),
                "ledger": dispatcher.ledger().len(),
            }));
        } else {
            output::cycle_summary(&summary, dispatcher.ledger().len());
        }
        return Ok(());
    }

    if config.keepalive.enabled {
        keepalive::spawn(&config.keepalive.bind).await?;
    }

    info!("dexwatch starting");
    let (shutdown_tx, shutdown_rx) = watch::channel(false);
    let mut app_handle = tokio::spawn(dispatcher.run(shutdown_rx));

    tokio::select! {
        result = &mut app_handle => {
            map_join(result)?;
            info!("dexwatch stopped");
            return Ok(());
        }
        _ = signal::ctrl_c() => {
            info!("Shutdown signal received (Ctrl+C)");
            let _ = shutdown_tx.send(true);
        }
    }

    map_join(app_handle.await)?;
    info!("dexwatch stopped");
    Ok(())
}

fn apply_run_overrides(config: &mut Config, args: &RunArgs) {
    if let Some(ref level) = args.log_level {
        config.logging.level = level.clone();
    }
    if args.json_logs || output::is_json() {
        config.logging.format = "json".to_string();
    }
    if args.no_telegram {
        config.telegram.enabled = false;
    }
}

fn map_join<T>(result: std::result::Result<T, tokio::task::JoinError>) -> Result<T> {
    result.map_err(|e| {
        error!(error = %e, "Poll loop task join failed");
        Error::Task(e.to_string())
    })
}

fn print_startup_config(config: &Config, args: &RunArgs) {
    output::banner();
    output::field("Config", args.config.display());
    output::field("Feed", &config.feed.url);
    output::field(
        "Delivery",
        if config.telegram.enabled {
            "telegram"
        } else {
            "log only"
        },
    );
    if config.telegram.enabled {
        output::field("Ledger", config.ledger.path.display());
    } else {
        output::field("Ledger", format!("{} (read only)", config.ledger.path.display()));
    }
    if output::verbosity() > 0 {
        output::field("Interval", format!("{}s", config.poll.interval_secs));
        output::field("Persist", format!("every {}", config.poll.persist_every));
    }
    if !args.once {
        output::field("Stop", "Ctrl+C");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn args() -> RunArgs {
        RunArgs {
            config: PathBuf::from("config.toml"),
            once: false,
            log_level: None,
            json_logs: false,
            no_telegram: false,
        }
    }

    #[test]
    fn overrides_apply_to_config() {
        let mut config = Config::default();
        let args = RunArgs {
            log_level: Some("debug".into()),
            json_logs: true,
            no_telegram: true,
            ..args()
        };

        apply_run_overrides(&mut config, &args);

        assert_eq!(config.logging.level, "debug");
        assert_eq!(config.logging.format, "json");
        assert!(!config.telegram.enabled);
    }

    #[test]
    fn no_overrides_keep_config() {
        let mut config = Config::default();
        apply_run_overrides(&mut config, &args());
        assert_eq!(config.logging.level, "info");
        assert!(config.telegram.enabled);
    }
}
