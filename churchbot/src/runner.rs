//! Bot entry points: `run_bot` builds everything and drives the session orchestrator until it
//! terminates; `init_data` only prepares the data directory.

use anyhow::{Context, Result};
use churchbot_core::init_tracing;
use std::path::Path;
use std::sync::Arc;
use tokio_util::sync::CancellationToken;
use tracing::{error, info, instrument};

use crate::components::{build_bot_components, BotComponents};
use crate::config::BotConfig;
use crate::session::{SessionExit, SessionOrchestrator};
use crate::telegram::{build_teloxide_bot, TelegramBotAdapter, TelegramGateway};

fn ensure_log_dir(log_file: &str) -> Result<()> {
    if let Some(dir) = Path::new(log_file)
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
    {
        std::fs::create_dir_all(dir)
            .with_context(|| format!("Failed to create log directory {}", dir.display()))?;
    }
    Ok(())
}

/// Cancels `cancel` on Ctrl-C.
fn spawn_ctrl_c(cancel: CancellationToken) {
    tokio::spawn(async move {
        match tokio::signal::ctrl_c().await {
            Ok(()) => {
                info!("Ctrl-C received, shutting down");
                cancel.cancel();
            }
            Err(e) => error!(error = %e, "Failed to listen for Ctrl-C"),
        }
    });
}

/// Runs the bot until the session terminates. The returned exit carries the process exit code.
#[instrument(skip(config))]
pub async fn run_bot(config: BotConfig) -> Result<SessionExit> {
    config.validate()?;
    ensure_log_dir(config.log_file())?;
    init_tracing(config.log_file(), config.base().debug)?;

    info!(
        data_dir = %config.data_dir().display(),
        max_retries = config.session().start_retries,
        backoff_seconds = config.session().backoff_seconds,
        "Starting churchbot"
    );

    let teloxide_bot = build_teloxide_bot(&config)?;
    let adapter = Arc::new(TelegramBotAdapter::new(teloxide_bot.clone()));
    let BotComponents {
        dispatcher,
        scheduler,
        ..
    } = build_bot_components(&config, adapter).await?;

    let gateway = Arc::new(TelegramGateway::new(teloxide_bot, dispatcher));
    let cancel = CancellationToken::new();
    spawn_ctrl_c(cancel.clone());

    let mut orchestrator =
        SessionOrchestrator::new(gateway, scheduler, config.retry_policy(), cancel);
    let exit = orchestrator.run().await;

    info!(exit = ?exit, "churchbot stopped");
    Ok(exit)
}

/// Creates the data directory and its initial files, then exits.
pub async fn init_data(data_dir: &Path) -> Result<()> {
    churchbot_storage::init_data_dir(data_dir)
        .await
        .with_context(|| format!("Failed to initialize {}", data_dir.display()))?;
    Ok(())
}
