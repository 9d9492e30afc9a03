// CareBot Entry Point
// Telegram long-polling loop feeding the dialogue supervisor

mod actors;
mod config;
mod database;
mod error;
mod fs_manager;
mod models;
mod responder;
mod sentiment;
mod telemetry;
mod transport;

#[cfg(test)]
mod tests;

use actors::{SqliteInteractionLog, SupervisorHandle, SupervisorSettings};
use anyhow::Context;
use config::BotConfig;
use fs_manager::PortablePathManager;
use sentiment::SentimentClassifier;
use std::sync::Arc;
use tokio::sync::mpsc;
use tracing::{error, info, warn};
use transport::{ChatTransport, TelegramTransport};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = BotConfig::from_env().context("Invalid configuration")?;
    telemetry::init_tracing(config.log_format)?;

    // Initialize File System (Portable)
    if let Err(e) = PortablePathManager::init() {
        warn!("Failed to initialize data directories: {}", e);
    }

    info!(
        backend = ?config.sentiment_backend,
        db = %config.db_path.display(),
        "BOT STARTED"
    );

    let pool = database::init_db(&config.db_path)
        .await
        .context("Failed to initialize database")?;

    let classifier = Arc::new(SentimentClassifier::new(
        sentiment::load_model(&config).await,
    ));
    if !classifier.has_model() {
        info!("Sentiment model unavailable, using keyword scoring only");
    }

    let transport = Arc::new(TelegramTransport::from_config(&config)?);
    let log = Arc::new(SqliteInteractionLog::new(pool.clone()));
    let supervisor = SupervisorHandle::spawn(
        transport.clone(),
        log,
        classifier,
        SupervisorSettings {
            diary_limit: config.diary_limit,
            strict_logging: config.strict_logging,
        },
    );

    let (inbound_tx, mut inbound_rx) = mpsc::channel(64);
    let poller = {
        let transport = transport.clone();
        tokio::spawn(async move {
            if let Err(e) = transport.run(inbound_tx).await {
                error!("Transport stopped: {}", e);
            }
        })
    };

    loop {
        tokio::select! {
            event = inbound_rx.recv() => match event {
                Some(event) => {
                    if let Err(e) = supervisor.dispatch(event).await {
                        error!("Failed to dispatch event: {}", e);
                        break;
                    }
                }
                None => break,
            },
            _ = tokio::signal::ctrl_c() => {
                info!("Shutdown signal received");
                break;
            }
        }
    }

    poller.abort();
    if let Err(e) = supervisor.shutdown().await {
        warn!("Supervisor already stopped: {}", e);
    }
    pool.close().await;
    info!("BOT STOPPED");
    Ok(())
}
