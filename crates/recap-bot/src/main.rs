//! # recap-bot
//!
//! Telegram caption bot binary.
//!
//! Collects a burst of media from a chat, waits for the sender to go
//! quiet, offers caption-transformation modes behind an inline keyboard,
//! and sends everything back with the new captions, individually or as
//! albums. All state is in-memory and per chat; a restart resets it.

mod config;
mod dispatch;
mod gateway;
mod media;

use std::sync::Arc;

use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use recap_core::{EngineConfig, EngineHandle};
use recap_telegram::BotClient;

use crate::config::BotConfig;
use crate::gateway::TelegramGateway;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // -----------------------------------------------------------------------
    // 1. Environment + tracing (respects RUST_LOG)
    // -----------------------------------------------------------------------
    dotenv::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("info,recap_bot=debug")),
        )
        .init();

    info!("Starting recap bot v{}", env!("CARGO_PKG_VERSION"));

    // -----------------------------------------------------------------------
    // 2. Load configuration
    // -----------------------------------------------------------------------
    let config = BotConfig::from_env()?;
    info!(
        api_base = %config.api_base,
        debounce_ms = config.debounce.as_millis() as u64,
        poll_timeout_secs = config.poll_timeout_secs,
        "Loaded configuration"
    );

    // -----------------------------------------------------------------------
    // 3. Platform client + engine
    // -----------------------------------------------------------------------
    let client = BotClient::with_base(&config.api_base, &config.token, config.poll_timeout_secs);
    let gateway = Arc::new(TelegramGateway::new(client.clone()));
    let engine = recap_core::spawn(
        gateway,
        EngineConfig {
            debounce: config.debounce,
        },
    );

    // -----------------------------------------------------------------------
    // 4. Long-poll until Ctrl+C
    // -----------------------------------------------------------------------
    tokio::select! {
        _ = poll_updates(client, engine) => {}
        _ = tokio::signal::ctrl_c() => {
            info!("Received Ctrl+C, shutting down");
        }
    }

    Ok(())
}

/// Fetch updates forever, feeding each one through the dispatcher. Poll
/// failures back off briefly instead of tearing the process down.
async fn poll_updates(client: BotClient, engine: EngineHandle) {
    let mut offset: Option<i64> = None;
    info!("Polling for updates");

    loop {
        match client.get_updates(offset).await {
            Ok(updates) => {
                for update in updates {
                    offset = Some(update.update_id + 1);
                    dispatch::dispatch_update(&client, &engine, update).await;
                }
            }
            Err(e) => {
                warn!(error = %e, "getUpdates failed, backing off");
                tokio::time::sleep(std::time::Duration::from_secs(5)).await;
            }
        }
    }
}
