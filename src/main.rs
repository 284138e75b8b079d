//! SolWatch Relay - Main Entry Point
//!
//! Webhook-to-Telegram relay for withdrawal activity on monitored token
//! accounts.

use anyhow::Result;
use std::sync::Arc;
use tracing::info;

use solwatch_relay::config::Config;
use solwatch_relay::dedup;
use solwatch_relay::notifier::TelegramNotifier;
use solwatch_relay::server::{create_router, AppState};

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "solwatch_relay=debug".into()),
        )
        .init();

    // Load configuration
    dotenvy::dotenv().ok();
    let config = Config::from_env()?;

    info!(
        version = env!("CARGO_PKG_VERSION"),
        "Starting SolWatch Relay"
    );

    // Build the configured dedup backend
    let store = dedup::from_config(&config).await?;
    info!(backend = store.backend_name(), "Dedup store ready");

    let notifier = Arc::new(TelegramNotifier::new(
        config.bot_token.clone(),
        config.chat_id.clone(),
    ));

    let state = AppState::new(store, notifier);
    let app = create_router(state);

    let listener = tokio::net::TcpListener::bind(&config.bind_address).await?;
    info!(address = %config.bind_address, "Relay listening");

    // Graceful shutdown handler
    let shutdown_signal = async {
        tokio::signal::ctrl_c()
            .await
            .expect("Failed to install CTRL+C signal handler");
        info!("Received shutdown signal");
    };

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal)
        .await?;

    info!("Relay shutdown complete");
    Ok(())
}
