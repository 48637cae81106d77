//! Heart Relay Web Server.
//!
//! This binary hosts the relay endpoint:
//! - Receives tile events and test pings from the Heart Matrix page
//! - Relays each one as an email through Resend
//! - Answers with the relay's status and body

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::{Context, Result};
use tokio::{net::TcpListener, signal};
use tracing::{info, warn};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use heart_relay::web::{router, AppState};
use heart_relay::{Config, Relay, ResendMailer};

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize structured JSON logging
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().json().flatten_event(true))
        .init();

    info!("web_server_starting");

    // Load configuration
    let config = Config::from_env();
    let settings = config.email_settings();
    info!(
        port = config.port,
        resend_api_key_set = config.resend_api_key.is_some(),
        to_email_set = config.to_email.is_some(),
        from_email = %config.from_email,
        resend_api_url = %config.resend_api_url,
        "config_loaded"
    );

    if settings.is_none() {
        warn!("Missing RESEND_API_KEY or TO_EMAIL env vars, every request will fail");
    }

    let http = reqwest::Client::builder()
        .build()
        .context("Failed to build HTTP client")?;
    let mailer = ResendMailer::new(http, &config.resend_api_url)
        .context("Invalid RESEND_API_URL")?;
    info!(endpoint = %mailer.endpoint(), "resend_mailer_created");

    let state = AppState::new(Relay::new(settings, Arc::new(mailer)));
    let app = router(state);

    // Bind to address
    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    let listener = TcpListener::bind(addr)
        .await
        .context("Failed to bind to address")?;

    info!(address = %addr, "web_server_listening");

    // Run server with graceful shutdown
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    info!("web_server_shutdown_complete");

    Ok(())
}

/// Create a future that completes when a shutdown signal is received.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            warn!(error = %e, "ctrl_c_handler_failed");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                warn!(error = %e, "sigterm_handler_failed");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => info!("Received SIGINT"),
        _ = terminate => info!("Received SIGTERM"),
    }

    info!("web_server_shutting_down");
}
