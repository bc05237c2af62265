use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use bhv360_events::{
    EmailConfig, EmailSender, NotificationDispatcher, PushConfig, PushSender,
    StaticChannelResolver,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use bhv360_api::config::ServerConfig;
use bhv360_api::router::build_app_router;
use bhv360_api::state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    // --- Tracing ---
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                "bhv360_api=debug,bhv360_events=debug,tower_http=debug".into()
            }),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // --- Configuration ---
    let config = ServerConfig::from_env()?;
    tracing::info!(host = %config.host, port = %config.port, "Loaded server configuration");

    // --- Notification dispatcher ---
    let dispatcher = build_dispatcher(&config)?;

    // --- App state ---
    let state = AppState {
        config: Arc::new(config.clone()),
        dispatcher: Arc::new(dispatcher),
    };

    let app = build_app_router(state, &config);

    // --- Start server ---
    let addr = SocketAddr::new(config.host.parse()?, config.port);
    tracing::info!(%addr, "Starting server");

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind to {addr}"))?;

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    tracing::info!("Graceful shutdown complete");
    Ok(())
}

/// Register a sender for every channel that has configuration.
fn build_dispatcher(config: &ServerConfig) -> anyhow::Result<NotificationDispatcher> {
    let resolver = StaticChannelResolver::new(&config.default_channels);
    let mut dispatcher = NotificationDispatcher::new(Arc::new(resolver))
        .with_channel_timeout(Duration::from_secs(config.channel_timeout_secs))
        .with_bulk_concurrency(config.bulk_concurrency);

    match PushConfig::from_env()? {
        Some(push) => {
            tracing::info!(gateway = %push.gateway_url, "Push delivery enabled");
            dispatcher = dispatcher.with_sender(Arc::new(PushSender::new(push)?));
        }
        None => tracing::warn!("PUSH_GATEWAY_URL not set, push delivery disabled"),
    }

    match EmailConfig::from_env()? {
        Some(email) => {
            tracing::info!(smtp_host = %email.smtp_host, "Email delivery enabled");
            dispatcher = dispatcher.with_sender(Arc::new(EmailSender::new(email)?));
        }
        None => tracing::warn!("SMTP_HOST not set, email delivery disabled"),
    }

    // Every sender's retry schedule must fit inside the channel deadline.
    dispatcher.check_budget()?;

    for channel in &config.default_channels {
        if !dispatcher.has_sender(*channel) {
            tracing::warn!(%channel, "Default channel has no configured sender");
        }
    }

    Ok(dispatcher)
}

/// Wait for a termination signal to initiate graceful shutdown.
///
/// Handles both SIGINT (Ctrl-C) and SIGTERM (on Unix).
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "Failed to install Ctrl-C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {
            tracing::info!("Received SIGINT (Ctrl-C), starting graceful shutdown");
        }
        () = terminate => {
            tracing::info!("Received SIGTERM, starting graceful shutdown");
        }
    }
}
