use std::sync::Arc;

use bhv360_events::NotificationDispatcher;

use crate::config::ServerConfig;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// This is cheaply cloneable (inner data is behind `Arc`).
#[derive(Clone)]
pub struct AppState {
    /// Server configuration.
    pub config: Arc<ServerConfig>,
    /// Notification fan-out, built once at startup with its channel senders.
    pub dispatcher: Arc<NotificationDispatcher>,
}
