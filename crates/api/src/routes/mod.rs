pub mod health;
pub mod notification;

use axum::routing::get;
use axum::Router;

use crate::handlers;
use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// ```text
/// /dashboard                 resolve dashboard for ?role= (GET)
///
/// /notifications/send        dispatch one notification (POST)
/// /notifications/bulk        dispatch a batch of notifications (POST)
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .route("/dashboard", get(handlers::dashboard::resolve_dashboard))
        .nest("/notifications", notification::router())
}
