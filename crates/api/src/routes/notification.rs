//! Route definitions for the `/notifications` resource.

use axum::routing::post;
use axum::Router;

use crate::handlers::notification;
use crate::state::AppState;

/// Routes mounted at `/notifications`.
///
/// ```text
/// POST   /send                      -> send_notification
/// POST   /bulk                      -> send_bulk_notifications
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/send", post(notification::send_notification))
        .route("/bulk", post(notification::send_bulk_notifications))
}
