//! Handlers for the `/notifications` resource.
//!
//! Requests are parsed into [`NotificationDraft`]s and validated before any
//! delivery is attempted. Delivery failures are reported in the response body
//! with a 200 status; only malformed requests produce an error status.

use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::Json;
use bhv360_core::error::CoreError;
use bhv360_core::notification::{ChannelResult, Notification, NotificationDraft};
use serde::{Deserialize, Serialize};

use crate::error::{AppError, AppResult};
use crate::state::AppState;

/// Maximum number of notifications accepted in one bulk request.
pub const MAX_BULK_NOTIFICATIONS: usize = 500;

// ---------------------------------------------------------------------------
// Request / response types
// ---------------------------------------------------------------------------

/// Body of `POST /notifications/bulk`.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct BulkNotificationRequest {
    pub notifications: Vec<NotificationDraft>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SendNotificationResponse {
    pub success: bool,
    pub notification_id: String,
    pub results: Vec<ChannelResult>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BulkNotificationResponse {
    /// True when every notification was delivered on all of its channels.
    pub success: bool,
    pub count: usize,
    pub notification_ids: Vec<String>,
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// POST /api/v1/notifications/send
pub async fn send_notification(
    State(state): State<AppState>,
    payload: Result<Json<NotificationDraft>, JsonRejection>,
) -> AppResult<Json<SendNotificationResponse>> {
    let Json(draft) = payload?;
    let notification = Notification::new(draft)?;

    let outcome = state.dispatcher.send_notification(&notification).await;

    tracing::info!(
        notification_id = notification.id(),
        user_id = %notification.user_id,
        success = outcome.success,
        "Notification sent"
    );

    Ok(Json(SendNotificationResponse {
        success: outcome.success,
        notification_id: notification.id().to_string(),
        results: outcome.results,
    }))
}

/// POST /api/v1/notifications/bulk
///
/// The whole batch is validated first; one invalid entry rejects the request
/// without dispatching anything.
pub async fn send_bulk_notifications(
    State(state): State<AppState>,
    payload: Result<Json<BulkNotificationRequest>, JsonRejection>,
) -> AppResult<Json<BulkNotificationResponse>> {
    let Json(request) = payload?;

    if request.notifications.is_empty() {
        return Err(AppError::BadRequest(
            "notifications must be a non-empty array".into(),
        ));
    }
    if request.notifications.len() > MAX_BULK_NOTIFICATIONS {
        return Err(AppError::BadRequest(format!(
            "At most {MAX_BULK_NOTIFICATIONS} notifications per bulk request"
        )));
    }

    let notifications = request
        .notifications
        .into_iter()
        .enumerate()
        .map(|(index, draft)| {
            Notification::new(draft).map_err(|CoreError::Validation(msg)| {
                CoreError::Validation(format!("notifications[{index}]: {msg}"))
            })
        })
        .collect::<Result<Vec<_>, _>>()?;

    let outcomes = state
        .dispatcher
        .send_bulk_notifications(&notifications)
        .await;

    let delivered = outcomes.iter().filter(|o| o.success).count();
    tracing::info!(
        count = notifications.len(),
        delivered,
        "Bulk notifications sent"
    );

    Ok(Json(BulkNotificationResponse {
        success: delivered == notifications.len(),
        count: notifications.len(),
        notification_ids: notifications.iter().map(|n| n.id().to_string()).collect(),
    }))
}
