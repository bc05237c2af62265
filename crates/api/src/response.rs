//! Shared response envelope types for API handlers.
//!
//! Read-style endpoints wrap their payload in `{ "data": ... }`. The
//! notification endpoints return their result objects unwrapped because web
//! clients read `success` at the top level.

use serde::Serialize;

/// Standard `{ "data": T }` response envelope.
///
/// ```ignore
/// Ok(Json(DataResponse { data: dashboard }))
/// ```
#[derive(Debug, Serialize)]
pub struct DataResponse<T: Serialize> {
    pub data: T,
}
