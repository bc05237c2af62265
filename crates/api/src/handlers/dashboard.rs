//! Handler for dashboard resolution.
//!
//! The role comes from the session layer, which passes it as a query
//! parameter when redirecting a freshly signed-in user.

use axum::extract::Query;
use axum::Json;
use bhv360_core::dashboard::resolve_dashboard as resolve;
use bhv360_core::roles::Role;
use serde::{Deserialize, Serialize};

use crate::response::DataResponse;

/// Query parameters for `GET /dashboard`.
#[derive(Debug, Deserialize)]
pub struct DashboardQuery {
    pub role: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct DashboardResponse {
    /// The recognised role, or `null` when the input fell outside the catalogue.
    pub role: Option<Role>,
    pub route: &'static str,
    pub title: &'static str,
    pub recognized: bool,
}

/// GET /api/v1/dashboard?role=BHV_COORDINATOR
///
/// Never fails: an absent or unknown role resolves to the employee dashboard.
pub async fn resolve_dashboard(
    Query(params): Query<DashboardQuery>,
) -> Json<DataResponse<DashboardResponse>> {
    let raw = params.role.unwrap_or_default();
    let role = Role::from_name(raw.trim());

    if role.is_none() {
        tracing::warn!(role = %raw, "Unrecognized role, using fallback dashboard");
    }

    let dashboard = resolve(role);
    Json(DataResponse {
        data: DashboardResponse {
            role,
            route: dashboard.route,
            title: dashboard.title,
            recognized: role.is_some(),
        },
    })
}
