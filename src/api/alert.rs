//! Security log handler

use crate::domain::Alert;
use crate::error::Result;
use crate::middleware::AuthUser;
use crate::state::HasServices;
use axum::{extract::State, Json};

/// Alerts raised by agents whose name matches one of the caller's domains,
/// most recent first
#[utoipa::path(
    get,
    path = "/api/security-logs",
    tag = "Alert",
    responses(
        (status = 200, description = "Visible alerts", body = Vec<Alert>),
        (status = 401, description = "Missing or invalid token")
    ),
    security(("bearer" = []))
)]
pub async fn list<S: HasServices>(
    auth: AuthUser,
    State(state): State<S>,
) -> Result<Json<Vec<Alert>>> {
    let alerts = state.alert_service().fetch_for_user(auth.user_id).await?;
    Ok(Json(alerts))
}
