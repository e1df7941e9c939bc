//! Current-user handler

use crate::domain::User;
use crate::error::Result;
use crate::middleware::IdentifiedCaller;
use crate::state::HasServices;
use axum::{extract::State, Json};

/// The local record for the caller's identity. A resolved identity
/// without a local row is 404 here rather than 401.
#[utoipa::path(
    get,
    path = "/api/user",
    tag = "User",
    responses(
        (status = 200, description = "Current user", body = User),
        (status = 401, description = "Missing or invalid token"),
        (status = 404, description = "User not found")
    ),
    security(("bearer" = []))
)]
pub async fn me<S: HasServices>(
    caller: IdentifiedCaller,
    State(state): State<S>,
) -> Result<Json<User>> {
    let user = state
        .user_service()
        .get_by_email(&caller.profile.email)
        .await?;
    Ok(Json(user))
}
