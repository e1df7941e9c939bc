//! OAuth login and callback handlers

use crate::error::{AppError, Result};
use crate::state::HasServices;
use axum::{
    extract::{rejection::QueryRejection, Query, State},
    http::{header, HeaderValue},
    response::{IntoResponse, Redirect, Response},
};
use serde::Deserialize;
use url::Url;

/// State value sent to the provider. The callback does not verify it.
pub const LOGIN_STATE: &str = "state-token";

/// Redirect the browser to the provider's consent page
#[utoipa::path(
    get,
    path = "/api/auth/login",
    tag = "Auth",
    responses(
        (status = 307, description = "Redirect to the identity provider")
    )
)]
pub async fn login<S: HasServices>(State(state): State<S>) -> Result<Response> {
    let auth_url = state.identity_client().authorization_url(LOGIN_STATE)?;
    Ok(Redirect::temporary(&auth_url).into_response())
}

#[derive(Debug, Deserialize)]
pub struct CallbackQuery {
    pub code: Option<String>,
}

/// Complete the login: exchange the code, record the user, and hand the
/// access token to the front end.
#[utoipa::path(
    get,
    path = "/api/auth/callback",
    tag = "Auth",
    params(("code" = String, Query, description = "Authorization code")),
    responses(
        (status = 303, description = "Redirect to the front end with the access token"),
        (status = 400, description = "Code not found"),
        (status = 500, description = "Token exchange, profile lookup or store failure")
    )
)]
pub async fn callback<S: HasServices>(
    State(state): State<S>,
    query: std::result::Result<Query<CallbackQuery>, QueryRejection>,
) -> Result<Response> {
    let code = query
        .ok()
        .and_then(|Query(params)| params.code)
        .filter(|c| !c.is_empty())
        .ok_or_else(|| AppError::BadRequest("Code not found".to_string()))?;

    let identity = state.identity_client();

    let token = identity
        .exchange_code(&code)
        .await
        .map_err(|e| AppError::IdentityProvider(format!("Failed to exchange token: {}", e)))?;

    let profile = identity
        .fetch_profile(&token.access_token)
        .await
        .map_err(|e| AppError::IdentityProvider(format!("Failed to get user info: {}", e)))?;

    state
        .user_service()
        .upsert(&profile.name, &profile.email)
        .await?;

    let mut redirect_url = Url::parse(&state.config().frontend.redirect_url).map_err(|e| {
        AppError::Internal(anyhow::anyhow!("Invalid front-end redirect URL: {}", e))
    })?;
    redirect_url
        .query_pairs_mut()
        .append_pair("token", &token.access_token);

    tracing::info!(email = %profile.email, "Login completed");

    let mut response = Redirect::to(redirect_url.as_str()).into_response();
    response
        .headers_mut()
        .insert(header::CACHE_CONTROL, HeaderValue::from_static("no-store"));
    Ok(response)
}
