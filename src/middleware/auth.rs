//! Bearer authentication
//!
//! Provides:
//! - `require_bearer_middleware`, the front-door presence check for `/api/*`
//! - `AuthUser`, which resolves the caller's access token to a local user id
//! - `IdentifiedCaller`, which stops after the identity provider lookup

use axum::{
    body::Body,
    extract::FromRequestParts,
    http::{header::AUTHORIZATION, request::Parts, HeaderMap, Request, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;

use crate::domain::IdentityProfile;
use crate::error::AppError;
use crate::state::HasServices;

/// Authentication errors
#[derive(Debug)]
pub enum AuthError {
    /// No usable Authorization header
    MissingToken,
    /// The identity provider could not resolve the token
    InvalidToken,
    /// Token resolved but no local user exists for the email
    UserNotFound,
    /// User lookup failed for reasons other than absence
    Store(AppError),
}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        let message = match self {
            AuthError::MissingToken => "Unauthorized",
            AuthError::InvalidToken => "Invalid or expired token",
            AuthError::UserNotFound => "User not found",
            AuthError::Store(e) => return e.into_response(),
        };

        unauthorized_response(message)
    }
}

fn unauthorized_response(message: &str) -> Response {
    (
        StatusCode::UNAUTHORIZED,
        Json(json!({
            "error": message,
            "code": "UNAUTHORIZED"
        })),
    )
        .into_response()
}

/// Extract the token from an `Authorization: Bearer <token>` header.
/// The scheme is case-sensitive and the token must be non-empty.
pub fn extract_bearer_token(headers: &HeaderMap) -> Result<&str, AuthError> {
    let auth_header = headers
        .get(AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .ok_or(AuthError::MissingToken)?;

    match auth_header.strip_prefix("Bearer ") {
        Some(token) if !token.is_empty() => Ok(token),
        _ => Err(AuthError::MissingToken),
    }
}

/// Reject requests without a bearer credential before any handler or
/// outbound call runs. Validity is checked later by the extractors.
pub async fn require_bearer_middleware(request: Request<Body>, next: Next) -> Response {
    if let Err(e) = extract_bearer_token(request.headers()) {
        tracing::debug!(path = %request.uri().path(), "Rejected request without bearer token");
        return e.into_response();
    }

    next.run(request).await
}

async fn resolve_profile<S: HasServices>(
    parts: &Parts,
    state: &S,
) -> Result<IdentityProfile, AuthError> {
    let token = extract_bearer_token(&parts.headers)?;

    state
        .identity_client()
        .fetch_profile(token)
        .await
        .map_err(|e| {
            tracing::warn!(error = %e, "Failed to resolve access token");
            AuthError::InvalidToken
        })
}

/// Caller whose token resolved to a profile with a matching local user.
/// `user_id` scopes every domain and alert operation of the request.
#[derive(Debug, Clone)]
pub struct AuthUser {
    pub user_id: i32,
    pub email: String,
    pub name: String,
}

impl<S> FromRequestParts<S> for AuthUser
where
    S: HasServices + Send + Sync,
{
    type Rejection = AuthError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let profile = resolve_profile(parts, state).await?;

        let user = match state.user_service().get_by_email(&profile.email).await {
            Ok(user) => user,
            Err(AppError::NotFound(_)) => {
                tracing::warn!(email = %profile.email, "No local user for resolved profile");
                return Err(AuthError::UserNotFound);
            }
            Err(e) => return Err(AuthError::Store(e)),
        };

        Ok(AuthUser {
            user_id: user.id,
            email: user.email,
            name: user.name,
        })
    }
}

/// Caller whose token resolved to a profile. No local lookup is made.
#[derive(Debug, Clone)]
pub struct IdentifiedCaller {
    pub profile: IdentityProfile,
}

impl<S> FromRequestParts<S> for IdentifiedCaller
where
    S: HasServices + Send + Sync,
{
    type Rejection = AuthError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let profile = resolve_profile(parts, state).await?;
        Ok(IdentifiedCaller { profile })
    }
}
