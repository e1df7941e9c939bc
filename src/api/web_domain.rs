//! Domain registry handlers

use crate::api::MessageResponse;
use crate::domain::{CreateDomainInput, DomainSummary};
use crate::error::{AppError, Result};
use crate::middleware::AuthUser;
use crate::state::HasServices;
use axum::{
    body::Bytes,
    extract::{rejection::QueryRejection, Query, State},
    Json,
};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct AddDomainResponse {
    pub id: i32,
    pub name: String,
    pub url: String,
    pub message: String,
}

#[derive(Debug, Deserialize)]
pub struct DeleteDomainQuery {
    #[serde(rename = "domainId")]
    pub domain_id: Option<String>,
}

/// List the caller's domains
#[utoipa::path(
    get,
    path = "/api/domain",
    tag = "Domain",
    responses(
        (status = 200, description = "Domains owned by the caller", body = Vec<DomainSummary>),
        (status = 401, description = "Missing or invalid token")
    ),
    security(("bearer" = []))
)]
pub async fn list<S: HasServices>(
    auth: AuthUser,
    State(state): State<S>,
) -> Result<Json<Vec<DomainSummary>>> {
    let domains = state.domain_service().list(auth.user_id).await?;
    Ok(Json(domains))
}

/// Register a domain for the caller
#[utoipa::path(
    post,
    path = "/api/domain",
    tag = "Domain",
    request_body = CreateDomainInput,
    responses(
        (status = 200, description = "Domain added", body = AddDomainResponse),
        (status = 400, description = "Invalid body or empty name/url"),
        (status = 401, description = "Missing or invalid token")
    ),
    security(("bearer" = []))
)]
pub async fn create<S: HasServices>(
    auth: AuthUser,
    State(state): State<S>,
    body: Bytes,
) -> Result<Json<AddDomainResponse>> {
    // Browsers often send the JSON as text/plain, so the content type is ignored
    let input: CreateDomainInput = serde_json::from_slice(&body).map_err(|e| {
        tracing::debug!(error = %e, "Rejected domain body");
        AppError::BadRequest("Invalid request body".to_string())
    })?;

    let domain = state.domain_service().add(auth.user_id, input).await?;

    Ok(Json(AddDomainResponse {
        id: domain.id,
        name: domain.name,
        url: domain.url,
        message: "Domain added successfully".to_string(),
    }))
}

/// Delete one of the caller's domains
#[utoipa::path(
    delete,
    path = "/api/domain",
    tag = "Domain",
    params(("domainId" = i32, Query, description = "Domain id")),
    responses(
        (status = 200, description = "Domain deleted", body = MessageResponse),
        (status = 400, description = "Missing or non-numeric domainId"),
        (status = 401, description = "Missing or invalid token"),
        (status = 404, description = "No such domain owned by the caller")
    ),
    security(("bearer" = []))
)]
pub async fn delete<S: HasServices>(
    auth: AuthUser,
    State(state): State<S>,
    query: std::result::Result<Query<DeleteDomainQuery>, QueryRejection>,
) -> Result<Json<MessageResponse>> {
    let Query(params) = query.map_err(|e| {
        tracing::debug!(error = %e, "Rejected domain query");
        AppError::BadRequest("Invalid domainId".to_string())
    })?;

    let raw = params
        .domain_id
        .filter(|s| !s.is_empty())
        .ok_or_else(|| AppError::BadRequest("domainId is required".to_string()))?;

    let domain_id: i32 = raw
        .parse()
        .map_err(|_| AppError::BadRequest("Invalid domainId".to_string()))?;

    state.domain_service().delete(domain_id, auth.user_id).await?;

    Ok(Json(MessageResponse::new("Domain deleted successfully")))
}
