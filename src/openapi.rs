//! OpenAPI 3.0 document, served at `/api-docs/openapi.json`

use utoipa::openapi::security::{Http, HttpAuthScheme, SecurityScheme};
use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Syra Core API",
        description = "Domain registry and security alert feed for Syra"
    ),
    tags(
        (name = "System", description = "Health checks"),
        (name = "Auth", description = "Google OAuth login"),
        (name = "Domain", description = "Monitored domains owned by the caller"),
        (name = "Alert", description = "Security alerts for the caller's domains"),
        (name = "User", description = "Current user"),
    ),
    components(
        schemas(
            crate::api::MessageResponse,
            crate::api::web_domain::AddDomainResponse,
            crate::api::health::HealthResponse,
            crate::domain::User,
            crate::domain::DomainSummary,
            crate::domain::CreateDomainInput,
            crate::domain::Alert,
        ),
    ),
    paths(
        crate::api::health::health,
        crate::api::health::ready,
        crate::api::auth::login,
        crate::api::auth::callback,
        crate::api::web_domain::list,
        crate::api::web_domain::create,
        crate::api::web_domain::delete,
        crate::api::alert::list,
        crate::api::user::me,
    ),
)]
pub struct ApiDoc;

impl ApiDoc {
    /// Document with the bearer security scheme attached
    pub fn build() -> utoipa::openapi::OpenApi {
        let mut doc = Self::openapi();
        if let Some(c) = doc.components.as_mut() {
            c.security_schemes.insert(
                "bearer".to_string(),
                SecurityScheme::Http(Http::new(HttpAuthScheme::Bearer)),
            );
        }
        doc
    }
}
