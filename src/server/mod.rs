//! Server initialization and routing

use crate::api;
use crate::config::Config;
use crate::identity::IdentityClient;
use crate::middleware::{
    metrics::ObservabilityLayer, preflight_middleware, require_bearer_middleware,
    trace::SanitizedMakeSpan,
};
use crate::migration;
use crate::openapi::ApiDoc;
use crate::repository::{
    alert::AlertRepositoryImpl, user::UserRepositoryImpl, web_domain::DomainRepositoryImpl,
};
use crate::service::{AlertService, DomainService, UserService};
use crate::state::HasServices;
use anyhow::Result;
use axum::{
    http::{header, HeaderValue, Method, StatusCode},
    middleware,
    routing::get,
    Json, Router,
};
use metrics_exporter_prometheus::PrometheusHandle;
use sqlx::PgPool;
use std::sync::Arc;
use tokio::net::TcpListener;
use tower_http::{
    cors::{Any, CorsLayer},
    set_header::SetResponseHeaderLayer,
    timeout::TimeoutLayer,
    trace::TraceLayer,
};
use tracing::info;

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub db_pool: PgPool,
    pub identity_client: IdentityClient,
    pub user_service: Arc<UserService<UserRepositoryImpl>>,
    pub domain_service: Arc<DomainService<DomainRepositoryImpl>>,
    pub alert_service: Arc<AlertService<AlertRepositoryImpl>>,
}

impl AppState {
    pub fn new(config: Config, db_pool: PgPool) -> crate::error::Result<Self> {
        let identity_client = IdentityClient::new(config.identity.clone())?;

        let user_repo = Arc::new(UserRepositoryImpl::new(db_pool.clone()));
        let domain_repo = Arc::new(DomainRepositoryImpl::new(db_pool.clone()));
        let alert_repo = Arc::new(AlertRepositoryImpl::new(db_pool.clone()));

        Ok(Self {
            config: Arc::new(config),
            db_pool,
            identity_client,
            user_service: Arc::new(UserService::new(user_repo)),
            domain_service: Arc::new(DomainService::new(domain_repo)),
            alert_service: Arc::new(AlertService::new(alert_repo)),
        })
    }
}

impl HasServices for AppState {
    type UserRepo = UserRepositoryImpl;
    type DomainRepo = DomainRepositoryImpl;
    type AlertRepo = AlertRepositoryImpl;

    fn config(&self) -> &Config {
        &self.config
    }

    fn identity_client(&self) -> &IdentityClient {
        &self.identity_client
    }

    fn user_service(&self) -> &UserService<Self::UserRepo> {
        &self.user_service
    }

    fn domain_service(&self) -> &DomainService<Self::DomainRepo> {
        &self.domain_service
    }

    fn alert_service(&self) -> &AlertService<Self::AlertRepo> {
        &self.alert_service
    }

    async fn check_ready(&self) -> bool {
        sqlx::query("SELECT 1").execute(&self.db_pool).await.is_ok()
    }
}

/// Run the HTTP server until Ctrl-C
pub async fn run(
    config: Config,
    migrate: bool,
    prometheus_handle: Option<PrometheusHandle>,
) -> Result<()> {
    let db_pool = migration::connect(&config.database).await?;

    if migrate {
        migration::run_migrations(&db_pool).await?;
    }

    let http_addr = config.http_addr();
    let state = AppState::new(config, db_pool)?;

    let mut app = build_router(state);
    if let Some(handle) = prometheus_handle {
        app = app.merge(
            Router::new()
                .route("/metrics", get(api::metrics::metrics_handler))
                .with_state(Arc::new(Some(handle))),
        );
        info!("Prometheus metrics exposed on /metrics");
    }

    let listener = TcpListener::bind(&http_addr).await?;
    info!("HTTP server started on {}", http_addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("HTTP server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    info!("Received shutdown signal");
}

async fn openapi_json() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::build())
}

/// Build the HTTP router with generic state type
///
/// Production `AppState` and test states share this function, so tests
/// exercise the same routes and middleware stack.
pub fn build_router<S: HasServices>(state: S) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST, Method::DELETE, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION]);

    // CorsLayer only adds these to preflights; the front end expects them on
    // every response.
    let allow_methods = SetResponseHeaderLayer::if_not_present(
        header::ACCESS_CONTROL_ALLOW_METHODS,
        HeaderValue::from_static("GET, POST, DELETE, OPTIONS"),
    );
    let allow_headers = SetResponseHeaderLayer::if_not_present(
        header::ACCESS_CONTROL_ALLOW_HEADERS,
        HeaderValue::from_static("Content-Type, Authorization"),
    );

    // The bearer check runs before any extractor, so a request without a
    // credential never reaches the identity provider or the store.
    let protected = Router::new()
        .route(
            "/api/domain",
            get(api::web_domain::list::<S>)
                .post(api::web_domain::create::<S>)
                .delete(api::web_domain::delete::<S>),
        )
        .route("/api/security-logs", get(api::alert::list::<S>))
        .route("/api/user", get(api::user::me::<S>))
        .route_layer(middleware::from_fn(require_bearer_middleware));

    let request_timeout = state.config().request_timeout();

    Router::new()
        .route("/health", get(api::health::health))
        .route("/ready", get(api::health::ready::<S>))
        .route("/api-docs/openapi.json", get(openapi_json))
        .route("/api/auth/login", get(api::auth::login::<S>))
        .route("/api/auth/callback", get(api::auth::callback::<S>))
        .merge(protected)
        .layer(middleware::from_fn(preflight_middleware))
        .layer(TimeoutLayer::with_status_code(
            StatusCode::REQUEST_TIMEOUT,
            request_timeout,
        ))
        .layer(TraceLayer::new_for_http().make_span_with(SanitizedMakeSpan))
        .layer(ObservabilityLayer)
        .layer(cors)
        .layer(allow_methods)
        .layer(allow_headers)
        .with_state(state)
}
