//! HTTP middleware for Syra Core
//!
//! - Bearer presence check and the `AuthUser` / `IdentifiedCaller` extractors
//! - CORS preflight short-circuit
//! - Request tracing and metrics

pub mod auth;
pub mod metrics;
pub mod preflight;
pub mod trace;

pub use auth::{require_bearer_middleware, AuthError, AuthUser, IdentifiedCaller};
pub use preflight::preflight_middleware;
