//! Syra Core - domain registry and security alert API
//!
//! Users sign in with Google, register the web domains they operate, and
//! read the security alerts raised by agents reporting under those names.

pub mod api;
pub mod config;
pub mod domain;
pub mod error;
pub mod identity;
pub mod middleware;
pub mod migration;
pub mod openapi;
pub mod repository;
pub mod server;
pub mod service;
pub mod state;
pub mod telemetry;

// Re-export commonly used types
pub use config::Config;
pub use error::{AppError, Result};
