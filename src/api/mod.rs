//! REST API handlers and shared response types

pub mod alert;
pub mod auth;
pub mod health;
pub mod metrics;
pub mod user;
pub mod web_domain;

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Success response carrying only a message
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}
