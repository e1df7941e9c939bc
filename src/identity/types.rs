//! Identity provider wire types and errors

use serde::Deserialize;
use thiserror::Error;

/// Response of the provider's token endpoint
#[derive(Debug, Clone, Deserialize)]
pub struct TokenResponse {
    pub access_token: String,
    #[serde(default)]
    pub token_type: Option<String>,
    #[serde(default)]
    pub expires_in: Option<i64>,
    #[serde(default)]
    pub refresh_token: Option<String>,
    #[serde(default)]
    pub id_token: Option<String>,
}

/// Identity provider failures
#[derive(Debug, Error)]
pub enum IdentityError {
    /// Transport failure or timeout
    #[error("identity provider unavailable: {0}")]
    Unavailable(String),

    /// Provider answered with a non-success status
    #[error("identity provider returned {status}: {body}")]
    Rejected { status: u16, body: String },

    /// Body could not be decoded
    #[error("malformed identity provider response: {0}")]
    MalformedProfile(String),
}

impl IdentityError {
    pub(crate) fn outcome(&self) -> &'static str {
        match self {
            IdentityError::Unavailable(_) => "unavailable",
            IdentityError::Rejected { .. } => "rejected",
            IdentityError::MalformedProfile(_) => "malformed",
        }
    }
}

impl From<reqwest::Error> for IdentityError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_decode() {
            IdentityError::MalformedProfile(e.to_string())
        } else {
            IdentityError::Unavailable(e.to_string())
        }
    }
}
