//! Monitored web domain model
//!
//! A domain is a name + URL pair owned by exactly one user. Its `name` is
//! what alert agents report as `agent_name`.

use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use validator::Validate;

/// Domain entity as stored
#[derive(Debug, Clone, PartialEq, Eq, FromRow)]
pub struct Domain {
    pub id: i32,
    pub name: String,
    pub url: String,
    #[sqlx(rename = "user_id")]
    pub owner_id: i32,
    pub created_at: DateTime<Utc>,
}

impl Default for Domain {
    fn default() -> Self {
        Self {
            id: 0,
            name: String::new(),
            url: String::new(),
            owner_id: 0,
            created_at: Utc::now(),
        }
    }
}

/// Domain as listed to its owner
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct DomainSummary {
    pub id: i32,
    pub name: String,
    pub url: String,
    /// RFC 3339 creation time
    #[serde(rename = "createdAt")]
    pub created_at: String,
}

impl From<Domain> for DomainSummary {
    fn from(domain: Domain) -> Self {
        Self {
            id: domain.id,
            name: domain.name,
            url: domain.url,
            created_at: domain.created_at.to_rfc3339_opts(SecondsFormat::Secs, true),
        }
    }
}

/// Input for registering a domain. Missing fields decode as empty strings
/// so they fail validation instead of body parsing.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate, ToSchema)]
pub struct CreateDomainInput {
    #[serde(default)]
    #[validate(length(min = 1))]
    pub name: String,
    #[serde(default)]
    #[validate(length(min = 1))]
    pub url: String,
}
