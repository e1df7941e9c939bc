//! Security alert model
//!
//! Alerts are written by an external log pipeline; this service only reads
//! them. Columns may be NULL, so rows are decoded into [`AlertRow`] and then
//! flattened into [`Alert`] with empty/zero defaults.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;

/// Security alert as returned to clients
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct Alert {
    pub id: String,
    pub severity: String,
    pub pretext: String,
    pub title: String,
    pub text: String,
    pub rule_id: i64,
    pub timestamp: DateTime<Utc>,
    pub agent_id: i64,
    pub agent_name: String,
    pub agent_ip: String,
    pub manager_name: String,
    pub full_log: String,
    pub decoder_name: String,
    pub protocol: String,
    pub srcip: String,
    pub url: String,
    pub status_code: i64,
    pub location: String,
    pub raw_data: String,
}

/// Nullable alert row as read from the store
#[derive(Debug, Clone, Default, FromRow)]
pub struct AlertRow {
    pub id: Option<String>,
    pub severity: Option<String>,
    pub pretext: Option<String>,
    pub title: Option<String>,
    pub text: Option<String>,
    pub rule_id: Option<i64>,
    pub timestamp: Option<DateTime<Utc>>,
    pub agent_id: Option<i64>,
    pub agent_name: Option<String>,
    pub agent_ip: Option<String>,
    pub manager_name: Option<String>,
    pub full_log: Option<String>,
    pub decoder_name: Option<String>,
    pub protocol: Option<String>,
    pub srcip: Option<String>,
    pub url: Option<String>,
    pub status_code: Option<i64>,
    pub location: Option<String>,
    pub raw_data: Option<String>,
}

impl From<AlertRow> for Alert {
    fn from(row: AlertRow) -> Self {
        Self {
            id: row.id.unwrap_or_default(),
            severity: row.severity.unwrap_or_default(),
            pretext: row.pretext.unwrap_or_default(),
            title: row.title.unwrap_or_default(),
            text: row.text.unwrap_or_default(),
            rule_id: row.rule_id.unwrap_or_default(),
            timestamp: row.timestamp.unwrap_or_default(),
            agent_id: row.agent_id.unwrap_or_default(),
            agent_name: row.agent_name.unwrap_or_default(),
            agent_ip: row.agent_ip.unwrap_or_default(),
            manager_name: row.manager_name.unwrap_or_default(),
            full_log: row.full_log.unwrap_or_default(),
            decoder_name: row.decoder_name.unwrap_or_default(),
            protocol: row.protocol.unwrap_or_default(),
            srcip: row.srcip.unwrap_or_default(),
            url: row.url.unwrap_or_default(),
            status_code: row.status_code.unwrap_or_default(),
            location: row.location.unwrap_or_default(),
            raw_data: row.raw_data.unwrap_or_default(),
        }
    }
}
