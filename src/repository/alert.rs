//! Security alert repository (read-only)

use crate::domain::{Alert, AlertRow};
use crate::error::Result;
use async_trait::async_trait;
use sqlx::PgPool;

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AlertRepository: Send + Sync {
    /// Alerts whose `agent_name` matches a domain owned by `owner_id`,
    /// newest first
    async fn list_for_owner(&self, owner_id: i32) -> Result<Vec<Alert>>;
}

pub struct AlertRepositoryImpl {
    pool: PgPool,
}

impl AlertRepositoryImpl {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl AlertRepository for AlertRepositoryImpl {
    async fn list_for_owner(&self, owner_id: i32) -> Result<Vec<Alert>> {
        // Semi-join: an alert shows once even if the owner registered the
        // same domain name twice.
        let rows = sqlx::query_as::<_, AlertRow>(
            r#"
            SELECT a.id::text AS id, a.severity::text AS severity, a.pretext, a.title,
                   a."text", a.rule_id::bigint AS rule_id, a."timestamp"::timestamptz AS "timestamp",
                   a.agent_id::bigint AS agent_id, a.agent_name, a.agent_ip::text AS agent_ip,
                   a.manager_name, a.full_log, a.decoder_name, a.protocol,
                   a.srcip::text AS srcip, a.url, a.status_code::bigint AS status_code,
                   a."location", a.raw_data::text AS raw_data
            FROM public.alerts a
            WHERE EXISTS (
                SELECT 1 FROM domain d
                WHERE d.name = a.agent_name AND d.user_id = $1
            )
            ORDER BY a."timestamp" DESC NULLS LAST
            "#,
        )
        .bind(owner_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(Alert::from).collect())
    }
}
