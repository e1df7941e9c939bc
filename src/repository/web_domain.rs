//! Domain repository
//!
//! Every statement is scoped by `user_id` so one user can never read or
//! remove another user's rows.

use crate::domain::{CreateDomainInput, Domain};
use crate::error::{AppError, Result};
use async_trait::async_trait;
use chrono::Utc;
use sqlx::PgPool;

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait DomainRepository: Send + Sync {
    async fn create(&self, owner_id: i32, input: &CreateDomainInput) -> Result<Domain>;
    async fn list_by_owner(&self, owner_id: i32) -> Result<Vec<Domain>>;
    /// Fails with `NotFound` when no row has both this id and this owner
    async fn delete_owned(&self, id: i32, owner_id: i32) -> Result<()>;
}

pub struct DomainRepositoryImpl {
    pool: PgPool,
}

impl DomainRepositoryImpl {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl DomainRepository for DomainRepositoryImpl {
    async fn create(&self, owner_id: i32, input: &CreateDomainInput) -> Result<Domain> {
        let domain = sqlx::query_as::<_, Domain>(
            r#"
            INSERT INTO domain (name, url, created_at, user_id)
            VALUES ($1, $2, $3, $4)
            RETURNING id, name, url, user_id, created_at
            "#,
        )
        .bind(&input.name)
        .bind(&input.url)
        .bind(Utc::now())
        .bind(owner_id)
        .fetch_one(&self.pool)
        .await?;

        Ok(domain)
    }

    async fn list_by_owner(&self, owner_id: i32) -> Result<Vec<Domain>> {
        let domains = sqlx::query_as::<_, Domain>(
            r#"
            SELECT id, name, url, user_id, created_at
            FROM domain
            WHERE user_id = $1
            ORDER BY created_at, id
            "#,
        )
        .bind(owner_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(domains)
    }

    async fn delete_owned(&self, id: i32, owner_id: i32) -> Result<()> {
        let result = sqlx::query(
            r#"
            DELETE FROM domain
            WHERE id = $1 AND user_id = $2
            "#,
        )
        .bind(id)
        .bind(owner_id)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound("Domain not found".to_string()));
        }

        Ok(())
    }
}
