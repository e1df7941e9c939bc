//! User repository

use crate::domain::User;
use crate::error::Result;
use async_trait::async_trait;
use sqlx::PgPool;

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Insert a user keyed by email, or refresh the name of the existing row
    async fn upsert(&self, name: &str, email: &str) -> Result<()>;
    async fn find_by_email(&self, email: &str) -> Result<Option<User>>;
}

pub struct UserRepositoryImpl {
    pool: PgPool,
}

impl UserRepositoryImpl {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UserRepository for UserRepositoryImpl {
    async fn upsert(&self, name: &str, email: &str) -> Result<()> {
        sqlx::query(
            r#"
            INSERT INTO "user" (name, email)
            VALUES ($1, $2)
            ON CONFLICT (email) DO UPDATE
            SET name = EXCLUDED.name
            "#,
        )
        .bind(name)
        .bind(email)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>> {
        let user = sqlx::query_as::<_, User>(
            r#"
            SELECT id, name, email, created_by
            FROM "user"
            WHERE email = $1
            "#,
        )
        .bind(email)
        .fetch_optional(&self.pool)
        .await?;

        Ok(user)
    }
}
