//! User directory business logic

use crate::domain::User;
use crate::error::{AppError, Result};
use crate::repository::UserRepository;
use std::sync::Arc;
use tracing::{error, info};

pub struct UserService<R: UserRepository> {
    repo: Arc<R>,
}

impl<R: UserRepository> UserService<R> {
    pub fn new(repo: Arc<R>) -> Self {
        Self { repo }
    }

    /// Create the user for `email`, or update its display name
    pub async fn upsert(&self, name: &str, email: &str) -> Result<()> {
        self.repo.upsert(name, email).await.inspect_err(|e| {
            error!(email = %email, error = %e, "Failed to upsert user");
        })?;
        info!(email = %email, "User upserted");
        Ok(())
    }

    pub async fn get_by_email(&self, email: &str) -> Result<User> {
        self.repo
            .find_by_email(email)
            .await?
            .ok_or_else(|| AppError::NotFound("User not found".to_string()))
    }
}
