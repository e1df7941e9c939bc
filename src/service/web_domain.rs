//! Domain registry business logic

use crate::domain::{CreateDomainInput, Domain, DomainSummary};
use crate::error::{AppError, Result};
use crate::repository::DomainRepository;
use std::sync::Arc;
use tracing::{error, info, warn};
use validator::Validate;

pub struct DomainService<R: DomainRepository> {
    repo: Arc<R>,
}

impl<R: DomainRepository> DomainService<R> {
    pub fn new(repo: Arc<R>) -> Self {
        Self { repo }
    }

    /// Register a domain for `owner_id`. Name and URL must both be non-empty;
    /// nothing reaches the store otherwise.
    pub async fn add(&self, owner_id: i32, input: CreateDomainInput) -> Result<Domain> {
        if input.validate().is_err() {
            return Err(AppError::BadRequest("Name and URL are required".to_string()));
        }

        let domain = self.repo.create(owner_id, &input).await.inspect_err(|e| {
            error!(user_id = owner_id, name = %input.name, error = %e, "Failed to insert domain");
        })?;

        info!(user_id = owner_id, domain_id = domain.id, name = %domain.name, "Domain added");
        Ok(domain)
    }

    pub async fn list(&self, owner_id: i32) -> Result<Vec<DomainSummary>> {
        let domains = self.repo.list_by_owner(owner_id).await.inspect_err(|e| {
            error!(user_id = owner_id, error = %e, "Failed to fetch domains");
        })?;

        Ok(domains.into_iter().map(DomainSummary::from).collect())
    }

    pub async fn delete(&self, domain_id: i32, owner_id: i32) -> Result<()> {
        match self.repo.delete_owned(domain_id, owner_id).await {
            Ok(()) => {
                info!(user_id = owner_id, domain_id, "Domain deleted");
                Ok(())
            }
            Err(AppError::NotFound(msg)) => {
                warn!(user_id = owner_id, domain_id, "No domain found for owner");
                Err(AppError::NotFound(msg))
            }
            Err(e) => {
                error!(user_id = owner_id, domain_id, error = %e, "Failed to delete domain");
                Err(e)
            }
        }
    }
}
