//! Alert reader business logic

use crate::domain::Alert;
use crate::error::Result;
use crate::repository::AlertRepository;
use std::sync::Arc;
use tracing::{debug, error};

pub struct AlertService<R: AlertRepository> {
    repo: Arc<R>,
}

impl<R: AlertRepository> AlertService<R> {
    pub fn new(repo: Arc<R>) -> Self {
        Self { repo }
    }

    /// Alerts visible to `owner_id`, most recent first. Visibility is
    /// recomputed from the owner's current domains on every call.
    pub async fn fetch_for_user(&self, owner_id: i32) -> Result<Vec<Alert>> {
        let alerts = self.repo.list_for_owner(owner_id).await.inspect_err(|e| {
            error!(user_id = owner_id, error = %e, "Failed to fetch alerts");
        })?;

        debug!(user_id = owner_id, count = alerts.len(), "Fetched alerts");
        Ok(alerts)
    }
}
