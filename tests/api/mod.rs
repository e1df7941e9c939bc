//! API integration tests infrastructure
//!
//! In-memory repositories standing in for PostgreSQL. The alert repository
//! reads the domain repository's rows, so alert visibility follows the
//! same name join the SQL uses.


use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::collections::HashSet;
use std::sync::atomic::{AtomicBool, AtomicI32, Ordering};
use std::sync::Arc;
use syra_core::domain::{Alert, CreateDomainInput, Domain, User};
use syra_core::error::{AppError, Result};
use syra_core::repository::{AlertRepository, DomainRepository, UserRepository};
use tokio::sync::RwLock;

fn store_down() -> AppError {
    AppError::Database(sqlx::Error::PoolTimedOut)
}

// ============================================================================
// Test Repository Implementations
// ============================================================================

pub struct TestUserRepository {
    users: RwLock<Vec<User>>,
    next_id: AtomicI32,
    unavailable: AtomicBool,
}

impl TestUserRepository {
    pub fn new() -> Self {
        Self {
            users: RwLock::new(vec![]),
            next_id: AtomicI32::new(1),
            unavailable: AtomicBool::new(false),
        }
    }

    /// Insert a user directly and return its id
    pub async fn add_user(&self, name: &str, email: &str) -> i32 {
        let id = self.next_id.fetch_add(1, Ordering::SeqCst);
        self.users.write().await.push(User {
            id,
            name: name.to_string(),
            email: email.to_string(),
            created_by: "oauth".to_string(),
        });
        id
    }

    pub async fn all(&self) -> Vec<User> {
        self.users.read().await.clone()
    }

    pub fn set_unavailable(&self, unavailable: bool) {
        self.unavailable.store(unavailable, Ordering::SeqCst);
    }

    fn check(&self) -> Result<()> {
        if self.unavailable.load(Ordering::SeqCst) {
            return Err(store_down());
        }
        Ok(())
    }
}

impl Default for TestUserRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl UserRepository for TestUserRepository {
    async fn upsert(&self, name: &str, email: &str) -> Result<()> {
        self.check()?;
        let mut users = self.users.write().await;
        match users.iter_mut().find(|u| u.email == email) {
            Some(existing) => existing.name = name.to_string(),
            None => users.push(User {
                id: self.next_id.fetch_add(1, Ordering::SeqCst),
                name: name.to_string(),
                email: email.to_string(),
                created_by: "oauth".to_string(),
            }),
        }
        Ok(())
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>> {
        self.check()?;
        let users = self.users.read().await;
        Ok(users.iter().find(|u| u.email == email).cloned())
    }
}

pub struct TestDomainRepository {
    domains: RwLock<Vec<Domain>>,
    next_id: AtomicI32,
    unavailable: AtomicBool,
}

impl TestDomainRepository {
    pub fn new() -> Self {
        Self {
            domains: RwLock::new(vec![]),
            next_id: AtomicI32::new(1),
            unavailable: AtomicBool::new(false),
        }
    }

    /// Insert a domain directly and return its id
    pub async fn add_domain(&self, owner_id: i32, name: &str, url: &str) -> i32 {
        let id = self.next_id.fetch_add(1, Ordering::SeqCst);
        self.domains.write().await.push(Domain {
            id,
            name: name.to_string(),
            url: url.to_string(),
            owner_id,
            created_at: Utc::now(),
        });
        id
    }

    pub async fn all(&self) -> Vec<Domain> {
        self.domains.read().await.clone()
    }

    pub fn set_unavailable(&self, unavailable: bool) {
        self.unavailable.store(unavailable, Ordering::SeqCst);
    }

    fn check(&self) -> Result<()> {
        if self.unavailable.load(Ordering::SeqCst) {
            return Err(store_down());
        }
        Ok(())
    }

    async fn names_owned_by(&self, owner_id: i32) -> HashSet<String> {
        self.domains
            .read()
            .await
            .iter()
            .filter(|d| d.owner_id == owner_id)
            .map(|d| d.name.clone())
            .collect()
    }
}

impl Default for TestDomainRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl DomainRepository for TestDomainRepository {
    async fn create(&self, owner_id: i32, input: &CreateDomainInput) -> Result<Domain> {
        self.check()?;
        let domain = Domain {
            id: self.next_id.fetch_add(1, Ordering::SeqCst),
            name: input.name.clone(),
            url: input.url.clone(),
            owner_id,
            created_at: Utc::now(),
        };
        self.domains.write().await.push(domain.clone());
        Ok(domain)
    }

    async fn list_by_owner(&self, owner_id: i32) -> Result<Vec<Domain>> {
        self.check()?;
        let mut owned: Vec<Domain> = self
            .domains
            .read()
            .await
            .iter()
            .filter(|d| d.owner_id == owner_id)
            .cloned()
            .collect();
        owned.sort_by(|a, b| a.created_at.cmp(&b.created_at).then(a.id.cmp(&b.id)));
        Ok(owned)
    }

    async fn delete_owned(&self, id: i32, owner_id: i32) -> Result<()> {
        self.check()?;
        let mut domains = self.domains.write().await;
        let before = domains.len();
        domains.retain(|d| !(d.id == id && d.owner_id == owner_id));
        if domains.len() == before {
            return Err(AppError::NotFound("Domain not found".to_string()));
        }
        Ok(())
    }
}

pub struct TestAlertRepository {
    alerts: RwLock<Vec<Alert>>,
    domains: Arc<TestDomainRepository>,
}

impl TestAlertRepository {
    pub fn new(domains: Arc<TestDomainRepository>) -> Self {
        Self {
            alerts: RwLock::new(vec![]),
            domains,
        }
    }

    pub async fn add_alert(&self, alert: Alert) {
        self.alerts.write().await.push(alert);
    }
}

#[async_trait]
impl AlertRepository for TestAlertRepository {
    async fn list_for_owner(&self, owner_id: i32) -> Result<Vec<Alert>> {
        self.domains.check()?;
        let names = self.domains.names_owned_by(owner_id).await;
        let mut visible: Vec<Alert> = self
            .alerts
            .read()
            .await
            .iter()
            .filter(|a| names.contains(&a.agent_name))
            .cloned()
            .collect();
        visible.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));
        Ok(visible)
    }
}

/// Alert fixture raised by `agent_name` at `timestamp`
pub fn alert(id: &str, agent_name: &str, timestamp: DateTime<Utc>) -> Alert {
    Alert {
        id: id.to_string(),
        severity: "high".to_string(),
        title: format!("Alert {id}"),
        rule_id: 31101,
        timestamp,
        agent_name: agent_name.to_string(),
        status_code: 404,
        ..Default::default()
    }
}
