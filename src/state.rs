//! Application state trait for dependency injection
//!
//! Handlers are generic over `HasServices`, so the same router runs with
//! the production `AppState` and with in-memory test states.

use crate::config::Config;
use crate::identity::IdentityClient;
use crate::repository::{AlertRepository, DomainRepository, UserRepository};
use crate::service::{AlertService, DomainService, UserService};

/// Access to configuration, the identity client and the three services.
pub trait HasServices: Clone + Send + Sync + 'static {
    /// The user repository type
    type UserRepo: UserRepository;
    /// The domain repository type
    type DomainRepo: DomainRepository;
    /// The alert repository type
    type AlertRepo: AlertRepository;

    /// Get the application configuration
    fn config(&self) -> &Config;

    /// Get the identity provider client
    fn identity_client(&self) -> &IdentityClient;

    /// Get the user directory service
    fn user_service(&self) -> &UserService<Self::UserRepo>;

    /// Get the domain registry service
    fn domain_service(&self) -> &DomainService<Self::DomainRepo>;

    /// Get the alert reader service
    fn alert_service(&self) -> &AlertService<Self::AlertRepo>;

    /// Whether the store answers a ping
    fn check_ready(&self) -> impl std::future::Future<Output = bool> + Send;
}
