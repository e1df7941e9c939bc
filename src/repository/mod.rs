//! Data access layer (Repository pattern)

pub mod alert;
pub mod user;
pub mod web_domain;

pub use alert::AlertRepository;
pub use user::UserRepository;
pub use web_domain::DomainRepository;
