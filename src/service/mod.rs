//! Business logic layer

pub mod alert;
pub mod user;
pub mod web_domain;

pub use alert::AlertService;
pub use user::UserService;
pub use web_domain::DomainService;
