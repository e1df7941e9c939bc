//! Domain models for Syra Core

pub mod alert;
pub mod identity;
pub mod user;
pub mod web_domain;

pub use alert::*;
pub use identity::*;
pub use user::*;
pub use web_domain::*;
