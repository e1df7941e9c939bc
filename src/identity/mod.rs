//! Identity provider integration (Google OAuth2)
//!
//! Builds the login redirect, exchanges authorization codes for access
//! tokens and resolves access tokens to a profile. Nothing is cached: every
//! protected request costs one round trip to the provider.

mod client;
mod types;

pub use client::IdentityClient;
pub use types::*;
