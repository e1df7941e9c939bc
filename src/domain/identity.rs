//! Identity provider profile

use serde::{Deserialize, Serialize};

/// Minimal profile returned by the provider's userinfo endpoint.
/// Only ever folded into a [`super::User`] via upsert.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct IdentityProfile {
    pub email: String,
    #[serde(default)]
    pub name: String,
}
