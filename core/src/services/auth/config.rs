//! Configuration for the authentication service

use crate::domain::entities::user::Role;

/// Configuration for the authentication service
#[derive(Debug, Clone)]
pub struct AuthServiceConfig {
    /// Role granted to newly registered accounts
    pub default_role: Role,
    /// Whether issued tokens carry the `roles` claim
    pub embed_roles_claim: bool,
}

impl Default for AuthServiceConfig {
    fn default() -> Self {
        Self {
            default_role: Role::User,
            embed_roles_claim: true,
        }
    }
}
