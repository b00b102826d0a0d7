//! HTTP route handlers and the state they share

pub mod auth;
pub mod health;
pub mod users;

use std::sync::Arc;

use gk_core::repositories::{RevocationStore, UserRepository};
use gk_core::services::auth::AuthService;
use gk_core::services::user::UserService;
use gk_shared::{CorsConfig, Environment};

use crate::health::HealthCheck;

/// Application state shared across all handlers
pub struct AppState<U, R>
where
    U: UserRepository,
    R: RevocationStore,
{
    pub auth_service: Arc<AuthService<U, R>>,
    pub user_service: Arc<UserService<U>>,
    pub health_checks: Vec<Arc<dyn HealthCheck>>,
    pub environment: Environment,
    pub cors: CorsConfig,
}

impl<U, R> AppState<U, R>
where
    U: UserRepository,
    R: RevocationStore,
{
    /// Development defaults for the HTTP surface, no readiness checks
    pub fn new(auth_service: Arc<AuthService<U, R>>, user_service: Arc<UserService<U>>) -> Self {
        Self {
            auth_service,
            user_service,
            health_checks: Vec::new(),
            environment: Environment::default(),
            cors: CorsConfig::default(),
        }
    }

    pub fn with_cors(mut self, environment: Environment, cors: CorsConfig) -> Self {
        self.environment = environment;
        self.cors = cors;
        self
    }

    /// Register a dependency for GET /health/ready
    pub fn with_health_check(mut self, check: Arc<dyn HealthCheck>) -> Self {
        self.health_checks.push(check);
        self
    }
}
