//! Readiness checks for the dependencies the server cannot run without

use async_trait::async_trait;
use serde_json::Value;

use gk_infra::database::DatabasePool;

/// A dependency the readiness endpoint reports on
///
/// `check` returns details to show when the dependency is up, or an error
/// describing why it is down.
#[async_trait]
pub trait HealthCheck: Send + Sync {
    /// Key the result is reported under
    fn name(&self) -> &'static str;

    async fn check(&self) -> anyhow::Result<Value>;
}

/// MySQL round-trip plus pool occupancy
pub struct DatabaseHealthCheck {
    pool: DatabasePool,
}

impl DatabaseHealthCheck {
    pub fn new(pool: DatabasePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl HealthCheck for DatabaseHealthCheck {
    fn name(&self) -> &'static str {
        "database"
    }

    async fn check(&self) -> anyhow::Result<Value> {
        let health = self.pool.health_check().await?;
        Ok(serde_json::to_value(health)?)
    }
}
