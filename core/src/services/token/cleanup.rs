//! Background purge of expired revocation entries
//!
//! Revoked tokens only need to be remembered until they would have expired on
//! their own. This job deletes entries past that point so the store does not
//! grow without bound.

use std::sync::Arc;
use std::time::Duration;

use gk_shared::PurgeConfig;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use tracing::{error, info, warn};

use crate::repositories::RevocationStore;
use crate::services::clock::Clock;

/// Configuration for the revocation cleanup service
#[derive(Debug, Clone)]
pub struct RevocationCleanupConfig {
    /// How often to run cleanup
    pub interval: Duration,
    /// Whether to enable automatic cleanup
    pub enabled: bool,
}

impl Default for RevocationCleanupConfig {
    fn default() -> Self {
        Self {
            interval: Duration::from_secs(3600), // Run every hour
            enabled: true,
        }
    }
}

impl From<&PurgeConfig> for RevocationCleanupConfig {
    fn from(config: &PurgeConfig) -> Self {
        Self {
            interval: Duration::from_secs(config.interval_seconds),
            enabled: config.enabled,
        }
    }
}

/// Service for purging expired revocation entries
pub struct RevocationCleanupService<S: RevocationStore + 'static> {
    store: Arc<S>,
    clock: Arc<dyn Clock>,
    config: RevocationCleanupConfig,
}

impl<S: RevocationStore + 'static> RevocationCleanupService<S> {
    /// Create a new cleanup service
    pub fn new(store: Arc<S>, clock: Arc<dyn Clock>, config: RevocationCleanupConfig) -> Self {
        Self {
            store,
            clock,
            config,
        }
    }

    /// Run a single cleanup cycle
    ///
    /// Failures are recorded in the result rather than returned, so the
    /// caller can keep its schedule going.
    pub async fn run_cleanup(&self) -> CleanupResult {
        let now = self.clock.now();
        let mut result = CleanupResult::default();

        info!("Starting revocation cleanup cycle");

        match self.store.purge_expired(now).await {
            Ok(count) => {
                result.entries_purged = count;
                info!(purged = count, "Revocation cleanup completed");
            }
            Err(e) => {
                error!(error = %e, "Failed to purge expired revocation entries");
                result.errors.push(format!("Purge error: {}", e));
            }
        }

        result
    }

    /// Start the cleanup service as a background task
    ///
    /// The first cycle runs immediately, then every configured interval.
    /// Each cycle runs in its own task so a panic inside the store ends only
    /// that cycle. Returns `None` when the service is disabled.
    pub fn start_background_task(self: Arc<Self>) -> Option<JoinHandle<()>> {
        if !self.config.enabled {
            warn!("Revocation cleanup service is disabled");
            return None;
        }

        let handle = tokio::spawn(async move {
            info!(
                interval_seconds = self.config.interval.as_secs(),
                "Revocation cleanup service started"
            );

            let mut interval_timer = tokio::time::interval(self.config.interval);
            interval_timer.set_missed_tick_behavior(MissedTickBehavior::Delay);

            loop {
                interval_timer.tick().await;

                let service = Arc::clone(&self);
                match tokio::spawn(async move { service.run_cleanup().await }).await {
                    Ok(result) => {
                        if !result.is_success() {
                            warn!(errors = ?result.errors, "Cleanup completed with errors");
                        }
                    }
                    Err(e) => {
                        error!(error = %e, "Revocation cleanup cycle aborted");
                    }
                }
            }
        });

        Some(handle)
    }
}

/// Result of a cleanup operation
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct CleanupResult {
    /// Number of revocation entries deleted
    pub entries_purged: usize,
    /// Any errors encountered during cleanup
    pub errors: Vec<String>,
}

impl CleanupResult {
    /// Check if the cleanup was successful (no errors)
    pub fn is_success(&self) -> bool {
        self.errors.is_empty()
    }
}
