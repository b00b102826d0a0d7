//! Revocation store trait defining the interface for the token denylist.

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::errors::DomainError;

/// Durable set of revoked tokens, each held until its natural expiry
///
/// Tokens are compared by exact string equality. Entries must survive a
/// process restart, and a revoked token stays revoked at least until its
/// expiry instant has passed.
///
/// # Concurrency
/// Calls may arrive from many request handlers and the purge job at once.
/// A successful `revoke` must be visible to every `is_revoked` that starts
/// after it returns.
#[async_trait]
pub trait RevocationStore: Send + Sync {
    /// Record a token as revoked
    ///
    /// Revoking the same token twice keeps a single entry and its first
    /// `revoked_at`.
    ///
    /// # Arguments
    /// * `token` - The exact token string presented at logout
    /// * `expires_at` - The token's own expiry, after which the entry may be purged
    /// * `revoked_at` - Instant of the logout, stored as the entry's `created_at`
    ///
    /// # Returns
    /// * `Ok(())` - The entry is durable
    /// * `Err(DomainError)` - Storage error occurred
    ///
    /// # Example
    /// ```no_run
    /// # use chrono::{Duration, Utc};
    /// # use gk_core::repositories::RevocationStore;
    /// # async fn example(store: &impl RevocationStore) -> Result<(), Box<dyn std::error::Error>> {
    /// let now = Utc::now();
    /// store.revoke("eyJhbGciOiJIUzI1NiJ9...", now + Duration::hours(1), now).await?;
    /// assert!(store.is_revoked("eyJhbGciOiJIUzI1NiJ9...").await?);
    /// # Ok(())
    /// # }
    /// ```
    async fn revoke(
        &self,
        token: &str,
        expires_at: DateTime<Utc>,
        revoked_at: DateTime<Utc>,
    ) -> Result<(), DomainError>;

    /// Check whether a token has been revoked
    ///
    /// # Returns
    /// * `Ok(true)` - An entry exists for exactly this string
    /// * `Ok(false)` - No entry
    /// * `Err(DomainError)` - Storage error occurred
    async fn is_revoked(&self, token: &str) -> Result<bool, DomainError>;

    /// Delete every entry whose expiry is strictly before `now`
    ///
    /// # Returns
    /// * `Ok(usize)` - Number of entries removed
    /// * `Err(DomainError)` - Storage error occurred
    async fn purge_expired(&self, now: DateTime<Utc>) -> Result<usize, DomainError>;

    /// Number of entries currently held
    async fn count(&self) -> Result<usize, DomainError>;
}
