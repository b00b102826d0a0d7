//! In-memory implementation of RevocationStore for tests and local runs

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::domain::entities::token::RevocationEntry;
use crate::errors::DomainError;

use super::trait_::RevocationStore;

/// Mock revocation store keyed by token string
///
/// `set_unavailable(true)` makes every call fail with a storage error, which
/// lets tests exercise the outage paths.
#[derive(Clone)]
pub struct MockRevocationStore {
    entries: Arc<RwLock<HashMap<String, RevocationEntry>>>,
    unavailable: Arc<AtomicBool>,
}

impl MockRevocationStore {
    /// Create a new mock store
    pub fn new() -> Self {
        Self {
            entries: Arc::new(RwLock::new(HashMap::new())),
            unavailable: Arc::new(AtomicBool::new(false)),
        }
    }

    pub fn set_unavailable(&self, unavailable: bool) {
        self.unavailable.store(unavailable, Ordering::SeqCst);
    }

    /// Fetch the stored entry for a token
    pub async fn entry(&self, token: &str) -> Option<RevocationEntry> {
        self.entries.read().await.get(token).cloned()
    }

    fn check_available(&self) -> Result<(), DomainError> {
        if self.unavailable.load(Ordering::SeqCst) {
            return Err(DomainError::storage("revocation store unavailable"));
        }
        Ok(())
    }
}

impl Default for MockRevocationStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl RevocationStore for MockRevocationStore {
    async fn revoke(
        &self,
        token: &str,
        expires_at: DateTime<Utc>,
        revoked_at: DateTime<Utc>,
    ) -> Result<(), DomainError> {
        self.check_available()?;
        let mut entries = self.entries.write().await;
        entries
            .entry(token.to_string())
            .and_modify(|entry| entry.expires_at = expires_at)
            .or_insert_with(|| RevocationEntry::new(token, expires_at, revoked_at));
        Ok(())
    }

    async fn is_revoked(&self, token: &str) -> Result<bool, DomainError> {
        self.check_available()?;
        let entries = self.entries.read().await;
        Ok(entries.contains_key(token))
    }

    async fn purge_expired(&self, now: DateTime<Utc>) -> Result<usize, DomainError> {
        self.check_available()?;
        let mut entries = self.entries.write().await;
        let before = entries.len();
        entries.retain(|_, entry| !entry.is_purgeable(now));
        Ok(before - entries.len())
    }

    async fn count(&self) -> Result<usize, DomainError> {
        self.check_available()?;
        Ok(self.entries.read().await.len())
    }
}
