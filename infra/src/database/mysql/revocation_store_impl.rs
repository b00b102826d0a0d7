//! MySQL implementation of the RevocationStore trait.
//!
//! Revoked tokens are kept in `revoked_tokens`. Token strings are too long
//! to index directly, so each row carries the SHA-256 digest of its token
//! under a unique key. Lookups compare the full token as well.

use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};
use sha2::{Digest, Sha256};
use sqlx::{MySqlPool, Row};

use gk_core::errors::DomainError;
use gk_core::repositories::RevocationStore;

/// MySQL implementation of RevocationStore
pub struct MySqlRevocationStore {
    /// Database connection pool
    pool: MySqlPool,
}

impl MySqlRevocationStore {
    /// Create a new MySQL revocation store
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }

    /// Hex-encoded SHA-256 of the token, used as the unique key
    pub fn token_digest(token: &str) -> String {
        hex::encode(Sha256::digest(token.as_bytes()))
    }

    /// Fit an instant into the `DATETIME(6)` range
    ///
    /// An unverified token may carry any `exp`. Out-of-range values would
    /// make the insert fail, so they are pinned to the nearest bound.
    pub fn clamp_to_column(at: DateTime<Utc>) -> DateTime<Utc> {
        let (min, max) = datetime_column_bounds();
        at.clamp(min, max)
    }
}

fn datetime_column_bounds() -> (DateTime<Utc>, DateTime<Utc>) {
    let min = NaiveDate::from_ymd_opt(1000, 1, 1)
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
        .unwrap_or(DateTime::<Utc>::MIN_UTC);
    let max = NaiveDate::from_ymd_opt(9999, 12, 31)
        .and_then(|d| d.and_hms_micro_opt(23, 59, 59, 999_999))
        .map(|naive| naive.and_utc())
        .unwrap_or(DateTime::<Utc>::MAX_UTC);
    (min, max)
}

#[async_trait]
impl RevocationStore for MySqlRevocationStore {
    async fn revoke(
        &self,
        token: &str,
        expires_at: DateTime<Utc>,
        revoked_at: DateTime<Utc>,
    ) -> Result<(), DomainError> {
        let query = r#"
            INSERT INTO revoked_tokens (token_digest, token, expires_at, created_at)
            VALUES (?, ?, ?, ?)
            ON DUPLICATE KEY UPDATE expires_at = VALUES(expires_at)
        "#;

        sqlx::query(query)
            .bind(Self::token_digest(token))
            .bind(token)
            .bind(Self::clamp_to_column(expires_at))
            .bind(Self::clamp_to_column(revoked_at))
            .execute(&self.pool)
            .await
            .map_err(|e| DomainError::storage(format!("Failed to revoke token: {}", e)))?;

        Ok(())
    }

    async fn is_revoked(&self, token: &str) -> Result<bool, DomainError> {
        let query = r#"
            SELECT COUNT(*) AS total
            FROM revoked_tokens
            WHERE token_digest = ? AND token = ?
        "#;

        let row = sqlx::query(query)
            .bind(Self::token_digest(token))
            .bind(token)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| DomainError::storage(format!("Failed to check revocation: {}", e)))?;

        let total: i64 = row
            .try_get("total")
            .map_err(|e| DomainError::storage(format!("Failed to get count: {}", e)))?;

        Ok(total > 0)
    }

    async fn purge_expired(&self, now: DateTime<Utc>) -> Result<usize, DomainError> {
        let result = sqlx::query("DELETE FROM revoked_tokens WHERE expires_at < ?")
            .bind(now)
            .execute(&self.pool)
            .await
            .map_err(|e| DomainError::storage(format!("Failed to purge revoked tokens: {}", e)))?;

        Ok(result.rows_affected() as usize)
    }

    async fn count(&self) -> Result<usize, DomainError> {
        let row = sqlx::query("SELECT COUNT(*) AS total FROM revoked_tokens")
            .fetch_one(&self.pool)
            .await
            .map_err(|e| DomainError::storage(format!("Failed to count revoked tokens: {}", e)))?;

        let total: i64 = row
            .try_get("total")
            .map_err(|e| DomainError::storage(format!("Failed to get count: {}", e)))?;

        Ok(total as usize)
    }
}
