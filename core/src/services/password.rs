//! Password hashing

use std::sync::Arc;

use crate::errors::{DomainError, DomainResult};

/// One-way password hashing
pub trait PasswordHasher: Send + Sync {
    fn hash(&self, raw_password: &str) -> Result<String, DomainError>;

    /// Returns `Ok(false)` on mismatch. Errors are reserved for hashes that
    /// cannot be parsed.
    fn verify(&self, raw_password: &str, password_hash: &str) -> Result<bool, DomainError>;
}

/// bcrypt-backed hasher
#[derive(Debug, Clone, Copy)]
pub struct BcryptPasswordHasher {
    cost: u32,
}

impl BcryptPasswordHasher {
    pub fn new(cost: u32) -> Self {
        Self { cost }
    }

    pub fn cost(&self) -> u32 {
        self.cost
    }
}

impl Default for BcryptPasswordHasher {
    fn default() -> Self {
        Self::new(bcrypt::DEFAULT_COST)
    }
}

impl PasswordHasher for BcryptPasswordHasher {
    fn hash(&self, raw_password: &str) -> Result<String, DomainError> {
        bcrypt::hash(raw_password, self.cost).map_err(|e| DomainError::Internal {
            message: format!("Failed to hash password: {}", e),
        })
    }

    fn verify(&self, raw_password: &str, password_hash: &str) -> Result<bool, DomainError> {
        bcrypt::verify(raw_password, password_hash).map_err(|e| DomainError::Internal {
            message: format!("Failed to verify password: {}", e),
        })
    }
}

/// Hash on the blocking pool so slow work factors do not stall the reactor.
pub async fn hash_blocking(hasher: Arc<dyn PasswordHasher>, raw_password: String) -> DomainResult<String> {
    tokio::task::spawn_blocking(move || hasher.hash(&raw_password))
        .await
        .map_err(|e| DomainError::Internal {
            message: format!("Password hashing task failed: {}", e),
        })?
}

/// Verify on the blocking pool.
pub async fn verify_blocking(
    hasher: Arc<dyn PasswordHasher>,
    raw_password: String,
    password_hash: String,
) -> DomainResult<bool> {
    tokio::task::spawn_blocking(move || hasher.verify(&raw_password, &password_hash))
        .await
        .map_err(|e| DomainError::Internal {
            message: format!("Password verification task failed: {}", e),
        })?
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bcrypt_hash_and_verify() {
        let hasher = BcryptPasswordHasher::new(4);
        let hash = hasher.hash("pw1").unwrap();

        assert_ne!(hash, "pw1");
        assert!(hasher.verify("pw1", &hash).unwrap());
        assert!(!hasher.verify("pw2", &hash).unwrap());
    }

    #[test]
    fn test_bcrypt_salts_each_hash() {
        let hasher = BcryptPasswordHasher::new(4);
        assert_ne!(hasher.hash("pw1").unwrap(), hasher.hash("pw1").unwrap());
    }

    #[test]
    fn test_bcrypt_rejects_garbage_hash() {
        let hasher = BcryptPasswordHasher::new(4);
        assert!(hasher.verify("pw1", "not-a-bcrypt-hash").is_err());
    }

    #[tokio::test]
    async fn test_blocking_helpers() {
        let hasher: Arc<dyn PasswordHasher> = Arc::new(BcryptPasswordHasher::new(4));

        let hash = hash_blocking(Arc::clone(&hasher), "pw1".to_string()).await.unwrap();

        assert!(verify_blocking(Arc::clone(&hasher), "pw1".to_string(), hash.clone()).await.unwrap());
        assert!(!verify_blocking(hasher, "pw2".to_string(), hash).await.unwrap());
    }
}
