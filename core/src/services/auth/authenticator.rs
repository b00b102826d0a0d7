//! Credential verification

use std::sync::Arc;

use async_trait::async_trait;
use tracing::debug;

use crate::errors::DomainResult;
use crate::repositories::UserRepository;
use crate::services::password::{self, PasswordHasher};

/// Pluggable credential check used by login
#[async_trait]
pub trait Authenticator: Send + Sync {
    /// Returns `Ok(false)` for an unknown account or a wrong password.
    /// Errors mean the check itself could not run.
    async fn verify_credentials(&self, email: &str, raw_password: &str) -> DomainResult<bool>;
}

/// Checks an email and password against the user directory
///
/// Unknown accounts are verified against a placeholder hash so both failure
/// paths spend comparable time.
pub struct PasswordAuthenticator<U: UserRepository> {
    user_repository: Arc<U>,
    hasher: Arc<dyn PasswordHasher>,
    placeholder_hash: String,
}

impl<U: UserRepository> PasswordAuthenticator<U> {
    pub fn new(user_repository: Arc<U>, hasher: Arc<dyn PasswordHasher>) -> DomainResult<Self> {
        let placeholder_hash = hasher.hash("placeholder-password")?;
        Ok(Self {
            user_repository,
            hasher,
            placeholder_hash,
        })
    }
}

#[async_trait]
impl<U: UserRepository> Authenticator for PasswordAuthenticator<U> {
    async fn verify_credentials(&self, email: &str, raw_password: &str) -> DomainResult<bool> {
        let user = self.user_repository.find_by_email(email).await?;

        let (stored_hash, known) = match &user {
            Some(user) => (user.password_hash.clone(), true),
            None => (self.placeholder_hash.clone(), false),
        };

        let matches = password::verify_blocking(
            Arc::clone(&self.hasher),
            raw_password.to_string(),
            stored_hash,
        )
        .await?;

        if !known {
            debug!("Credential check for unknown account");
        }
        Ok(known && matches)
    }
}
