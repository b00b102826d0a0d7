//! Test doubles for authentication service tests

use std::sync::Arc;

use async_trait::async_trait;
use base64::{engine::general_purpose::STANDARD, Engine as _};
use chrono::{DateTime, Duration};

use crate::errors::{DomainError, DomainResult};
use crate::repositories::{MockRevocationStore, MockUserRepository};
use crate::services::auth::{AuthService, AuthServiceConfig, Authenticator, PasswordAuthenticator};
use crate::services::clock::ManualClock;
use crate::services::password::PasswordHasher;
use crate::services::token::{TokenCodec, TokenCodecConfig};

pub const TOKEN_TTL_SECONDS: i64 = 3600;

/// Reversible "hash" so tests stay fast
pub struct PlainHasher;

impl PasswordHasher for PlainHasher {
    fn hash(&self, raw_password: &str) -> Result<String, DomainError> {
        Ok(format!("hashed:{}", raw_password))
    }

    fn verify(&self, raw_password: &str, password_hash: &str) -> Result<bool, DomainError> {
        Ok(password_hash == format!("hashed:{}", raw_password))
    }
}

/// Authenticator with a fixed answer
pub struct StubAuthenticator(pub bool);

#[async_trait]
impl Authenticator for StubAuthenticator {
    async fn verify_credentials(&self, _email: &str, _raw_password: &str) -> DomainResult<bool> {
        Ok(self.0)
    }
}

pub fn test_secret(byte: u8) -> String {
    STANDARD.encode([byte; 32])
}

pub fn test_codec(secret: String, clock: &ManualClock) -> Arc<TokenCodec> {
    let config = TokenCodecConfig::new(secret, Duration::seconds(TOKEN_TTL_SECONDS));
    Arc::new(TokenCodec::new(config, Arc::new(clock.clone())).unwrap())
}

pub struct Harness {
    pub service: AuthService<MockUserRepository, MockRevocationStore>,
    pub users: Arc<MockUserRepository>,
    pub store: Arc<MockRevocationStore>,
    pub codec: Arc<TokenCodec>,
    pub clock: ManualClock,
}

impl Harness {
    pub fn new() -> Self {
        let users = Arc::new(MockUserRepository::new());
        let authenticator =
            PasswordAuthenticator::new(Arc::clone(&users), Arc::new(PlainHasher)).unwrap();
        Self::with_authenticator(users, Arc::new(authenticator))
    }

    pub fn with_authenticator(
        users: Arc<MockUserRepository>,
        authenticator: Arc<dyn Authenticator>,
    ) -> Self {
        let store = Arc::new(MockRevocationStore::new());
        let clock = ManualClock::new(DateTime::from_timestamp(1_700_000_000, 0).unwrap());
        let codec = test_codec(test_secret(7), &clock);

        let service = AuthService::new(
            Arc::clone(&users),
            Arc::clone(&store),
            Arc::clone(&codec),
            Arc::new(PlainHasher),
            authenticator,
            AuthServiceConfig::default(),
        );

        Self {
            service,
            users,
            store,
            codec,
            clock,
        }
    }
}
