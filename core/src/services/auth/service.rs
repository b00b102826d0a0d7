//! Main authentication service implementation

use std::sync::Arc;

use serde_json::{json, Map, Value};
use tracing::{debug, error, info, warn};

use crate::domain::entities::token::ROLES_CLAIM;
use crate::domain::entities::user::User;
use crate::domain::value_objects::auth_response::{LOGOUT_FAILED, LOGOUT_INVALID_TOKEN};
use crate::domain::value_objects::{AuthResponse, LogoutResponse};
use crate::errors::{AuthError, DomainError, DomainResult};
use crate::repositories::{RevocationStore, UserRepository};
use crate::services::clock::Clock;
use crate::services::password::{self, PasswordHasher};
use crate::services::token::TokenCodec;

use super::authenticator::Authenticator;
use super::config::AuthServiceConfig;

/// Authentication service for registration, login, logout and session checks
pub struct AuthService<U, R>
where
    U: UserRepository,
    R: RevocationStore,
{
    /// User directory
    user_repository: Arc<U>,
    /// Durable denylist of logged-out tokens
    revocation_store: Arc<R>,
    /// Token issuance and verification
    token_codec: Arc<TokenCodec>,
    /// Hashes passwords at registration
    password_hasher: Arc<dyn PasswordHasher>,
    /// Credential check used by login
    authenticator: Arc<dyn Authenticator>,
    /// Same clock the codec stamps `iat` with
    clock: Arc<dyn Clock>,
    /// Service configuration
    config: AuthServiceConfig,
}

impl<U, R> AuthService<U, R>
where
    U: UserRepository,
    R: RevocationStore,
{
    /// Create a new authentication service
    ///
    /// # Arguments
    ///
    /// * `user_repository` - Account directory
    /// * `revocation_store` - Store consulted on every session check
    /// * `token_codec` - Issues and verifies tokens; its clock is reused here
    /// * `password_hasher` - Hashes passwords at registration
    /// * `authenticator` - Verifies credentials at login
    /// * `config` - Service configuration
    pub fn new(
        user_repository: Arc<U>,
        revocation_store: Arc<R>,
        token_codec: Arc<TokenCodec>,
        password_hasher: Arc<dyn PasswordHasher>,
        authenticator: Arc<dyn Authenticator>,
        config: AuthServiceConfig,
    ) -> Self {
        let clock = token_codec.clock();
        Self {
            user_repository,
            revocation_store,
            token_codec,
            password_hasher,
            authenticator,
            clock,
            config,
        }
    }

    /// Register a new account and issue its first token
    ///
    /// # Returns
    ///
    /// * `Ok(AuthResponse)` - Account stored and token issued
    /// * `Err(DomainError::Auth(AuthError::DuplicateSubject))` - Email already registered
    /// * `Err(DomainError)` - Validation or storage failure
    pub async fn register(&self, email: &str, raw_password: &str) -> DomainResult<AuthResponse> {
        info!(email = %email, "Attempting to register new user");

        if email.trim().is_empty() || raw_password.is_empty() {
            return Err(DomainError::Validation {
                message: "Email and password are required".to_string(),
            });
        }

        if self.user_repository.exists_by_email(email).await? {
            warn!(email = %email, "Registration failed - email already exists");
            return Err(AuthError::DuplicateSubject {
                email: email.to_string(),
            }
            .into());
        }

        let password_hash =
            password::hash_blocking(Arc::clone(&self.password_hasher), raw_password.to_string())
                .await?;

        let user = User::new(
            email.to_string(),
            password_hash,
            vec![self.config.default_role],
        );
        // A concurrent registration can still win here; the directory rejects it.
        let user = self.user_repository.save(user).await?;

        info!(user_id = %user.id, "User successfully registered");

        let token = self.issue_for(&user)?;
        Ok(AuthResponse::new(token))
    }

    /// Verify credentials and issue a token
    ///
    /// Unknown accounts and wrong passwords both yield
    /// `AuthError::InvalidCredentials`.
    pub async fn authenticate(&self, email: &str, raw_password: &str) -> DomainResult<AuthResponse> {
        info!(email = %email, "Attempting to authenticate user");

        if !self
            .authenticator
            .verify_credentials(email, raw_password)
            .await?
        {
            warn!(email = %email, "Authentication failed");
            return Err(AuthError::InvalidCredentials.into());
        }

        let user = self
            .user_repository
            .find_by_email(email)
            .await?
            .ok_or_else(|| {
                error!(email = %email, "User not found after successful authentication");
                DomainError::NotFound {
                    resource: "User".to_string(),
                }
            })?;

        info!(user_id = %user.id, "User successfully authenticated");

        let token = self.issue_for(&user)?;
        Ok(AuthResponse::new(token))
    }

    /// Revoke the presented token
    ///
    /// Never returns an error. The signature is not checked: a token the
    /// server did not issue is recorded all the same, which denies nothing
    /// that was ever granted.
    pub async fn logout(&self, token: Option<&str>) -> LogoutResponse {
        info!("Processing logout request");

        let token = match token {
            Some(token) if !token.trim().is_empty() => token,
            _ => {
                warn!("Invalid token provided for logout");
                return LogoutResponse::failure(LOGOUT_INVALID_TOKEN);
            }
        };

        let claims = match self.token_codec.decode_unverified(token) {
            Ok(claims) => claims,
            Err(e) => {
                warn!(error = %e, "Could not read expiry from logout token");
                return LogoutResponse::failure(LOGOUT_INVALID_TOKEN);
            }
        };
        let expires_at = self.token_codec.extract_expiry(&claims);
        let revoked_at = self.clock.now();

        match self
            .revocation_store
            .revoke(token, expires_at, revoked_at)
            .await
        {
            Ok(()) => {
                info!(expires_at = %expires_at, "User logged out successfully");
                LogoutResponse::success()
            }
            Err(e) => {
                error!(error = %e, "Error during logout");
                LogoutResponse::failure(LOGOUT_FAILED)
            }
        }
    }

    /// True when the token is not revoked, verifies, names an existing
    /// account and has not expired
    ///
    /// Storage failures propagate instead of reading as "inactive".
    pub async fn is_session_active(&self, token: &str) -> DomainResult<bool> {
        Ok(self.authorize(token).await?.is_some())
    }

    /// Resolve a bearer token to its account
    ///
    /// # Returns
    ///
    /// * `Ok(Some(User))` - The session is active
    /// * `Ok(None)` - Revoked, unverifiable, unknown subject or expired
    /// * `Err(DomainError)` - The revocation store or directory failed
    pub async fn authorize(&self, token: &str) -> DomainResult<Option<User>> {
        if self.revocation_store.is_revoked(token).await? {
            debug!("Rejected revoked token");
            return Ok(None);
        }

        let claims = match self.token_codec.decode(token) {
            Ok(claims) => claims,
            Err(e) => {
                debug!(error = %e, "Rejected unverifiable token");
                return Ok(None);
            }
        };

        let subject = self.token_codec.extract_subject(&claims);
        let Some(user) = self.user_repository.find_by_email(subject).await? else {
            debug!("Rejected token for unknown subject");
            return Ok(None);
        };

        let now = self.clock.now();
        if self.token_codec.is_valid_for(token, &user.email, now) {
            Ok(Some(user))
        } else {
            Ok(None)
        }
    }

    fn issue_for(&self, user: &User) -> DomainResult<String> {
        let mut extra = Map::new();
        if self.config.embed_roles_claim {
            let roles: Vec<Value> = user.authorities().into_iter().map(Value::String).collect();
            extra.insert(ROLES_CLAIM.to_string(), json!(roles));
        }
        self.token_codec.issue_default(&user.email, extra)
    }
}
