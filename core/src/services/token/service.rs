//! HS256 token codec

use std::sync::Arc;

use base64::{engine::general_purpose::STANDARD, Engine as _};
use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde_json::{Map, Value};
use tracing::{debug, warn};

use crate::domain::entities::token::{Claims, RESERVED_CLAIMS};
use crate::errors::{DomainError, DomainResult, TokenError};
use crate::services::clock::Clock;

use super::config::{TokenCodecConfig, MIN_SECRET_BYTES};

/// Issues and verifies signed bearer tokens
///
/// Expiry is never checked during decode. Callers compare `exp` against their
/// own clock through [`TokenCodec::is_expired`] or [`TokenCodec::is_valid_for`],
/// which keeps the time source injectable.
pub struct TokenCodec {
    config: TokenCodecConfig,
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
    unverified_validation: Validation,
    clock: Arc<dyn Clock>,
}

impl TokenCodec {
    /// Creates a new token codec
    ///
    /// # Arguments
    ///
    /// * `config` - Secret and default time-to-live
    /// * `clock` - Source of `iat` for issued tokens
    ///
    /// # Returns
    ///
    /// The codec, or `TokenError::KeyLoadError` when the secret is not valid
    /// base64 or decodes to fewer than 32 bytes
    pub fn new(config: TokenCodecConfig, clock: Arc<dyn Clock>) -> DomainResult<Self> {
        let secret = STANDARD
            .decode(config.secret.trim())
            .map_err(|e| TokenError::KeyLoadError {
                message: format!("secret is not valid base64: {}", e),
            })?;

        if secret.len() < MIN_SECRET_BYTES {
            return Err(TokenError::KeyLoadError {
                message: format!(
                    "secret decodes to {} bytes, at least {} required",
                    secret.len(),
                    MIN_SECRET_BYTES
                ),
            }
            .into());
        }

        let mut validation = Validation::new(Algorithm::HS256);
        validation.validate_exp = false;
        validation.validate_nbf = false;
        validation.validate_aud = false;
        validation.leeway = 0;
        validation.set_required_spec_claims(&["sub", "exp"]);

        let mut unverified_validation = Validation::new(Algorithm::HS256);
        unverified_validation.insecure_disable_signature_validation();
        unverified_validation.validate_exp = false;
        unverified_validation.validate_nbf = false;
        unverified_validation.validate_aud = false;
        unverified_validation.set_required_spec_claims(&["exp"]);

        Ok(Self {
            encoding_key: EncodingKey::from_secret(&secret),
            decoding_key: DecodingKey::from_secret(&secret),
            config,
            validation,
            unverified_validation,
            clock,
        })
    }

    /// Clock used for `iat`, shared with callers that validate expiry
    pub fn clock(&self) -> Arc<dyn Clock> {
        Arc::clone(&self.clock)
    }

    /// Default time-to-live for issued tokens
    pub fn default_ttl(&self) -> Duration {
        self.config.ttl
    }

    /// Issue a token with the configured time-to-live
    pub fn issue_default(&self, subject: &str, extra_claims: Map<String, Value>) -> DomainResult<String> {
        self.issue(subject, extra_claims, self.config.ttl)
    }

    /// Issue a signed token
    ///
    /// `iat` is the clock's current second and `exp` is `iat` plus the whole
    /// seconds of `ttl`. Extra claims named `sub`, `iat` or `exp` are dropped.
    pub fn issue(
        &self,
        subject: &str,
        extra_claims: Map<String, Value>,
        ttl: Duration,
    ) -> DomainResult<String> {
        let ttl_seconds = ttl.num_seconds();
        if ttl_seconds <= 0 {
            return Err(DomainError::Validation {
                message: "Token time-to-live must be at least one second".to_string(),
            });
        }

        let mut extra = extra_claims;
        for reserved in RESERVED_CLAIMS {
            if extra.remove(reserved).is_some() {
                warn!(claim = reserved, "Ignoring reserved claim supplied as extra claim");
            }
        }

        let issued_at = self.clock.now().timestamp();
        let expires_at = issued_at
            .checked_add(ttl_seconds)
            .ok_or(TokenError::TokenGenerationFailed)?;

        let claims = Claims {
            sub: subject.to_string(),
            iat: issued_at,
            exp: expires_at,
            extra,
        };

        debug!(ttl_seconds, "Issuing token");

        encode(&Header::new(Algorithm::HS256), &claims, &self.encoding_key).map_err(|e| {
            warn!(error = %e, "Failed to sign token");
            TokenError::TokenGenerationFailed.into()
        })
    }

    /// Verify the signature and parse the claims
    ///
    /// Expired tokens decode successfully.
    pub fn decode(&self, token: &str) -> DomainResult<Claims> {
        decode::<Claims>(token, &self.decoding_key, &self.validation)
            .map(|data| data.claims)
            .map_err(|e| {
                let error = match e.kind() {
                    ErrorKind::InvalidSignature => TokenError::InvalidSignature,
                    _ => TokenError::MalformedToken,
                };
                DomainError::Token(error)
            })
    }

    /// Parse the claims without checking the signature
    ///
    /// Only used where the caller needs the expiry of a token it is about to
    /// deny, never to grant access.
    pub fn decode_unverified(&self, token: &str) -> DomainResult<Claims> {
        decode::<Claims>(token, &self.decoding_key, &self.unverified_validation)
            .map(|data| data.claims)
            .map_err(|_| TokenError::MalformedToken.into())
    }

    pub fn extract_subject<'a>(&self, claims: &'a Claims) -> &'a str {
        &claims.sub
    }

    pub fn extract_expiry(&self, claims: &Claims) -> DateTime<Utc> {
        claims.expires_at()
    }

    pub fn is_expired(&self, claims: &Claims, now: DateTime<Utc>) -> bool {
        claims.is_expired_at(now)
    }

    /// True when the token verifies, names `expected_subject` and has not
    /// expired at `now`. Every failure reads as `false`.
    pub fn is_valid_for(&self, token: &str, expected_subject: &str, now: DateTime<Utc>) -> bool {
        match self.decode(token) {
            Ok(claims) => {
                if claims.sub != expected_subject {
                    debug!("Token subject does not match");
                    return false;
                }
                if claims.is_expired_at(now) {
                    debug!(expired_at = %claims.expires_at(), "Token expired");
                    return false;
                }
                true
            }
            Err(e) => {
                debug!(error = %e, "Token failed verification");
                false
            }
        }
    }
}
