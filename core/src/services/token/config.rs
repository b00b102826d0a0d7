//! Configuration for the token codec

use chrono::Duration;
use gk_shared::JwtConfig;

/// Minimum decoded length of the HMAC secret (256 bits)
pub const MIN_SECRET_BYTES: usize = 32;

/// Configuration for the token codec
#[derive(Debug, Clone)]
pub struct TokenCodecConfig {
    /// Base64-encoded HMAC secret
    pub secret: String,
    /// Default time-to-live for issued tokens
    pub ttl: Duration,
}

impl TokenCodecConfig {
    pub fn new(secret: impl Into<String>, ttl: Duration) -> Self {
        Self {
            secret: secret.into(),
            ttl,
        }
    }
}

impl From<&JwtConfig> for TokenCodecConfig {
    fn from(config: &JwtConfig) -> Self {
        Self::new(config.secret.clone(), Duration::seconds(config.expiration_seconds))
    }
}
