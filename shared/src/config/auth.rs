//! Authentication configuration: token signing, revocation purge, passwords

use serde::{Deserialize, Serialize};

use super::{parse_value, parse_var, required_var, ConfigError};

/// Default interval between revocation purges (one hour)
pub const DEFAULT_PURGE_INTERVAL_SECONDS: u64 = 3600;

/// Default bcrypt work factor
pub const DEFAULT_BCRYPT_COST: u32 = 12;

/// JWT signing configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct JwtConfig {
    /// Base64-encoded HMAC secret
    pub secret: String,

    /// Token time-to-live in seconds
    pub expiration_seconds: i64,
}

impl JwtConfig {
    /// Create a new JWT configuration
    pub fn new(secret: impl Into<String>, expiration_seconds: i64) -> Self {
        Self {
            secret: secret.into(),
            expiration_seconds,
        }
    }

    /// Create from `JWT_SECRET` and `JWT_EXPIRATION_SECONDS`, both required
    pub fn from_env() -> Result<Self, ConfigError> {
        let secret = required_var("JWT_SECRET")?;
        let raw_expiration = required_var("JWT_EXPIRATION_SECONDS")?;
        let expiration_seconds: i64 = parse_value("JWT_EXPIRATION_SECONDS", &raw_expiration)?;

        if expiration_seconds <= 0 {
            return Err(ConfigError::Invalid {
                key: "JWT_EXPIRATION_SECONDS".to_string(),
                message: "must be greater than zero".to_string(),
            });
        }

        Ok(Self {
            secret,
            expiration_seconds,
        })
    }
}

/// Revocation purge schedule
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct PurgeConfig {
    /// Seconds between purge cycles
    pub interval_seconds: u64,

    /// Whether the background purge runs at all
    pub enabled: bool,
}

impl Default for PurgeConfig {
    fn default() -> Self {
        Self {
            interval_seconds: DEFAULT_PURGE_INTERVAL_SECONDS,
            enabled: true,
        }
    }
}

impl PurgeConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        let interval_seconds =
            parse_var("TOKEN_PURGE_INTERVAL_SECONDS", DEFAULT_PURGE_INTERVAL_SECONDS)?;
        if interval_seconds == 0 {
            return Err(ConfigError::Invalid {
                key: "TOKEN_PURGE_INTERVAL_SECONDS".to_string(),
                message: "must be greater than zero".to_string(),
            });
        }

        Ok(Self {
            interval_seconds,
            enabled: parse_var("TOKEN_PURGE_ENABLED", true)?,
        })
    }
}

/// Password hashing configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct PasswordConfig {
    /// bcrypt work factor (4..=31)
    pub bcrypt_cost: u32,
}

impl Default for PasswordConfig {
    fn default() -> Self {
        Self {
            bcrypt_cost: DEFAULT_BCRYPT_COST,
        }
    }
}

impl PasswordConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        let bcrypt_cost = parse_var("BCRYPT_COST", DEFAULT_BCRYPT_COST)?;
        if !(4..=31).contains(&bcrypt_cost) {
            return Err(ConfigError::Invalid {
                key: "BCRYPT_COST".to_string(),
                message: format!("{} is outside 4..=31", bcrypt_cost),
            });
        }
        Ok(Self { bcrypt_cost })
    }
}

/// Complete authentication configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AuthConfig {
    /// JWT configuration
    pub jwt: JwtConfig,

    /// Revocation purge configuration
    #[serde(default)]
    pub purge: PurgeConfig,

    /// Password hashing configuration
    #[serde(default)]
    pub password: PasswordConfig,
}

impl AuthConfig {
    /// Create from environment variables
    pub fn from_env() -> Result<Self, ConfigError> {
        Ok(Self {
            jwt: JwtConfig::from_env()?,
            purge: PurgeConfig::from_env()?,
            password: PasswordConfig::from_env()?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_purge_config_default() {
        let config = PurgeConfig::default();
        assert_eq!(config.interval_seconds, 3600);
        assert!(config.enabled);
    }

    #[test]
    fn test_password_config_default() {
        assert_eq!(PasswordConfig::default().bcrypt_cost, 12);
    }

    #[test]
    fn test_jwt_config_new() {
        let config = JwtConfig::new("c2VjcmV0", 60);
        assert_eq!(config.secret, "c2VjcmV0");
        assert_eq!(config.expiration_seconds, 60);
    }
}
