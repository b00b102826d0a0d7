//! Token entities for JWT-based authentication.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Claim names owned by the codec; callers cannot override them.
pub const RESERVED_CLAIMS: [&str; 3] = ["sub", "iat", "exp"];

/// Claim carrying the subject's role authorities
pub const ROLES_CLAIM: &str = "roles";

/// Claims structure for JWT payload
///
/// Only `sub`, `iat` and `exp` are fixed. Everything else supplied at issue
/// time lands in `extra` and is carried through decode unchanged.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Claims {
    /// Subject (the account's email)
    pub sub: String,

    /// Issued at, seconds since the epoch
    pub iat: i64,

    /// Expiration, seconds since the epoch
    pub exp: i64,

    /// Caller-supplied claims
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Claims {
    pub fn new(subject: impl Into<String>, issued_at: i64, expires_at: i64) -> Self {
        Self {
            sub: subject.into(),
            iat: issued_at,
            exp: expires_at,
            extra: Map::new(),
        }
    }

    pub fn issued_at(&self) -> DateTime<Utc> {
        timestamp_to_datetime(self.iat)
    }

    pub fn expires_at(&self) -> DateTime<Utc> {
        timestamp_to_datetime(self.exp)
    }

    /// A token is expired from the second named by `exp` onwards.
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        now >= self.expires_at()
    }

    /// Role authorities embedded at issue time, empty when absent.
    pub fn roles(&self) -> Vec<String> {
        self.extra
            .get(ROLES_CLAIM)
            .and_then(Value::as_array)
            .map(|roles| {
                roles
                    .iter()
                    .filter_map(|role| role.as_str().map(str::to_string))
                    .collect()
            })
            .unwrap_or_default()
    }
}

// Out-of-range timestamps clamp to the representable bounds.
fn timestamp_to_datetime(seconds: i64) -> DateTime<Utc> {
    DateTime::from_timestamp(seconds, 0).unwrap_or(if seconds > 0 {
        DateTime::<Utc>::MAX_UTC
    } else {
        DateTime::<Utc>::MIN_UTC
    })
}

/// A revoked token held until its natural expiry passes
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RevocationEntry {
    /// The exact token string as presented at logout
    pub token: String,

    /// When the token would have expired on its own
    pub expires_at: DateTime<Utc>,

    /// When the revocation was recorded
    pub created_at: DateTime<Utc>,
}

impl RevocationEntry {
    pub fn new(token: impl Into<String>, expires_at: DateTime<Utc>, created_at: DateTime<Utc>) -> Self {
        Self {
            token: token.into(),
            expires_at,
            created_at,
        }
    }

    /// Entries become purgeable strictly after their expiry instant.
    pub fn is_purgeable(&self, now: DateTime<Utc>) -> bool {
        self.expires_at < now
    }
}
