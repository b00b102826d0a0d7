//! Response value objects returned by the authentication service.

use serde::{Deserialize, Serialize};

/// Message returned when logout is called without a usable token
pub const LOGOUT_INVALID_TOKEN: &str = "Invalid token";

/// Message returned when the token was revoked
pub const LOGOUT_SUCCESSFUL: &str = "Logout successful";

/// Message returned when the revocation could not be recorded
pub const LOGOUT_FAILED: &str = "Logout failed";

/// Authentication response carrying a freshly issued token
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct AuthResponse {
    /// Signed bearer token
    pub token: String,
}

impl AuthResponse {
    pub fn new(token: String) -> Self {
        Self { token }
    }
}

/// Outcome of a logout call
///
/// Logout never fails with an error. The `success` flag tells the caller
/// whether the token is now revoked.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct LogoutResponse {
    pub message: String,
    pub success: bool,
}

impl LogoutResponse {
    pub fn success() -> Self {
        Self {
            message: LOGOUT_SUCCESSFUL.to_string(),
            success: true,
        }
    }

    pub fn failure(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            success: false,
        }
    }
}
