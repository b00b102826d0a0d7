use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use gk_core::domain::entities::user::User;

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct RegisterRequest {
    #[validate(email(message = "must be a valid email address"))]
    pub email: String,

    #[validate(length(min = 1, max = 128, message = "must be between 1 and 128 characters"))]
    pub password: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct LoginRequest {
    #[validate(email(message = "must be a valid email address"))]
    pub email: String,

    #[validate(length(min = 1, max = 128, message = "must not be empty"))]
    pub password: String,
}

/// Blank or missing tokens are answered by the service, not rejected here.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LogoutRequest {
    #[serde(default)]
    pub token: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenResponse {
    pub token: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserProfileResponse {
    pub id: Uuid,
    pub email: String,
    pub roles: Vec<String>,
}

impl From<&User> for UserProfileResponse {
    fn from(user: &User) -> Self {
        Self {
            id: user.id,
            email: user.email.clone(),
            roles: user.authorities(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_register_request_validation() {
        let valid = RegisterRequest {
            email: "a@x.io".to_string(),
            password: "secret1".to_string(),
        };
        assert!(valid.validate().is_ok());

        let bad_email = RegisterRequest {
            email: "not-an-email".to_string(),
            password: "secret1".to_string(),
        };
        assert!(bad_email.validate().unwrap_err().field_errors().contains_key("email"));

        let short_password = RegisterRequest {
            email: "alice@example.com".to_string(),
            password: "pw123".to_string(),
        };
        assert!(short_password.validate().is_ok());

        let empty_password = RegisterRequest {
            email: "a@x.io".to_string(),
            password: String::new(),
        };
        assert!(empty_password
            .validate()
            .unwrap_err()
            .field_errors()
            .contains_key("password"));
    }

    #[test]
    fn test_logout_request_token_is_optional() {
        let request: LogoutRequest = serde_json::from_str("{}").unwrap();
        assert!(request.token.is_none());
    }
}
