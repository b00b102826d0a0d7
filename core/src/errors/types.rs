//! Error types for authentication and token handling.

use thiserror::Error;

/// Authentication-related errors
///
/// Credential failures carry a single fixed message so callers cannot tell
/// an unknown account from a wrong password.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AuthError {
    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("Email {email} is already registered")]
    DuplicateSubject { email: String },
}

/// Token-related errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TokenError {
    #[error("Malformed token")]
    MalformedToken,

    #[error("Invalid token signature")]
    InvalidSignature,

    #[error("Signing key could not be loaded: {message}")]
    KeyLoadError { message: String },

    #[error("Token generation failed")]
    TokenGenerationFailed,
}
