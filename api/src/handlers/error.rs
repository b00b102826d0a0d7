//! Translation of domain errors into HTTP responses

use actix_web::{http::StatusCode, HttpResponse, ResponseError};
use gk_core::errors::{AuthError, DomainError};
use gk_shared::{error_codes, ErrorResponse};
use validator::ValidationErrors;

/// Message used for every server-side failure
pub const GENERIC_ERROR_MESSAGE: &str = "An unexpected error occurred. Please try again later.";

/// Domain error carried through actix's error path
///
/// Lets middleware and extractors return `Err(..)` and still produce the
/// JSON error body.
#[derive(Debug, thiserror::Error)]
#[error(transparent)]
pub struct ApiError(#[from] pub DomainError);

impl ResponseError for ApiError {
    fn status_code(&self) -> StatusCode {
        status_for(&self.0)
    }

    fn error_response(&self) -> HttpResponse {
        handle_domain_error(&self.0)
    }
}

fn status_for(error: &DomainError) -> StatusCode {
    match error {
        DomainError::Auth(AuthError::InvalidCredentials) => StatusCode::UNAUTHORIZED,
        DomainError::Auth(AuthError::DuplicateSubject { .. }) => StatusCode::CONFLICT,
        DomainError::Token(_) | DomainError::Unauthorized => StatusCode::UNAUTHORIZED,
        DomainError::NotFound { .. } => StatusCode::NOT_FOUND,
        DomainError::Validation { .. } => StatusCode::BAD_REQUEST,
        DomainError::Internal { .. } | DomainError::Storage { .. } => {
            StatusCode::INTERNAL_SERVER_ERROR
        }
    }
}

/// Handle domain errors and convert them to appropriate HTTP responses
pub fn handle_domain_error(error: &DomainError) -> HttpResponse {
    let status = status_for(error);

    let body = match error {
        DomainError::Auth(auth_error @ AuthError::InvalidCredentials) => {
            ErrorResponse::new(error_codes::INVALID_CREDENTIALS, auth_error.to_string())
        }
        DomainError::Auth(auth_error @ AuthError::DuplicateSubject { .. }) => {
            ErrorResponse::new(error_codes::CONFLICT, auth_error.to_string())
        }
        DomainError::Token(_) => {
            ErrorResponse::new(error_codes::TOKEN_INVALID, "Invalid or expired token")
        }
        DomainError::Unauthorized => {
            ErrorResponse::new(error_codes::UNAUTHORIZED, "Authentication required")
        }
        DomainError::NotFound { resource } => {
            ErrorResponse::new(error_codes::NOT_FOUND, format!("{} not found", resource))
        }
        DomainError::Validation { message } => {
            ErrorResponse::new(error_codes::VALIDATION_ERROR, message.clone())
        }
        DomainError::Internal { .. } | DomainError::Storage { .. } => {
            tracing::error!(error = %error, "Request failed with server error");
            ErrorResponse::new(error_codes::INTERNAL_ERROR, GENERIC_ERROR_MESSAGE)
        }
    };

    HttpResponse::build(status).json(body)
}

/// 400 response listing the failing fields
pub fn handle_validation_errors(errors: &ValidationErrors) -> HttpResponse {
    let mut body = ErrorResponse::new(error_codes::VALIDATION_ERROR, "Request validation failed");

    for (field, field_errors) in errors.field_errors() {
        let messages: Vec<String> = field_errors
            .iter()
            .map(|e| {
                e.message
                    .as_ref()
                    .map(|m| m.to_string())
                    .unwrap_or_else(|| e.code.to_string())
            })
            .collect();
        body = body.add_detail(field, messages);
    }

    HttpResponse::BadRequest().json(body)
}
