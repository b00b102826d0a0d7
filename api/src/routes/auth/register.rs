use actix_web::{web, HttpResponse};
use tracing::warn;
use validator::Validate;

use gk_core::repositories::{RevocationStore, UserRepository};

use crate::dto::auth::{RegisterRequest, TokenResponse};
use crate::handlers::error::{handle_domain_error, handle_validation_errors};
use crate::routes::AppState;

/// Handler for POST /api/v1/auth/register
///
/// Creates an account and returns its first token.
///
/// # Request Body
///
/// ```json
/// {
///     "email": "user@example.com",
///     "password": "secret1"
/// }
/// ```
///
/// # Response
///
/// ## Success (200 OK)
/// ```json
/// {
///     "token": "eyJhbGciOiJIUzI1NiJ9..."
/// }
/// ```
///
/// ## Errors
/// - 400 Bad Request: Invalid email or password length
/// - 409 Conflict: Email already registered
/// - 500 Internal Server Error: Storage failure
pub async fn register<U, R>(
    state: web::Data<AppState<U, R>>,
    request: web::Json<RegisterRequest>,
) -> HttpResponse
where
    U: UserRepository + 'static,
    R: RevocationStore + 'static,
{
    if let Err(errors) = request.validate() {
        warn!("Registration request failed validation");
        return handle_validation_errors(&errors);
    }

    match state
        .auth_service
        .register(&request.email, &request.password)
        .await
    {
        Ok(response) => HttpResponse::Ok().json(TokenResponse {
            token: response.token,
        }),
        Err(error) => handle_domain_error(&error),
    }
}
