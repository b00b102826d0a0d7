use actix_web::{web, HttpResponse};
use tracing::warn;
use validator::Validate;

use gk_core::repositories::{RevocationStore, UserRepository};

use crate::dto::auth::{LoginRequest, TokenResponse};
use crate::handlers::error::{handle_domain_error, handle_validation_errors};
use crate::routes::AppState;

/// Handler for POST /api/v1/auth/login
///
/// Exchanges email and password for a token. Unknown accounts and wrong
/// passwords get the same 401 response.
pub async fn login<U, R>(
    state: web::Data<AppState<U, R>>,
    request: web::Json<LoginRequest>,
) -> HttpResponse
where
    U: UserRepository + 'static,
    R: RevocationStore + 'static,
{
    if let Err(errors) = request.validate() {
        warn!("Login request failed validation");
        return handle_validation_errors(&errors);
    }

    match state
        .auth_service
        .authenticate(&request.email, &request.password)
        .await
    {
        Ok(response) => HttpResponse::Ok().json(TokenResponse {
            token: response.token,
        }),
        Err(error) => handle_domain_error(&error),
    }
}
