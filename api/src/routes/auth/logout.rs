use actix_web::{web, HttpResponse};

use gk_core::repositories::{RevocationStore, UserRepository};

use crate::dto::auth::LogoutRequest;
use crate::routes::AppState;

/// Handler for POST /api/v1/auth/logout
///
/// Revokes the token given in the body. No session is required, so an
/// already expired token can still be logged out.
///
/// # Request Body
///
/// ```json
/// {
///     "token": "eyJhbGciOiJIUzI1NiJ9..."
/// }
/// ```
///
/// # Response
///
/// Always 200 OK. The `success` flag reports the outcome:
/// ```json
/// {
///     "message": "Logout successful",
///     "success": true
/// }
/// ```
///
/// A missing, blank or unreadable token gives `"Invalid token"`, and a
/// storage failure gives `"Logout failed"`, both with `success: false`.
pub async fn logout<U, R>(
    state: web::Data<AppState<U, R>>,
    request: Option<web::Json<LogoutRequest>>,
) -> HttpResponse
where
    U: UserRepository + 'static,
    R: RevocationStore + 'static,
{
    let token = request.and_then(|body| body.into_inner().token);

    let response = state.auth_service.logout(token.as_deref()).await;
    HttpResponse::Ok().json(response)
}
