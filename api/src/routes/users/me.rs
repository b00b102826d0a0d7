use actix_web::HttpResponse;

use crate::dto::auth::UserProfileResponse;
use crate::middleware::auth::AuthContext;

/// Handler for GET /api/v1/users/me
///
/// Returns the account behind the bearer token. Mounted behind
/// `SessionGuard`, which answers 401 for inactive sessions.
pub async fn me(auth: AuthContext) -> HttpResponse {
    HttpResponse::Ok().json(UserProfileResponse::from(&auth.user))
}
