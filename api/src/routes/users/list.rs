use actix_web::{web, HttpResponse};

use gk_core::domain::value_objects::page::PageRequest;
use gk_core::repositories::{RevocationStore, UserRepository};

use crate::dto::auth::UserProfileResponse;
use crate::dto::users::ListUsersQuery;
use crate::handlers::error::handle_domain_error;
use crate::routes::AppState;

/// Handler for GET /api/v1/users
///
/// Pages through the directory. Unknown sort fields, unknown directions
/// and out-of-range sizes are rejected with 400.
pub async fn list_users<U, R>(
    state: web::Data<AppState<U, R>>,
    query: web::Query<ListUsersQuery>,
) -> HttpResponse
where
    U: UserRepository + 'static,
    R: RevocationStore + 'static,
{
    let request = match PageRequest::try_from(query.into_inner()) {
        Ok(request) => request,
        Err(error) => return handle_domain_error(&error),
    };

    match state.user_service.list(&request).await {
        Ok(page) => HttpResponse::Ok().json(page.map(|user| UserProfileResponse::from(&user))),
        Err(error) => handle_domain_error(&error),
    }
}
