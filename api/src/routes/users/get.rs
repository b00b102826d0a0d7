use actix_web::{web, HttpResponse};
use uuid::Uuid;

use gk_core::repositories::{RevocationStore, UserRepository};

use crate::dto::auth::UserProfileResponse;
use crate::handlers::error::handle_domain_error;
use crate::routes::AppState;

/// Handler for GET /api/v1/users/{id}
pub async fn get_user<U, R>(
    state: web::Data<AppState<U, R>>,
    id: web::Path<Uuid>,
) -> HttpResponse
where
    U: UserRepository + 'static,
    R: RevocationStore + 'static,
{
    match state.user_service.get_by_id(id.into_inner()).await {
        Ok(user) => HttpResponse::Ok().json(UserProfileResponse::from(&user)),
        Err(error) => handle_domain_error(&error),
    }
}
