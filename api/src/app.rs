//! Application factory
//!
//! Builds the Actix-web application around a shared `AppState`.

use std::sync::Arc;

use actix_web::{
    body::MessageBody,
    dev::{ServiceFactory, ServiceRequest, ServiceResponse},
    error::InternalError,
    web, App, HttpRequest, HttpResponse,
};
use tracing::debug;
use tracing_actix_web::TracingLogger;

use gk_core::repositories::{RevocationStore, UserRepository};
use gk_shared::{error_codes, ErrorResponse};

use crate::middleware::{create_cors, SessionAuthorizer, SessionGuard};
use crate::routes::auth::{login::login, logout::logout, register::register};
use crate::routes::health::{health_check, readiness};
use crate::routes::users::{get::get_user, list::list_users, me::me};

pub use crate::routes::AppState;

/// Create and configure the application with all routes and middleware
pub fn create_app<U, R>(
    app_state: web::Data<AppState<U, R>>,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse<impl MessageBody>,
        Error = actix_web::Error,
        InitError = (),
    >,
>
where
    U: UserRepository + 'static,
    R: RevocationStore + 'static,
{
    let cors = create_cors(&app_state.environment, &app_state.cors);
    let authorizer: Arc<dyn SessionAuthorizer> = app_state.auth_service.clone();

    App::new()
        .app_data(app_state)
        .app_data(web::JsonConfig::default().error_handler(reject_input))
        .app_data(web::PathConfig::default().error_handler(reject_input))
        .app_data(web::QueryConfig::default().error_handler(reject_input))
        // Registration order is inside-out: tracing sees every request first.
        .wrap(cors)
        .wrap(TracingLogger::default())
        .route("/health", web::get().to(health_check))
        .route("/health/ready", web::get().to(readiness::<U, R>))
        .service(
            web::scope("/api/v1")
                .service(
                    web::scope("/auth")
                        .route("/register", web::post().to(register::<U, R>))
                        .route("/login", web::post().to(login::<U, R>))
                        .route("/logout", web::post().to(logout::<U, R>)),
                )
                .service(
                    web::scope("/users")
                        .wrap(SessionGuard::new(authorizer))
                        .route("", web::get().to(list_users::<U, R>))
                        // Before `/{id}` so "me" is not read as an id.
                        .route("/me", web::get().to(me))
                        .route("/{id}", web::get().to(get_user::<U, R>)),
                ),
        )
        .default_service(web::route().to(not_found))
}

/// Unreadable bodies, paths and query strings get the validation error shape
fn reject_input<E>(err: E, req: &HttpRequest) -> actix_web::Error
where
    E: std::fmt::Debug + std::fmt::Display + 'static,
{
    debug!(path = %req.path(), error = %err, "Rejected request input");
    let body = ErrorResponse::new(error_codes::VALIDATION_ERROR, err.to_string());
    InternalError::from_response(err, HttpResponse::BadRequest().json(body)).into()
}

/// Default 404 handler
async fn not_found() -> HttpResponse {
    HttpResponse::NotFound().json(ErrorResponse::new(
        error_codes::NOT_FOUND,
        "The requested resource was not found",
    ))
}
