//! CORS middleware configuration.

use actix_cors::Cors;
use actix_web::http::{header, Method};
use gk_shared::{CorsConfig, Environment};
use tracing::{info, warn};

/// Build the CORS layer for the given environment
///
/// An empty origin list accepts any origin. Production logs a warning in
/// that case since browsers will then send credentials-free requests from
/// anywhere.
pub fn create_cors(environment: &Environment, config: &CorsConfig) -> Cors {
    let mut cors = Cors::default()
        .allowed_methods(vec![Method::GET, Method::POST, Method::OPTIONS])
        .allowed_headers(vec![
            header::AUTHORIZATION,
            header::ACCEPT,
            header::CONTENT_TYPE,
        ])
        .expose_headers(vec![header::HeaderName::from_static("x-request-id")])
        .max_age(config.max_age);

    if config.allowed_origins.is_empty() {
        if environment.is_production() {
            warn!("No CORS origins configured in production; accepting any origin");
        } else {
            info!(environment = %environment, "Configuring permissive CORS");
        }
        return cors.allow_any_origin();
    }

    for origin in &config.allowed_origins {
        info!(origin = %origin, "Adding allowed origin");
        cors = cors.allowed_origin(origin);
    }

    if environment.is_development() {
        cors = cors.supports_credentials();
    }

    cors
}
