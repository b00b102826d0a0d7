//! Liveness and readiness endpoints

use actix_web::{web, HttpResponse};
use serde_json::{json, Map};
use tracing::warn;

use gk_core::repositories::{RevocationStore, UserRepository};

use crate::routes::AppState;

/// Handler for GET /health
///
/// Answers as long as the process is serving requests.
pub async fn health_check() -> HttpResponse {
    HttpResponse::Ok().json(json!({
        "status": "healthy",
        "service": "gatekeeper-api",
        "version": env!("CARGO_PKG_VERSION"),
        "timestamp": chrono::Utc::now().to_rfc3339(),
    }))
}

/// Handler for GET /health/ready
///
/// Runs every registered check. Any failure turns the answer into 503 so a
/// load balancer stops routing here.
pub async fn readiness<U, R>(state: web::Data<AppState<U, R>>) -> HttpResponse
where
    U: UserRepository + 'static,
    R: RevocationStore + 'static,
{
    let mut checks = Map::new();
    let mut ready = true;

    for check in &state.health_checks {
        let result = match check.check().await {
            Ok(details) => json!({ "status": "up", "details": details }),
            Err(e) => {
                warn!(check = check.name(), error = %e, "Readiness check failed");
                ready = false;
                json!({ "status": "down", "error": e.to_string() })
            }
        };
        checks.insert(check.name().to_string(), result);
    }

    let body = json!({
        "status": if ready { "ready" } else { "not_ready" },
        "checks": checks,
    });

    if ready {
        HttpResponse::Ok().json(body)
    } else {
        HttpResponse::ServiceUnavailable().json(body)
    }
}
