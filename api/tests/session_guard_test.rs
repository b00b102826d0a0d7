//! Integration tests for endpoints behind the session guard

mod common;

use actix_web::{http::header, http::StatusCode, test};
use chrono::Duration;
use gk_api::app::create_app;
use serde_json::{json, Value};

use common::{test_context, TOKEN_TTL_SECONDS};

fn register_request(email: &str) -> test::TestRequest {
    test::TestRequest::post()
        .uri("/api/v1/auth/register")
        .set_json(json!({ "email": email, "password": "secret1" }))
}

fn me_request(token: &str) -> test::TestRequest {
    test::TestRequest::get()
        .uri("/api/v1/users/me")
        .insert_header((header::AUTHORIZATION, format!("Bearer {}", token)))
}

/// Registers `$email` and yields its token
macro_rules! register {
    ($app:expr, $email:expr) => {{
        let body: Value =
            test::call_and_read_body_json(&$app, register_request($email).to_request()).await;
        body["token"].as_str().unwrap().to_string()
    }};
}

#[actix_web::test]
async fn test_me_with_active_session() {
    let ctx = test_context();
    let app = test::init_service(create_app(ctx.state.clone())).await;
    let token = register!(app, "a@x.io");

    let resp = test::call_service(&app, me_request(&token).to_request()).await;

    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["email"], "a@x.io");
    assert_eq!(body["roles"], json!(["ROLE_USER"]));
    assert!(body.get("password_hash").is_none());
}

#[actix_web::test]
async fn test_me_without_bearer_token() {
    let ctx = test_context();
    let app = test::init_service(create_app(ctx.state.clone())).await;

    let req = test::TestRequest::get().uri("/api/v1/users/me").to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["error"], "UNAUTHORIZED");
}

#[actix_web::test]
async fn test_me_after_logout_is_unauthorized() {
    let ctx = test_context();
    let app = test::init_service(create_app(ctx.state.clone())).await;
    let token = register!(app, "a@x.io");

    let req = test::TestRequest::post()
        .uri("/api/v1/auth/logout")
        .set_json(json!({ "token": token }))
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), StatusCode::OK);

    let resp = test::call_service(&app, me_request(&token).to_request()).await;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
}

#[actix_web::test]
async fn test_me_with_expired_token() {
    let ctx = test_context();
    let app = test::init_service(create_app(ctx.state.clone())).await;
    let token = register!(app, "a@x.io");

    ctx.clock.advance(Duration::seconds(TOKEN_TTL_SECONDS - 1));
    assert_eq!(
        test::call_service(&app, me_request(&token).to_request()).await.status(),
        StatusCode::OK
    );

    ctx.clock.advance(Duration::seconds(1));
    assert_eq!(
        test::call_service(&app, me_request(&token).to_request()).await.status(),
        StatusCode::UNAUTHORIZED
    );
}

#[actix_web::test]
async fn test_me_with_forged_or_unknown_subject_token() {
    let ctx = test_context();
    let app = test::init_service(create_app(ctx.state.clone())).await;
    register!(app, "a@x.io");

    let mut parts: Vec<String> = register!(app, "b@x.io")
        .split('.')
        .map(str::to_string)
        .collect();
    parts[2] = "AAAA".to_string();
    let forged = parts.join(".");
    assert_eq!(
        test::call_service(&app, me_request(&forged).to_request()).await.status(),
        StatusCode::UNAUTHORIZED
    );

    let ghost = ctx
        .codec
        .issue("ghost@x.io", Default::default(), Duration::seconds(60))
        .unwrap();
    assert_eq!(
        test::call_service(&app, me_request(&ghost).to_request()).await.status(),
        StatusCode::UNAUTHORIZED
    );
}

#[actix_web::test]
async fn test_me_when_store_unavailable_is_server_error() {
    let ctx = test_context();
    let app = test::init_service(create_app(ctx.state.clone())).await;
    let token = register!(app, "a@x.io");

    ctx.store.set_unavailable(true);

    let resp = test::call_service(&app, me_request(&token).to_request()).await;
    assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["error"], "INTERNAL_ERROR");
    assert_eq!(
        body["message"],
        "An unexpected error occurred. Please try again later."
    );
}
