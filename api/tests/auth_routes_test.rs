//! Integration tests for the registration, login and logout endpoints

mod common;

use actix_web::{http::StatusCode, test};
use chrono::Duration;
use gk_api::app::create_app;
use gk_core::repositories::RevocationStore;
use serde_json::{json, Value};

use common::{test_context, TOKEN_TTL_SECONDS};

#[actix_web::test]
async fn test_register_returns_token_for_subject() {
    let ctx = test_context();
    let app = test::init_service(create_app(ctx.state.clone())).await;

    let req = test::TestRequest::post()
        .uri("/api/v1/auth/register")
        .set_json(json!({ "email": "a@x.io", "password": "secret1" }))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = test::read_body_json(resp).await;
    let token = body["token"].as_str().unwrap();

    let claims = ctx.codec.decode(token).unwrap();
    assert_eq!(claims.sub, "a@x.io");
    assert_eq!(claims.exp - claims.iat, TOKEN_TTL_SECONDS);
    assert_eq!(ctx.users.count().await, 1);
}

#[actix_web::test]
async fn test_register_duplicate_email_conflicts() {
    let ctx = test_context();
    let app = test::init_service(create_app(ctx.state.clone())).await;

    for expected in [StatusCode::OK, StatusCode::CONFLICT] {
        let req = test::TestRequest::post()
            .uri("/api/v1/auth/register")
            .set_json(json!({ "email": "a@x.io", "password": "secret1" }))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), expected);

        if expected == StatusCode::CONFLICT {
            let body: Value = test::read_body_json(resp).await;
            assert_eq!(body["error"], "CONFLICT");
        }
    }

    assert_eq!(ctx.users.count().await, 1);
}

#[actix_web::test]
async fn test_register_short_password_then_duplicate() {
    let ctx = test_context();
    let app = test::init_service(create_app(ctx.state.clone())).await;

    let req = test::TestRequest::post()
        .uri("/api/v1/auth/register")
        .set_json(json!({ "email": "alice@example.com", "password": "pw123" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = test::read_body_json(resp).await;
    let claims = ctx.codec.decode(body["token"].as_str().unwrap()).unwrap();
    assert_eq!(claims.sub, "alice@example.com");

    let req = test::TestRequest::post()
        .uri("/api/v1/auth/register")
        .set_json(json!({ "email": "alice@example.com", "password": "pw123" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::CONFLICT);

    assert_eq!(ctx.users.count().await, 1);
}

#[actix_web::test]
async fn test_register_rejects_invalid_body() {
    let ctx = test_context();
    let app = test::init_service(create_app(ctx.state.clone())).await;

    let req = test::TestRequest::post()
        .uri("/api/v1/auth/register")
        .set_json(json!({ "email": "not-an-email", "password": "" }))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["error"], "VALIDATION_ERROR");
    assert!(body["details"]["email"].is_array());
    assert!(body["details"]["password"].is_array());
}

#[actix_web::test]
async fn test_malformed_json_is_bad_request() {
    let ctx = test_context();
    let app = test::init_service(create_app(ctx.state.clone())).await;

    let req = test::TestRequest::post()
        .uri("/api/v1/auth/login")
        .insert_header(("content-type", "application/json"))
        .set_payload("{not json")
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["error"], "VALIDATION_ERROR");
}

#[actix_web::test]
async fn test_login_after_register() {
    let ctx = test_context();
    let app = test::init_service(create_app(ctx.state.clone())).await;

    let req = test::TestRequest::post()
        .uri("/api/v1/auth/register")
        .set_json(json!({ "email": "a@x.io", "password": "secret1" }))
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), StatusCode::OK);

    let req = test::TestRequest::post()
        .uri("/api/v1/auth/login")
        .set_json(json!({ "email": "a@x.io", "password": "secret1" }))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = test::read_body_json(resp).await;
    let claims = ctx.codec.decode(body["token"].as_str().unwrap()).unwrap();
    assert_eq!(claims.sub, "a@x.io");
}

#[actix_web::test]
async fn test_login_failures_are_indistinguishable() {
    let ctx = test_context();
    let app = test::init_service(create_app(ctx.state.clone())).await;

    let req = test::TestRequest::post()
        .uri("/api/v1/auth/register")
        .set_json(json!({ "email": "a@x.io", "password": "secret1" }))
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), StatusCode::OK);

    let mut bodies = Vec::new();
    for (email, password) in [("a@x.io", "wrong-pw"), ("nobody@x.io", "secret1")] {
        let req = test::TestRequest::post()
            .uri("/api/v1/auth/login")
            .set_json(json!({ "email": email, "password": password }))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);

        let body: Value = test::read_body_json(resp).await;
        bodies.push((body["error"].clone(), body["message"].clone()));
    }

    assert_eq!(bodies[0], bodies[1]);
    assert_eq!(bodies[0].0, "INVALID_CREDENTIALS");
}

#[actix_web::test]
async fn test_logout_revokes_token() {
    let ctx = test_context();
    let app = test::init_service(create_app(ctx.state.clone())).await;

    let req = test::TestRequest::post()
        .uri("/api/v1/auth/register")
        .set_json(json!({ "email": "a@x.io", "password": "secret1" }))
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    let token = body["token"].as_str().unwrap().to_string();

    let req = test::TestRequest::post()
        .uri("/api/v1/auth/logout")
        .set_json(json!({ "token": token }))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["message"], "Logout successful");
    assert_eq!(body["success"], true);
    assert!(ctx.store.is_revoked(&token).await.unwrap());
}

#[actix_web::test]
async fn test_logout_without_usable_token_is_ok() {
    let ctx = test_context();
    let app = test::init_service(create_app(ctx.state.clone())).await;

    let requests = [
        test::TestRequest::post()
            .uri("/api/v1/auth/logout")
            .set_json(json!({}))
            .to_request(),
        test::TestRequest::post()
            .uri("/api/v1/auth/logout")
            .set_json(json!({ "token": "   " }))
            .to_request(),
        test::TestRequest::post()
            .uri("/api/v1/auth/logout")
            .set_json(json!({ "token": "garbage" }))
            .to_request(),
        test::TestRequest::post().uri("/api/v1/auth/logout").to_request(),
    ];

    for req in requests {
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::OK);

        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body["message"], "Invalid token");
        assert_eq!(body["success"], false);
    }

    assert_eq!(ctx.store.count().await.unwrap(), 0);
}

#[actix_web::test]
async fn test_logout_store_failure_reports_failed() {
    let ctx = test_context();
    let app = test::init_service(create_app(ctx.state.clone())).await;
    let token = ctx
        .codec
        .issue("a@x.io", Default::default(), Duration::seconds(60))
        .unwrap();

    ctx.store.set_unavailable(true);

    let req = test::TestRequest::post()
        .uri("/api/v1/auth/logout")
        .set_json(json!({ "token": token }))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["message"], "Logout failed");
    assert_eq!(body["success"], false);
}

#[actix_web::test]
async fn test_unknown_route_is_json_404() {
    let ctx = test_context();
    let app = test::init_service(create_app(ctx.state.clone())).await;

    let req = test::TestRequest::get().uri("/api/v1/nope").to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["error"], "NOT_FOUND");
}
