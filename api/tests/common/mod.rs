//! Shared setup for HTTP integration tests

#![allow(dead_code)]

use std::sync::Arc;

use actix_web::web;
use base64::{engine::general_purpose::STANDARD, Engine as _};
use chrono::{DateTime, Duration};

use gk_api::app::AppState;
use gk_api::health::HealthCheck;
use gk_core::repositories::{MockRevocationStore, MockUserRepository};
use gk_core::services::{
    AuthService, AuthServiceConfig, BcryptPasswordHasher, ManualClock, PasswordAuthenticator,
    PasswordHasher, TokenCodec, TokenCodecConfig, UserService,
};

pub const TOKEN_TTL_SECONDS: i64 = 3600;

pub type TestState = AppState<MockUserRepository, MockRevocationStore>;

pub struct TestContext {
    pub state: web::Data<TestState>,
    pub users: Arc<MockUserRepository>,
    pub store: Arc<MockRevocationStore>,
    pub codec: Arc<TokenCodec>,
    pub clock: ManualClock,
}

/// In-memory app state with a settable clock and a cheap bcrypt cost
pub fn test_context() -> TestContext {
    test_context_with_checks(Vec::new())
}

/// Same as `test_context`, with readiness checks registered
pub fn test_context_with_checks(checks: Vec<Arc<dyn HealthCheck>>) -> TestContext {
    let users = Arc::new(MockUserRepository::new());
    let store = Arc::new(MockRevocationStore::new());
    let clock = ManualClock::new(DateTime::from_timestamp(1_700_000_000, 0).unwrap());

    let config = TokenCodecConfig::new(
        STANDARD.encode([42u8; 32]),
        Duration::seconds(TOKEN_TTL_SECONDS),
    );
    let codec = Arc::new(TokenCodec::new(config, Arc::new(clock.clone())).unwrap());

    let hasher: Arc<dyn PasswordHasher> = Arc::new(BcryptPasswordHasher::new(4));
    let authenticator =
        Arc::new(PasswordAuthenticator::new(Arc::clone(&users), Arc::clone(&hasher)).unwrap());

    let user_service = Arc::new(UserService::new(Arc::clone(&users)));
    let auth_service = Arc::new(AuthService::new(
        Arc::clone(&users),
        Arc::clone(&store),
        Arc::clone(&codec),
        hasher,
        authenticator,
        AuthServiceConfig::default(),
    ));

    TestContext {
        state: web::Data::new(
            checks
                .into_iter()
                .fold(AppState::new(auth_service, user_service), AppState::with_health_check),
        ),
        users,
        store,
        codec,
        clock,
    }
}
