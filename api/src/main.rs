use std::sync::Arc;

use actix_web::{web, HttpServer};
use anyhow::Context;
use tracing::info;
use tracing_subscriber::EnvFilter;

use gk_api::app::{create_app, AppState};
use gk_api::health::DatabaseHealthCheck;
use gk_core::services::{
    AuthService, AuthServiceConfig, Authenticator, BcryptPasswordHasher, Clock,
    PasswordAuthenticator, PasswordHasher, RevocationCleanupConfig, RevocationCleanupService,
    SystemClock, TokenCodec, TokenCodecConfig, UserService,
};
use gk_infra::database::{DatabasePool, MySqlRevocationStore, MySqlUserRepository};
use gk_shared::AppConfig;

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let config = AppConfig::from_env().context("Failed to load configuration")?;
    info!(environment = %config.environment, "Starting Gatekeeper API server");

    let pool = DatabasePool::new(config.database.clone())
        .await
        .context("Failed to connect to database")?;
    pool.run_migrations()
        .await
        .context("Failed to run database migrations")?;
    info!(pool = %pool.get_statistics(), "Database pool ready");

    let clock: Arc<dyn Clock> = Arc::new(SystemClock);
    let token_codec = Arc::new(
        TokenCodec::new(TokenCodecConfig::from(&config.auth.jwt), Arc::clone(&clock))
            .context("Failed to load token signing key")?,
    );

    let user_repository = Arc::new(MySqlUserRepository::new(pool.get_pool().clone()));
    let revocation_store = Arc::new(MySqlRevocationStore::new(pool.get_pool().clone()));

    let password_hasher: Arc<dyn PasswordHasher> =
        Arc::new(BcryptPasswordHasher::new(config.auth.password.bcrypt_cost));
    let authenticator: Arc<dyn Authenticator> = Arc::new(
        PasswordAuthenticator::new(Arc::clone(&user_repository), Arc::clone(&password_hasher))
            .context("Failed to initialize credential check")?,
    );

    let user_service = Arc::new(UserService::new(Arc::clone(&user_repository)));
    let auth_service = Arc::new(AuthService::new(
        user_repository,
        Arc::clone(&revocation_store),
        token_codec,
        password_hasher,
        authenticator,
        AuthServiceConfig::default(),
    ));

    let cleanup_service = Arc::new(RevocationCleanupService::new(
        revocation_store,
        clock,
        RevocationCleanupConfig::from(&config.auth.purge),
    ));
    let cleanup_handle = cleanup_service.start_background_task();

    let app_state = web::Data::new(
        AppState::new(auth_service, user_service)
            .with_cors(config.environment, config.server.cors.clone())
            .with_health_check(Arc::new(DatabaseHealthCheck::new(pool.clone()))),
    );

    let bind_address = config.server.bind_address();
    info!(address = %bind_address, "Server will bind");

    let mut server = HttpServer::new(move || create_app(app_state.clone()));
    if config.server.workers > 0 {
        server = server.workers(config.server.workers);
    }
    server.bind(&bind_address)?.run().await?;

    info!("Server stopped, shutting down background tasks");
    if let Some(handle) = cleanup_handle {
        handle.abort();
    }
    pool.close().await;

    Ok(())
}
