//! Bearer-token session middleware for protected endpoints.
//!
//! The guard reads the `Authorization: Bearer <token>` header, asks the
//! authentication service whether the session is active and injects the
//! resolved account into the request extensions. Revoked, expired and
//! unverifiable tokens are all answered with 401.

use actix_web::{
    body::EitherBody,
    dev::{Service, ServiceRequest, ServiceResponse, Transform},
    http::header::AUTHORIZATION,
    Error, FromRequest, HttpMessage, HttpRequest,
};
use async_trait::async_trait;
use futures_util::future::LocalBoxFuture;
use gk_core::{
    domain::entities::user::User,
    errors::{DomainError, DomainResult},
    repositories::{RevocationStore, UserRepository},
    services::auth::AuthService,
};
use std::{
    future::{ready, Ready},
    rc::Rc,
    sync::Arc,
    task::{Context, Poll},
};
use tracing::debug;

use crate::handlers::error::{handle_domain_error, ApiError};

/// Resolves a bearer token to the account it was issued for
#[async_trait]
pub trait SessionAuthorizer: Send + Sync {
    /// `Ok(None)` when the session is not active
    async fn authorize(&self, token: &str) -> DomainResult<Option<User>>;
}

#[async_trait]
impl<U, R> SessionAuthorizer for AuthService<U, R>
where
    U: UserRepository + 'static,
    R: RevocationStore + 'static,
{
    async fn authorize(&self, token: &str) -> DomainResult<Option<User>> {
        AuthService::authorize(self, token).await
    }
}

/// Authenticated account injected into requests
#[derive(Debug, Clone)]
pub struct AuthContext {
    pub user: User,
}

impl AuthContext {
    pub fn new(user: User) -> Self {
        Self { user }
    }
}

/// Session guard middleware factory
#[derive(Clone)]
pub struct SessionGuard {
    authorizer: Arc<dyn SessionAuthorizer>,
}

impl SessionGuard {
    pub fn new(authorizer: Arc<dyn SessionAuthorizer>) -> Self {
        Self { authorizer }
    }
}

impl<S, B> Transform<S, ServiceRequest> for SessionGuard
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type InitError = ();
    type Transform = SessionGuardMiddleware<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(SessionGuardMiddleware {
            service: Rc::new(service),
            authorizer: Arc::clone(&self.authorizer),
        }))
    }
}

pub struct SessionGuardMiddleware<S> {
    service: Rc<S>,
    authorizer: Arc<dyn SessionAuthorizer>,
}

impl<S, B> Service<ServiceRequest> for SessionGuardMiddleware<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    fn poll_ready(&self, cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.service.poll_ready(cx)
    }

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let service = Rc::clone(&self.service);
        let authorizer = Arc::clone(&self.authorizer);

        Box::pin(async move {
            let Some(token) = extract_bearer_token(&req) else {
                debug!(path = %req.path(), "Missing bearer token");
                return Ok(reject(req, DomainError::Unauthorized));
            };

            let user = match authorizer.authorize(&token).await {
                Ok(Some(user)) => user,
                Ok(None) => {
                    debug!(path = %req.path(), "Rejected inactive session");
                    return Ok(reject(req, DomainError::Unauthorized));
                }
                // Store outages surface as 500, never as a silent 401.
                Err(e) => return Ok(reject(req, e)),
            };

            req.extensions_mut().insert(AuthContext::new(user));

            service
                .call(req)
                .await
                .map(ServiceResponse::map_into_left_body)
        })
    }
}

/// Short-circuit with the JSON error body
fn reject<B>(req: ServiceRequest, error: DomainError) -> ServiceResponse<EitherBody<B>> {
    req.into_response(handle_domain_error(&error))
        .map_into_right_body()
}

/// Extract the bearer token from the Authorization header
fn extract_bearer_token(req: &ServiceRequest) -> Option<String> {
    req.headers()
        .get(AUTHORIZATION)?
        .to_str()
        .ok()?
        .strip_prefix("Bearer ")
        .map(str::trim)
        .filter(|token| !token.is_empty())
        .map(str::to_string)
}

/// Extractor for handlers mounted behind `SessionGuard`
impl FromRequest for AuthContext {
    type Error = Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _: &mut actix_web::dev::Payload) -> Self::Future {
        ready(
            req.extensions()
                .get::<AuthContext>()
                .cloned()
                .ok_or_else(|| ApiError(DomainError::Unauthorized).into()),
        )
    }
}
