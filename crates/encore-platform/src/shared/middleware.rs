//! API Middleware
//!
//! Bearer-token authentication and role-gated authorization for Axum.
//! Guards compose per route: `Authenticated` alone, or `AdminOnly` /
//! `InstructorOnly` which authenticate first and then check the role.

use axum::{
    async_trait,
    extract::FromRequestParts,
    http::{header::AUTHORIZATION, request::Parts},
    response::Response,
};
use std::sync::Arc;

use crate::auth::auth_service::{extract_bearer_token, AuthService, TokenClaims};
use crate::shared::error::PlatformError;
use crate::user::entity::Role;
use crate::user::repository::UserRepository;

/// Application state containing shared services
#[derive(Clone)]
pub struct AppState {
    pub auth_service: Arc<AuthService>,
    pub user_repo: Arc<UserRepository>,
}

/// Authenticated request extractor.
///
/// Requires an `Authorization: Bearer <token>` header and a token that
/// verifies against the configured secret. Rejects with 401 before the
/// handler runs otherwise.
pub struct Authenticated(pub TokenClaims);

impl std::ops::Deref for Authenticated {
    type Target = TokenClaims;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

fn app_state(parts: &Parts) -> Result<AppState, PlatformError> {
    parts
        .extensions
        .get::<AppState>()
        .cloned()
        .ok_or_else(|| PlatformError::internal("auth state not configured"))
}

#[async_trait]
impl<S> FromRequestParts<S> for Authenticated
where
    S: Send + Sync,
{
    type Rejection = PlatformError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let state = app_state(parts)?;

        let token = parts
            .headers
            .get(AUTHORIZATION)
            .and_then(|v| v.to_str().ok())
            .and_then(extract_bearer_token)
            .ok_or_else(|| PlatformError::unauthorized("unauthorized access"))?;

        let claims = state
            .auth_service
            .verify(token)
            .map_err(|_| PlatformError::unauthorized("unauthorized access"))?;

        Ok(Authenticated(claims))
    }
}

/// Looks the authenticated email up in the user store and compares roles.
/// The role is deliberately not carried in the token: re-reading it per
/// request makes promotions effective immediately.
async fn require_role(parts: &mut Parts, required: Role) -> Result<TokenClaims, PlatformError> {
    let Authenticated(claims) = Authenticated::from_request_parts(parts, &()).await?;
    let state = app_state(parts)?;

    let user = state.user_repo.find_by_email(&claims.email).await?;
    match user {
        Some(u) if u.role == required => Ok(claims),
        _ => Err(PlatformError::forbidden("forbidden access")),
    }
}

/// Extractor requiring an authenticated user whose stored role is admin.
pub struct AdminOnly(pub TokenClaims);

#[async_trait]
impl<S> FromRequestParts<S> for AdminOnly
where
    S: Send + Sync,
{
    type Rejection = PlatformError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        require_role(parts, Role::Admin).await.map(AdminOnly)
    }
}

/// Extractor requiring an authenticated user whose stored role is instructor.
pub struct InstructorOnly(pub TokenClaims);

#[async_trait]
impl<S> FromRequestParts<S> for InstructorOnly
where
    S: Send + Sync,
{
    type Rejection = PlatformError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        require_role(parts, Role::Instructor).await.map(InstructorOnly)
    }
}

/// Middleware layer that injects AppState into request extensions,
/// enabling the extractors above.
use std::future::Future;
use std::pin::Pin;
use std::task::{Context, Poll};
use tower::{Layer, Service};

#[derive(Clone)]
pub struct AuthLayer {
    state: AppState,
}

impl AuthLayer {
    pub fn new(state: AppState) -> Self {
        Self { state }
    }
}

impl<S> Layer<S> for AuthLayer {
    type Service = AuthMiddleware<S>;

    fn layer(&self, inner: S) -> Self::Service {
        AuthMiddleware {
            inner,
            state: self.state.clone(),
        }
    }
}

#[derive(Clone)]
pub struct AuthMiddleware<S> {
    inner: S,
    state: AppState,
}

impl<S, B> Service<axum::http::Request<B>> for AuthMiddleware<S>
where
    S: Service<axum::http::Request<B>, Response = Response> + Send + Clone + 'static,
    S::Future: Send + 'static,
    B: Send + 'static,
{
    type Response = S::Response;
    type Error = S::Error;
    type Future = Pin<Box<dyn Future<Output = Result<Self::Response, Self::Error>> + Send>>;

    fn poll_ready(&mut self, cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.inner.poll_ready(cx)
    }

    fn call(&mut self, mut req: axum::http::Request<B>) -> Self::Future {
        req.extensions_mut().insert(self.state.clone());

        let future = self.inner.call(req);
        Box::pin(async move { future.await })
    }
}
