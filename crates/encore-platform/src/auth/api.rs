//! Auth API
//!
//! Token issuance for the client login flow.

use axum::{extract::State, Json};
use serde::Serialize;
use std::sync::Arc;
use utoipa::ToSchema;
use utoipa_axum::{router::OpenApiRouter, routes};

use crate::auth::auth_service::AuthService;
use crate::shared::error::PlatformError;

/// Auth service state
#[derive(Clone)]
pub struct AuthApiState {
    pub auth_service: Arc<AuthService>,
}

/// Issued token response
#[derive(Debug, Serialize, ToSchema)]
pub struct TokenResponse {
    pub token: String,
}

/// Issue a token for the posted identity claims
#[utoipa::path(
    post,
    path = "/jwt",
    tag = "auth",
    request_body = serde_json::Value,
    responses(
        (status = 200, description = "Signed token", body = TokenResponse),
        (status = 400, description = "Payload is not an identity object")
    )
)]
pub async fn issue_token(
    State(state): State<AuthApiState>,
    Json(identity): Json<serde_json::Value>,
) -> Result<Json<TokenResponse>, PlatformError> {
    let token = state.auth_service.issue(identity)?;
    Ok(Json(TokenResponse { token }))
}

/// Create auth router
pub fn auth_router(state: AuthApiState) -> OpenApiRouter {
    OpenApiRouter::new()
        .routes(routes!(issue_token))
        .with_state(state)
}
