//! Authentication
//!
//! Stateless JWT issuance and verification.

pub mod api;
pub mod auth_service;

pub use api::{auth_router, AuthApiState};
pub use auth_service::{extract_bearer_token, AuthConfig, AuthService, TokenClaims};
