//! Health Check Endpoints
//!
//! - `/health` - combined status
//! - `/health/live` - liveness probe
//! - `/health/ready` - readiness probe

use axum::{routing::get, Json, Router};
use serde::Serialize;
use utoipa::ToSchema;

#[derive(Debug, Serialize, ToSchema)]
pub struct HealthResponse {
    pub status: &'static str,
    pub version: &'static str,
}

async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "UP",
        version: env!("CARGO_PKG_VERSION"),
    })
}

async fn live() -> Json<serde_json::Value> {
    Json(serde_json::json!({ "status": "UP" }))
}

async fn ready() -> Json<serde_json::Value> {
    Json(serde_json::json!({ "status": "READY" }))
}

pub fn health_router() -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/health/live", get(live))
        .route("/health/ready", get(ready))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn health_body_reports_up() {
        let body = tokio_test::block_on(health());
        assert_eq!(body.0.status, "UP");
    }
}
