//! Payments API
//!
//! Charge-intent creation, payment listings, and the enrollment commit.

use axum::{
    extract::{Path, State},
    Json,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use utoipa::ToSchema;
use utoipa_axum::{router::OpenApiRouter, routes};

use crate::payment::entity::Payment;
use crate::payment::gateway::PaymentGateway;
use crate::payment::operations::{EnrollCommand, EnrollmentOutcome, EnrollmentService};
use crate::payment::repository::PaymentRepository;
use crate::shared::error::PlatformError;
use crate::shared::middleware::Authenticated;

/// Payments service state
#[derive(Clone)]
pub struct PaymentsState {
    pub payment_repo: Arc<PaymentRepository>,
    pub enrollment: Arc<EnrollmentService>,
    pub gateway: Arc<dyn PaymentGateway>,
}

/// Charge-intent request
#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateIntentRequest {
    /// Price in major units; forwarded to the provider in minor units
    pub price: f64,
}

/// Charge-intent response
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateIntentResponse {
    pub client_secret: String,
}

/// Payment response DTO
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PaymentResponse {
    pub id: String,
    pub email: String,
    pub transaction_id: String,
    pub amount: f64,
    pub course_id: String,
    pub cart_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub course_name: Option<String>,
    pub date: String,
}

impl From<Payment> for PaymentResponse {
    fn from(p: Payment) -> Self {
        Self {
            id: p.id,
            email: p.email,
            transaction_id: p.transaction_id,
            amount: p.amount,
            course_id: p.course_id,
            cart_id: p.cart_id,
            course_name: p.course_name,
            date: p.date.to_rfc3339(),
        }
    }
}

fn to_responses(payments: Vec<Payment>) -> Vec<PaymentResponse> {
    payments.into_iter().map(PaymentResponse::from).collect()
}

/// Create a provider charge intent
#[utoipa::path(
    post,
    path = "/create-payment-intent",
    tag = "payments",
    request_body = CreateIntentRequest,
    responses(
        (status = 200, description = "Client secret for the provider's confirmation flow", body = CreateIntentResponse),
        (status = 401, description = "Missing or invalid token")
    ),
    security(("bearer_auth" = []))
)]
pub async fn create_payment_intent(
    State(state): State<PaymentsState>,
    _auth: Authenticated,
    Json(req): Json<CreateIntentRequest>,
) -> Result<Json<CreateIntentResponse>, PlatformError> {
    let amount_minor = (req.price * 100.0).round() as i64;
    let intent = state.gateway.create_intent(amount_minor, "usd").await?;

    Ok(Json(CreateIntentResponse {
        client_secret: intent.client_secret,
    }))
}

/// List payments for a payer
#[utoipa::path(
    get,
    path = "/payment/{email}",
    tag = "payments",
    params(("email" = String, Path, description = "Payer email")),
    responses(
        (status = 200, description = "Payments made by the payer", body = [PaymentResponse]),
        (status = 401, description = "Missing or invalid token")
    ),
    security(("bearer_auth" = []))
)]
pub async fn list_payments(
    State(state): State<PaymentsState>,
    _auth: Authenticated,
    Path(email): Path<String>,
) -> Result<Json<Vec<PaymentResponse>>, PlatformError> {
    let payments = state.payment_repo.find_by_payer(&email).await?;
    Ok(Json(to_responses(payments)))
}

/// Payment history for a payer, newest first
#[utoipa::path(
    get,
    path = "/paymentHistory/{email}",
    tag = "payments",
    params(("email" = String, Path, description = "Payer email")),
    responses(
        (status = 200, description = "Payments made by the payer, reverse-chronological", body = [PaymentResponse]),
        (status = 401, description = "Missing or invalid token")
    ),
    security(("bearer_auth" = []))
)]
pub async fn payment_history(
    State(state): State<PaymentsState>,
    _auth: Authenticated,
    Path(email): Path<String>,
) -> Result<Json<Vec<PaymentResponse>>, PlatformError> {
    let payments = state.payment_repo.find_history_by_payer(&email).await?;
    Ok(Json(to_responses(payments)))
}

/// Record a confirmed charge and enroll
#[utoipa::path(
    post,
    path = "/payments",
    tag = "payments",
    request_body = EnrollCommand,
    responses(
        (status = 200, description = "Composite outcome of the enrollment commit", body = EnrollmentOutcome),
        (status = 401, description = "Missing or invalid token"),
        (status = 500, description = "Commit aborted; no partial writes remain")
    ),
    security(("bearer_auth" = []))
)]
pub async fn create_payment(
    State(state): State<PaymentsState>,
    _auth: Authenticated,
    Json(command): Json<EnrollCommand>,
) -> Result<Json<EnrollmentOutcome>, PlatformError> {
    let outcome = state.enrollment.execute(command).await?;
    Ok(Json(outcome))
}

/// Create payments router
pub fn payments_router(state: PaymentsState) -> OpenApiRouter {
    OpenApiRouter::new()
        .routes(routes!(create_payment_intent))
        .routes(routes!(create_payment))
        .routes(routes!(list_payments))
        .routes(routes!(payment_history))
        .with_state(state)
}
