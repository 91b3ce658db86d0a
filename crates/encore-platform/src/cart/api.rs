//! Carts API

use axum::{
    extract::{Path, Query, State},
    Json,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use utoipa::{IntoParams, ToSchema};
use utoipa_axum::{router::OpenApiRouter, routes};

use crate::cart::entity::CartEntry;
use crate::cart::repository::CartRepository;
use crate::shared::api_common::{DeleteOutcome, InsertOutcome};
use crate::shared::error::PlatformError;
use crate::shared::middleware::Authenticated;

/// Carts service state
#[derive(Clone)]
pub struct CartsState {
    pub cart_repo: Arc<CartRepository>,
}

/// Query parameters for the cart listing
#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct CartQuery {
    /// Owning learner email
    pub email: Option<String>,
}

/// Add-to-cart request
#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AddToCartRequest {
    pub email: String,

    pub course_id: String,

    #[serde(default)]
    pub course_name: Option<String>,

    pub price: f64,
}

/// Cart entry response DTO
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CartEntryResponse {
    pub id: String,
    pub email: String,
    pub course_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub course_name: Option<String>,
    pub price: f64,
    pub created_at: String,
}

impl From<CartEntry> for CartEntryResponse {
    fn from(e: CartEntry) -> Self {
        Self {
            id: e.id,
            email: e.email,
            course_id: e.course_id,
            course_name: e.course_name,
            price: e.price,
            created_at: e.created_at.to_rfc3339(),
        }
    }
}

/// List cart entries for an email
///
/// Without the `email` query parameter the listing is empty rather than
/// an error.
#[utoipa::path(
    get,
    path = "/carts",
    tag = "carts",
    params(CartQuery),
    responses(
        (status = 200, description = "Cart entries for the email", body = [CartEntryResponse])
    )
)]
pub async fn list_cart(
    State(state): State<CartsState>,
    Query(query): Query<CartQuery>,
) -> Result<Json<Vec<CartEntryResponse>>, PlatformError> {
    let Some(email) = query.email else {
        return Ok(Json(vec![]));
    };

    let entries = state.cart_repo.find_by_email(&email).await?;
    Ok(Json(entries.into_iter().map(CartEntryResponse::from).collect()))
}

/// Add a course to a cart
#[utoipa::path(
    post,
    path = "/carts",
    tag = "carts",
    request_body = AddToCartRequest,
    responses(
        (status = 200, description = "Insert outcome", body = InsertOutcome),
        (status = 401, description = "Missing or invalid token")
    ),
    security(("bearer_auth" = []))
)]
pub async fn add_to_cart(
    State(state): State<CartsState>,
    _auth: Authenticated,
    Json(req): Json<AddToCartRequest>,
) -> Result<Json<InsertOutcome>, PlatformError> {
    let mut entry = CartEntry::new(req.email, req.course_id, req.price);
    if let Some(name) = req.course_name {
        entry = entry.with_course_name(name);
    }

    let id = entry.id.clone();
    state.cart_repo.insert(&entry).await?;
    Ok(Json(InsertOutcome::new(id)))
}

/// Remove a cart entry
#[utoipa::path(
    delete,
    path = "/carts/{id}",
    tag = "carts",
    params(("id" = String, Path, description = "Cart entry id")),
    responses(
        (status = 200, description = "Delete outcome; deletedCount 0 when the id was already gone", body = DeleteOutcome),
        (status = 401, description = "Missing or invalid token")
    ),
    security(("bearer_auth" = []))
)]
pub async fn remove_from_cart(
    State(state): State<CartsState>,
    _auth: Authenticated,
    Path(id): Path<String>,
) -> Result<Json<DeleteOutcome>, PlatformError> {
    let result = state.cart_repo.delete(&id).await?;
    Ok(Json(result.into()))
}

/// Create carts router
pub fn carts_router(state: CartsState) -> OpenApiRouter {
    OpenApiRouter::new()
        .routes(routes!(list_cart, add_to_cart))
        .routes(routes!(remove_from_cart))
        .with_state(state)
}
