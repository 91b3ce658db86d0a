//! Users API
//!
//! Registration, lookups, and role promotion. Promotion endpoints are
//! admin-gated by the route guard; the repository itself applies the
//! update unconditionally.

use axum::{
    extract::{Path, State},
    Json,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use utoipa::ToSchema;
use utoipa_axum::{router::OpenApiRouter, routes};

use crate::shared::api_common::{InsertOutcome, UpdateOutcome};
use crate::shared::error::PlatformError;
use crate::shared::middleware::{AdminOnly, Authenticated};
use crate::user::entity::{Role, User};
use crate::user::repository::{RegistrationOutcome, UserRepository};

/// Users service state
#[derive(Clone)]
pub struct UsersState {
    pub user_repo: Arc<UserRepository>,
}

/// Registration request
#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RegisterRequest {
    pub user_email: String,

    #[serde(default)]
    pub name: Option<String>,

    #[serde(default)]
    pub photo_url: Option<String>,
}

/// User response DTO
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UserResponse {
    pub id: String,
    pub user_email: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub photo_url: Option<String>,
    pub role: Role,
    pub created_at: String,
    pub updated_at: String,
}

impl From<User> for UserResponse {
    fn from(u: User) -> Self {
        Self {
            id: u.id,
            user_email: u.user_email,
            name: u.name,
            photo_url: u.photo_url,
            role: u.role,
            created_at: u.created_at.to_rfc3339(),
            updated_at: u.updated_at.to_rfc3339(),
        }
    }
}

/// Registration response: the insert outcome, or the already-exists signal
#[derive(Debug, Serialize, ToSchema)]
#[serde(untagged)]
pub enum RegisterResponse {
    Created(InsertOutcome),
    AlreadyExists { message: String },
}

/// Admin self-check response
#[derive(Debug, Serialize, ToSchema)]
pub struct AdminCheckResponse {
    pub admin: bool,
}

/// Fetch a user by email
#[utoipa::path(
    get,
    path = "/users/{email}",
    tag = "users",
    params(("email" = String, Path, description = "User email")),
    responses(
        (status = 200, description = "User, or null when absent", body = Option<UserResponse>)
    )
)]
pub async fn get_user(
    State(state): State<UsersState>,
    Path(email): Path<String>,
) -> Result<Json<Option<UserResponse>>, PlatformError> {
    let user = state.user_repo.find_by_email(&email).await?;
    Ok(Json(user.map(UserResponse::from)))
}

/// List all users
#[utoipa::path(
    get,
    path = "/allUsers",
    tag = "users",
    responses(
        (status = 200, description = "All registered users", body = [UserResponse]),
        (status = 401, description = "Missing or invalid token"),
        (status = 403, description = "Caller is not an admin")
    ),
    security(("bearer_auth" = []))
)]
pub async fn list_users(
    State(state): State<UsersState>,
    _admin: AdminOnly,
) -> Result<Json<Vec<UserResponse>>, PlatformError> {
    let users = state.user_repo.find_all().await?;
    Ok(Json(users.into_iter().map(UserResponse::from).collect()))
}

/// Register a user (idempotent)
#[utoipa::path(
    post,
    path = "/users",
    tag = "users",
    request_body = RegisterRequest,
    responses(
        (status = 200, description = "Insert outcome, or already-exists message", body = RegisterResponse)
    )
)]
pub async fn register(
    State(state): State<UsersState>,
    Json(req): Json<RegisterRequest>,
) -> Result<Json<RegisterResponse>, PlatformError> {
    let mut user = User::new(req.user_email);
    if let Some(name) = req.name {
        user = user.with_name(name);
    }
    if let Some(photo_url) = req.photo_url {
        user = user.with_photo_url(photo_url);
    }

    let response = match state.user_repo.insert_if_absent(&user).await? {
        RegistrationOutcome::Created { id } => RegisterResponse::Created(InsertOutcome::new(id)),
        RegistrationOutcome::AlreadyExists => RegisterResponse::AlreadyExists {
            message: "user already exists".to_string(),
        },
    };

    Ok(Json(response))
}

/// Check whether an email belongs to an admin
///
/// Answers `{admin: false}` outright when the asked-about email is not the
/// authenticated one, so callers can only probe their own role.
#[utoipa::path(
    get,
    path = "/users/admin/{id}",
    tag = "users",
    params(("id" = String, Path, description = "User email; must match the authenticated token")),
    responses(
        (status = 200, description = "Admin flag", body = AdminCheckResponse),
        (status = 401, description = "Missing or invalid token")
    ),
    security(("bearer_auth" = []))
)]
pub async fn admin_check(
    State(state): State<UsersState>,
    auth: Authenticated,
    Path(email): Path<String>,
) -> Result<Json<AdminCheckResponse>, PlatformError> {
    if auth.email != email {
        return Ok(Json(AdminCheckResponse { admin: false }));
    }

    let user = state.user_repo.find_by_email(&email).await?;
    let admin = user.map(|u| u.is_admin()).unwrap_or(false);
    Ok(Json(AdminCheckResponse { admin }))
}

/// Promote a user to admin
#[utoipa::path(
    patch,
    path = "/users/admin/{id}",
    tag = "users",
    params(("id" = String, Path, description = "User storage id")),
    responses(
        (status = 200, description = "Update outcome", body = UpdateOutcome),
        (status = 401, description = "Missing or invalid token"),
        (status = 403, description = "Caller is not an admin")
    ),
    security(("bearer_auth" = []))
)]
pub async fn promote_admin(
    State(state): State<UsersState>,
    _admin: AdminOnly,
    Path(id): Path<String>,
) -> Result<Json<UpdateOutcome>, PlatformError> {
    let result = state.user_repo.promote(&id, Role::Admin).await?;
    Ok(Json(result.into()))
}

/// Promote a user to instructor
#[utoipa::path(
    patch,
    path = "/users/instructor/{id}",
    tag = "users",
    params(("id" = String, Path, description = "User storage id")),
    responses(
        (status = 200, description = "Update outcome", body = UpdateOutcome),
        (status = 401, description = "Missing or invalid token"),
        (status = 403, description = "Caller is not an admin")
    ),
    security(("bearer_auth" = []))
)]
pub async fn promote_instructor(
    State(state): State<UsersState>,
    _admin: AdminOnly,
    Path(id): Path<String>,
) -> Result<Json<UpdateOutcome>, PlatformError> {
    let result = state.user_repo.promote(&id, Role::Instructor).await?;
    Ok(Json(result.into()))
}

/// List instructors
#[utoipa::path(
    get,
    path = "/instructor",
    tag = "users",
    responses(
        (status = 200, description = "Users with the instructor role", body = [UserResponse])
    )
)]
pub async fn list_instructors(
    State(state): State<UsersState>,
) -> Result<Json<Vec<UserResponse>>, PlatformError> {
    let users = state.user_repo.find_instructors().await?;
    Ok(Json(users.into_iter().map(UserResponse::from).collect()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn repeat_registration_answers_with_the_exists_message() {
        let response = RegisterResponse::AlreadyExists {
            message: "user already exists".to_string(),
        };
        assert_eq!(
            serde_json::to_value(&response).unwrap(),
            json!({ "message": "user already exists" })
        );
    }

    #[test]
    fn fresh_registration_echoes_the_insert_outcome() {
        let response = RegisterResponse::Created(InsertOutcome::new("0USER00000001"));
        let value = serde_json::to_value(&response).unwrap();
        assert_eq!(value["insertedId"], json!("0USER00000001"));
        assert_eq!(value["acknowledged"], json!(true));
    }

    #[test]
    fn admin_check_response_is_a_bare_flag() {
        let value = serde_json::to_value(AdminCheckResponse { admin: false }).unwrap();
        assert_eq!(value, json!({ "admin": false }));
    }
}

/// Create users router
pub fn users_router(state: UsersState) -> OpenApiRouter {
    OpenApiRouter::new()
        .routes(routes!(register))
        .routes(routes!(get_user))
        .routes(routes!(list_users))
        .routes(routes!(list_instructors))
        // GET and PATCH share the path segment shape, so they register together
        .routes(routes!(admin_check, promote_admin))
        .routes(routes!(promote_instructor))
        .with_state(state)
}
