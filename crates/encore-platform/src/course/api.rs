//! Courses API
//!
//! Public catalogue queries plus instructor-gated creation and
//! admin-gated moderation.

use axum::{
    extract::{Path, State},
    Json,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use utoipa::ToSchema;
use utoipa_axum::{router::OpenApiRouter, routes};

use crate::course::entity::{Course, CourseStatus};
use crate::course::repository::CourseRepository;
use crate::shared::api_common::{InsertOutcome, UpdateOutcome};
use crate::shared::error::PlatformError;
use crate::shared::middleware::{AdminOnly, InstructorOnly};

/// How many offerings the popular listing returns
const POPULAR_LIMIT: i64 = 6;

/// Courses service state
#[derive(Clone)]
pub struct CoursesState {
    pub course_repo: Arc<CourseRepository>,
}

/// Create course request
#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateCourseRequest {
    pub name: String,

    #[serde(default)]
    pub image: Option<String>,

    #[serde(default)]
    pub instructor_name: Option<String>,

    pub instructor_email: String,

    pub price: f64,

    pub available_seats: i64,
}

/// Feedback request
#[derive(Debug, Deserialize, ToSchema)]
pub struct FeedbackRequest {
    pub feedback: String,
}

/// Course response DTO
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CourseResponse {
    pub id: String,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub instructor_name: Option<String>,
    pub instructor_email: String,
    pub price: f64,
    pub available_seats: i64,
    pub enrolled: i64,
    pub status: CourseStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub feedback: Option<String>,
    pub created_at: String,
    pub updated_at: String,
}

impl From<Course> for CourseResponse {
    fn from(c: Course) -> Self {
        Self {
            id: c.id,
            name: c.name,
            image: c.image,
            instructor_name: c.instructor_name,
            instructor_email: c.instructor_email,
            price: c.price,
            available_seats: c.available_seats,
            enrolled: c.enrolled,
            status: c.status,
            feedback: c.feedback,
            created_at: c.created_at.to_rfc3339(),
            updated_at: c.updated_at.to_rfc3339(),
        }
    }
}

fn to_responses(courses: Vec<Course>) -> Vec<CourseResponse> {
    courses.into_iter().map(CourseResponse::from).collect()
}

/// List all course offerings
#[utoipa::path(
    get,
    path = "/classes",
    tag = "courses",
    responses(
        (status = 200, description = "Every offering regardless of status", body = [CourseResponse]),
        (status = 401, description = "Missing or invalid token"),
        (status = 403, description = "Caller is not an admin")
    ),
    security(("bearer_auth" = []))
)]
pub async fn list_courses(
    State(state): State<CoursesState>,
    _admin: AdminOnly,
) -> Result<Json<Vec<CourseResponse>>, PlatformError> {
    let courses = state.course_repo.find_all().await?;
    Ok(Json(to_responses(courses)))
}

/// List approved offerings
#[utoipa::path(
    get,
    path = "/allClasses",
    tag = "courses",
    responses(
        (status = 200, description = "Approved offerings", body = [CourseResponse])
    )
)]
pub async fn list_approved(
    State(state): State<CoursesState>,
) -> Result<Json<Vec<CourseResponse>>, PlatformError> {
    let courses = state.course_repo.find_approved().await?;
    Ok(Json(to_responses(courses)))
}

/// Top approved offerings by enrollment
#[utoipa::path(
    get,
    path = "/classes/popular",
    tag = "courses",
    responses(
        (status = 200, description = "At most 6 approved offerings, enrollment descending", body = [CourseResponse])
    )
)]
pub async fn list_popular(
    State(state): State<CoursesState>,
) -> Result<Json<Vec<CourseResponse>>, PlatformError> {
    let courses = state.course_repo.find_popular(POPULAR_LIMIT).await?;
    Ok(Json(to_responses(courses)))
}

/// Offerings owned by an instructor
#[utoipa::path(
    get,
    path = "/classes/{email}",
    tag = "courses",
    params(("email" = String, Path, description = "Instructor email")),
    responses(
        (status = 200, description = "Offerings owned by the instructor", body = [CourseResponse]),
        (status = 401, description = "Missing or invalid token"),
        (status = 403, description = "Caller is not an instructor")
    ),
    security(("bearer_auth" = []))
)]
pub async fn list_by_instructor(
    State(state): State<CoursesState>,
    _instructor: InstructorOnly,
    Path(email): Path<String>,
) -> Result<Json<Vec<CourseResponse>>, PlatformError> {
    let courses = state.course_repo.find_by_instructor(&email).await?;
    Ok(Json(to_responses(courses)))
}

/// Create a course offering
#[utoipa::path(
    post,
    path = "/classes",
    tag = "courses",
    request_body = CreateCourseRequest,
    responses(
        (status = 200, description = "Insert outcome", body = InsertOutcome),
        (status = 401, description = "Missing or invalid token"),
        (status = 403, description = "Caller is not an instructor")
    ),
    security(("bearer_auth" = []))
)]
pub async fn create_course(
    State(state): State<CoursesState>,
    _instructor: InstructorOnly,
    Json(req): Json<CreateCourseRequest>,
) -> Result<Json<InsertOutcome>, PlatformError> {
    let mut course = Course::new(req.name, req.instructor_email, req.price, req.available_seats);
    if let Some(image) = req.image {
        course = course.with_image(image);
    }
    if let Some(name) = req.instructor_name {
        course = course.with_instructor_name(name);
    }

    let id = course.id.clone();
    state.course_repo.insert(&course).await?;
    Ok(Json(InsertOutcome::new(id)))
}

/// Approve an offering
#[utoipa::path(
    patch,
    path = "/classes/approve/{id}",
    tag = "courses",
    params(("id" = String, Path, description = "Course id")),
    responses(
        (status = 200, description = "Update outcome", body = UpdateOutcome),
        (status = 401, description = "Missing or invalid token"),
        (status = 403, description = "Caller is not an admin")
    ),
    security(("bearer_auth" = []))
)]
pub async fn approve_course(
    State(state): State<CoursesState>,
    _admin: AdminOnly,
    Path(id): Path<String>,
) -> Result<Json<UpdateOutcome>, PlatformError> {
    let result = state.course_repo.set_status(&id, CourseStatus::Approved).await?;
    Ok(Json(result.into()))
}

/// Deny an offering
#[utoipa::path(
    patch,
    path = "/classes/deny/{id}",
    tag = "courses",
    params(("id" = String, Path, description = "Course id")),
    responses(
        (status = 200, description = "Update outcome", body = UpdateOutcome),
        (status = 401, description = "Missing or invalid token"),
        (status = 403, description = "Caller is not an admin")
    ),
    security(("bearer_auth" = []))
)]
pub async fn deny_course(
    State(state): State<CoursesState>,
    _admin: AdminOnly,
    Path(id): Path<String>,
) -> Result<Json<UpdateOutcome>, PlatformError> {
    let result = state.course_repo.set_status(&id, CourseStatus::Denied).await?;
    Ok(Json(result.into()))
}

/// Leave feedback on an offering
#[utoipa::path(
    patch,
    path = "/classes/feedback/{id}",
    tag = "courses",
    params(("id" = String, Path, description = "Course id")),
    request_body = FeedbackRequest,
    responses(
        (status = 200, description = "Update outcome", body = UpdateOutcome),
        (status = 401, description = "Missing or invalid token"),
        (status = 403, description = "Caller is not an admin")
    ),
    security(("bearer_auth" = []))
)]
pub async fn set_feedback(
    State(state): State<CoursesState>,
    _admin: AdminOnly,
    Path(id): Path<String>,
    Json(req): Json<FeedbackRequest>,
) -> Result<Json<UpdateOutcome>, PlatformError> {
    let result = state.course_repo.set_feedback(&id, &req.feedback).await?;
    Ok(Json(result.into()))
}

/// Create courses router
pub fn courses_router(state: CoursesState) -> OpenApiRouter {
    OpenApiRouter::new()
        .routes(routes!(list_courses, create_course))
        .routes(routes!(list_approved))
        .routes(routes!(list_popular))
        .routes(routes!(list_by_instructor))
        .routes(routes!(approve_course))
        .routes(routes!(deny_course))
        .routes(routes!(set_feedback))
        .with_state(state)
}
