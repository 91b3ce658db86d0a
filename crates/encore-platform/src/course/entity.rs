//! Course Entity
//!
//! An enrollable class offering owned by an instructor. New offerings
//! start pending; only an admin moves them to approved or denied, and
//! only the enrollment commit touches the enrolled counter.

use bson::serde_helpers::chrono_datetime_as_bson_datetime;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::shared::tsid::TsidGenerator;

/// Approval status of a course offering
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum CourseStatus {
    #[default]
    Pending,
    Approved,
    Denied,
}

impl CourseStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            CourseStatus::Pending => "pending",
            CourseStatus::Approved => "approved",
            CourseStatus::Denied => "denied",
        }
    }
}

/// Course entity
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Course {
    #[serde(rename = "_id")]
    pub id: String,

    pub name: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub instructor_name: Option<String>,

    /// Owning instructor identity
    pub instructor_email: String,

    pub price: f64,

    pub available_seats: i64,

    /// Number of completed enrollments; incremented only by the
    /// enrollment commit
    #[serde(default)]
    pub enrolled: i64,

    #[serde(default)]
    pub status: CourseStatus,

    /// Admin feedback, usually accompanying a denial
    #[serde(skip_serializing_if = "Option::is_none")]
    pub feedback: Option<String>,

    #[serde(with = "chrono_datetime_as_bson_datetime")]
    pub created_at: DateTime<Utc>,
    #[serde(with = "chrono_datetime_as_bson_datetime")]
    pub updated_at: DateTime<Utc>,
}

impl Course {
    pub fn new(
        name: impl Into<String>,
        instructor_email: impl Into<String>,
        price: f64,
        available_seats: i64,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: TsidGenerator::generate(),
            name: name.into(),
            image: None,
            instructor_name: None,
            instructor_email: instructor_email.into(),
            price,
            available_seats,
            enrolled: 0,
            status: CourseStatus::Pending,
            feedback: None,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn with_image(mut self, image: impl Into<String>) -> Self {
        self.image = Some(image.into());
        self
    }

    pub fn with_instructor_name(mut self, name: impl Into<String>) -> Self {
        self.instructor_name = Some(name.into());
        self
    }

    pub fn is_approved(&self) -> bool {
        self.status == CourseStatus::Approved
    }
}
