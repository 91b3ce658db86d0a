//! Cart Entry Entity
//!
//! A learner's pending selection of a course offering, held until it is
//! either removed or consumed by a successful enrollment.

use bson::serde_helpers::chrono_datetime_as_bson_datetime;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::shared::tsid::TsidGenerator;

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CartEntry {
    #[serde(rename = "_id")]
    pub id: String,

    /// Owning learner identity
    pub email: String,

    /// Referenced course offering
    pub course_id: String,

    /// Denormalized for cart rendering
    #[serde(skip_serializing_if = "Option::is_none")]
    pub course_name: Option<String>,

    pub price: f64,

    #[serde(with = "chrono_datetime_as_bson_datetime")]
    pub created_at: DateTime<Utc>,
}

impl CartEntry {
    pub fn new(email: impl Into<String>, course_id: impl Into<String>, price: f64) -> Self {
        Self {
            id: TsidGenerator::generate(),
            email: email.into(),
            course_id: course_id.into(),
            course_name: None,
            price,
            created_at: Utc::now(),
        }
    }

    pub fn with_course_name(mut self, name: impl Into<String>) -> Self {
        self.course_name = Some(name.into());
        self
    }
}
