//! Payment Entity
//!
//! An immutable record of a completed charge, tied to the course offering
//! enrolled in and the cart entry consumed. Written exactly once by the
//! enrollment commit.

use bson::serde_helpers::chrono_datetime_as_bson_datetime;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::shared::tsid::TsidGenerator;

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Payment {
    #[serde(rename = "_id")]
    pub id: String,

    /// Payer identity
    pub email: String,

    /// Charge reference from the payment provider
    pub transaction_id: String,

    pub amount: f64,

    /// Course offering enrolled in
    pub course_id: String,

    /// Cart entry consumed by the enrollment
    pub cart_id: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub course_name: Option<String>,

    #[serde(with = "chrono_datetime_as_bson_datetime")]
    pub date: DateTime<Utc>,
}

impl Payment {
    pub fn new(
        email: impl Into<String>,
        transaction_id: impl Into<String>,
        amount: f64,
        course_id: impl Into<String>,
        cart_id: impl Into<String>,
    ) -> Self {
        Self {
            id: TsidGenerator::generate(),
            email: email.into(),
            transaction_id: transaction_id.into(),
            amount,
            course_id: course_id.into(),
            cart_id: cart_id.into(),
            course_name: None,
            date: Utc::now(),
        }
    }

    pub fn with_course_name(mut self, name: impl Into<String>) -> Self {
        self.course_name = Some(name.into());
        self
    }
}
