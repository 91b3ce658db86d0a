//! Common API types
//!
//! Successful write responses echo the store operation's outcome, so the
//! DTOs here mirror the driver's result fields.

use serde::Serialize;
use utoipa::ToSchema;

/// Outcome of a single-document insert.
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct InsertOutcome {
    pub acknowledged: bool,
    pub inserted_id: String,
}

impl InsertOutcome {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            acknowledged: true,
            inserted_id: id.into(),
        }
    }
}

/// Outcome of a single-document update.
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateOutcome {
    pub acknowledged: bool,
    pub matched_count: u64,
    pub modified_count: u64,
}

impl From<mongodb::results::UpdateResult> for UpdateOutcome {
    fn from(r: mongodb::results::UpdateResult) -> Self {
        Self {
            acknowledged: true,
            matched_count: r.matched_count,
            modified_count: r.modified_count,
        }
    }
}

/// Outcome of a single-document delete.
///
/// A `deleted_count` of 0 is still a success: deleting an id that is
/// already gone is a no-op, not an error.
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DeleteOutcome {
    pub acknowledged: bool,
    pub deleted_count: u64,
}

impl From<mongodb::results::DeleteResult> for DeleteOutcome {
    fn from(r: mongodb::results::DeleteResult) -> Self {
        Self {
            acknowledged: true,
            deleted_count: r.deleted_count,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn insert_outcome_serializes_camel_case() {
        let json = serde_json::to_value(InsertOutcome::new("0ABC123")).unwrap();
        assert_eq!(json["acknowledged"], serde_json::json!(true));
        assert_eq!(json["insertedId"], serde_json::json!("0ABC123"));
    }

    #[test]
    fn delete_outcome_reports_noop() {
        let json = serde_json::to_value(DeleteOutcome {
            acknowledged: true,
            deleted_count: 0,
        })
        .unwrap();
        assert_eq!(json["deletedCount"], serde_json::json!(0));
    }
}
