//! Enrollment Commit
//!
//! Converts a confirmed charge into a payment record, an enrollment
//! increment on the course, and the removal of the consumed cart entry.
//! All three writes ride one MongoDB multi-document transaction: either
//! a payment exists together with its enrollment increment and cart
//! cleanup, or nothing was written.
//!
//! Requires MongoDB 4.0+ on a replica set (transactions need one).

use mongodb::{bson::doc, Client, Database};
use serde::Deserialize;
use tracing::{debug, error};
use utoipa::ToSchema;

use crate::cart::entity::CartEntry;
use crate::course::entity::Course;
use crate::payment::entity::Payment;
use crate::shared::api_common::{DeleteOutcome, InsertOutcome, UpdateOutcome};
use crate::shared::error::{PlatformError, Result};

/// Command describing a confirmed charge to commit
#[derive(Debug, Clone, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct EnrollCommand {
    /// Payer identity
    pub email: String,

    /// Charge reference from the payment provider
    pub transaction_id: String,

    pub amount: f64,

    /// Course offering being enrolled in
    pub course_id: String,

    /// Cart entry being consumed
    pub cart_id: String,

    #[serde(default)]
    pub course_name: Option<String>,
}

/// Composite outcome of the three writes.
///
/// Referenced ids are not validated up front: a dangling course or cart
/// id still commits, and shows up here as a zero matched/deleted count.
#[derive(Debug, serde::Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct EnrollmentOutcome {
    pub payment: InsertOutcome,
    pub enrollment: UpdateOutcome,
    pub cart: DeleteOutcome,
}

/// Runs the enrollment commit against the shared client
pub struct EnrollmentService {
    client: Client,
    database: Database,
}

impl EnrollmentService {
    pub fn new(client: Client, database: Database) -> Self {
        Self { client, database }
    }

    pub async fn execute(&self, command: EnrollCommand) -> Result<EnrollmentOutcome> {
        let mut payment = Payment::new(
            &command.email,
            &command.transaction_id,
            command.amount,
            &command.course_id,
            &command.cart_id,
        );
        if let Some(ref name) = command.course_name {
            payment = payment.with_course_name(name);
        }

        let mut session = self.client.start_session().await.map_err(|e| {
            error!("Failed to start MongoDB session: {}", e);
            PlatformError::Database(e)
        })?;

        if let Err(e) = session.start_transaction().await {
            error!("Failed to start transaction: {}", e);
            return Err(PlatformError::Database(e));
        }

        // 1. Insert the payment record
        let payments = self.database.collection::<Payment>("payments");
        if let Err(e) = payments.insert_one(&payment).session(&mut session).await {
            let _ = session.abort_transaction().await;
            error!("Failed to insert payment: {}", e);
            return Err(PlatformError::Database(e));
        }

        // 2. Increment the course's enrollment counter
        let courses = self.database.collection::<Course>("courses");
        let enrollment = match courses
            .update_one(
                doc! { "_id": &command.course_id },
                doc! {
                    "$inc": { "enrolled": 1 },
                    "$set": { "updatedAt": bson::DateTime::now() },
                },
            )
            .session(&mut session)
            .await
        {
            Ok(result) => result,
            Err(e) => {
                let _ = session.abort_transaction().await;
                error!("Failed to increment enrollment: {}", e);
                return Err(PlatformError::Database(e));
            }
        };

        // 3. Delete the consumed cart entry; an already-deleted entry is a
        // silent no-op (deleted_count 0), not an error
        let carts = self.database.collection::<CartEntry>("carts");
        let cart = match carts
            .delete_one(doc! { "_id": &command.cart_id })
            .session(&mut session)
            .await
        {
            Ok(result) => result,
            Err(e) => {
                let _ = session.abort_transaction().await;
                error!("Failed to delete cart entry: {}", e);
                return Err(PlatformError::Database(e));
            }
        };

        if let Err(e) = session.commit_transaction().await {
            error!("Failed to commit transaction: {}", e);
            return Err(PlatformError::Database(e));
        }

        debug!(
            payment_id = %payment.id,
            course_id = %command.course_id,
            cart_id = %command.cart_id,
            "enrollment committed"
        );

        Ok(EnrollmentOutcome {
            payment: InsertOutcome::new(payment.id),
            enrollment: enrollment.into(),
            cart: cart.into(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn command_accepts_the_checkout_payload() {
        let command: EnrollCommand = serde_json::from_value(json!({
            "email": "a@x.com",
            "transactionId": "txn_123",
            "amount": 49.99,
            "courseId": "0COURSE000001",
            "cartId": "0CART00000001",
            "courseName": "Violin Basics"
        }))
        .unwrap();

        assert_eq!(command.email, "a@x.com");
        assert_eq!(command.cart_id, "0CART00000001");
        assert_eq!(command.course_name.as_deref(), Some("Violin Basics"));
    }

    #[test]
    fn command_tolerates_missing_course_name() {
        let command: EnrollCommand = serde_json::from_value(json!({
            "email": "a@x.com",
            "transactionId": "txn_123",
            "amount": 10.0,
            "courseId": "c1",
            "cartId": "k1"
        }))
        .unwrap();

        assert!(command.course_name.is_none());
    }

    #[test]
    fn outcome_serializes_all_three_steps() {
        let outcome = EnrollmentOutcome {
            payment: InsertOutcome::new("0PAY000000001"),
            enrollment: UpdateOutcome {
                acknowledged: true,
                matched_count: 1,
                modified_count: 1,
            },
            cart: DeleteOutcome {
                acknowledged: true,
                deleted_count: 1,
            },
        };

        let json = serde_json::to_value(&outcome).unwrap();
        assert_eq!(json["payment"]["insertedId"], json!("0PAY000000001"));
        assert_eq!(json["enrollment"]["modifiedCount"], json!(1));
        assert_eq!(json["cart"]["deletedCount"], json!(1));
    }
}
