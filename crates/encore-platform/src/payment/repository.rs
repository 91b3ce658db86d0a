//! Payment Repository

use futures::TryStreamExt;
use mongodb::{bson::doc, Collection, Database};

use crate::payment::entity::Payment;
use crate::shared::error::Result;

pub struct PaymentRepository {
    collection: Collection<Payment>,
}

impl PaymentRepository {
    pub fn new(db: &Database) -> Self {
        Self {
            collection: db.collection("payments"),
        }
    }

    pub async fn find_by_payer(&self, email: &str) -> Result<Vec<Payment>> {
        let cursor = self.collection.find(doc! { "email": email }).await?;
        Ok(cursor.try_collect().await?)
    }

    /// Payer's payments, newest first
    pub async fn find_history_by_payer(&self, email: &str) -> Result<Vec<Payment>> {
        let cursor = self
            .collection
            .find(doc! { "email": email })
            .sort(doc! { "date": -1 })
            .await?;
        Ok(cursor.try_collect().await?)
    }
}
