//! Cart Repository

use futures::TryStreamExt;
use mongodb::{bson::doc, results::DeleteResult, Collection, Database};

use crate::cart::entity::CartEntry;
use crate::shared::error::Result;

pub struct CartRepository {
    collection: Collection<CartEntry>,
}

impl CartRepository {
    pub fn new(db: &Database) -> Self {
        Self {
            collection: db.collection("carts"),
        }
    }

    pub async fn insert(&self, entry: &CartEntry) -> Result<()> {
        self.collection.insert_one(entry).await?;
        Ok(())
    }

    pub async fn find_by_email(&self, email: &str) -> Result<Vec<CartEntry>> {
        let cursor = self.collection.find(doc! { "email": email }).await?;
        Ok(cursor.try_collect().await?)
    }

    /// Deleting an id that is already gone reports `deleted_count` 0,
    /// which callers treat as a no-op rather than an error.
    pub async fn delete(&self, id: &str) -> Result<DeleteResult> {
        Ok(self.collection.delete_one(doc! { "_id": id }).await?)
    }
}
