//! User Repository

use futures::TryStreamExt;
use mongodb::{bson::doc, results::UpdateResult, Collection, Database};

use crate::shared::error::Result;
use crate::user::entity::{Role, User};

/// Outcome of an idempotent registration attempt
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RegistrationOutcome {
    Created { id: String },
    AlreadyExists,
}

pub struct UserRepository {
    collection: Collection<User>,
}

impl UserRepository {
    pub fn new(db: &Database) -> Self {
        Self {
            collection: db.collection("users"),
        }
    }

    pub async fn insert(&self, user: &User) -> Result<()> {
        self.collection.insert_one(user).await?;
        Ok(())
    }

    pub async fn find_by_id(&self, id: &str) -> Result<Option<User>> {
        Ok(self.collection.find_one(doc! { "_id": id }).await?)
    }

    pub async fn find_by_email(&self, email: &str) -> Result<Option<User>> {
        Ok(self.collection.find_one(doc! { "userEmail": email }).await?)
    }

    pub async fn find_all(&self) -> Result<Vec<User>> {
        let cursor = self.collection.find(doc! {}).await?;
        Ok(cursor.try_collect().await?)
    }

    pub async fn find_instructors(&self) -> Result<Vec<User>> {
        let cursor = self
            .collection
            .find(doc! { "role": Role::Instructor.as_str() })
            .await?;
        Ok(cursor.try_collect().await?)
    }

    /// Insert only when no record with that email exists; registration is
    /// idempotent and a repeat attempt leaves the store untouched.
    pub async fn insert_if_absent(&self, user: &User) -> Result<RegistrationOutcome> {
        if self.find_by_email(&user.user_email).await?.is_some() {
            return Ok(RegistrationOutcome::AlreadyExists);
        }
        self.collection.insert_one(user).await?;
        Ok(RegistrationOutcome::Created {
            id: user.id.clone(),
        })
    }

    /// Unconditionally set the role at the given storage id. Whether the
    /// target exists shows up in the returned `matched_count`; permission
    /// is enforced by the route guard, not here.
    pub async fn promote(&self, id: &str, role: Role) -> Result<UpdateResult> {
        let result = self
            .collection
            .update_one(
                doc! { "_id": id },
                doc! { "$set": {
                    "role": role.as_str(),
                    "updatedAt": bson::DateTime::now(),
                }},
            )
            .await?;
        Ok(result)
    }
}
