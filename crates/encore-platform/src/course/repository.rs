//! Course Repository

use futures::TryStreamExt;
use mongodb::{bson::doc, results::UpdateResult, Collection, Database};

use crate::course::entity::{Course, CourseStatus};
use crate::shared::error::Result;

pub struct CourseRepository {
    collection: Collection<Course>,
}

impl CourseRepository {
    pub fn new(db: &Database) -> Self {
        Self {
            collection: db.collection("courses"),
        }
    }

    pub async fn insert(&self, course: &Course) -> Result<()> {
        self.collection.insert_one(course).await?;
        Ok(())
    }

    pub async fn find_by_id(&self, id: &str) -> Result<Option<Course>> {
        Ok(self.collection.find_one(doc! { "_id": id }).await?)
    }

    pub async fn find_all(&self) -> Result<Vec<Course>> {
        let cursor = self.collection.find(doc! {}).await?;
        Ok(cursor.try_collect().await?)
    }

    pub async fn find_approved(&self) -> Result<Vec<Course>> {
        let cursor = self
            .collection
            .find(doc! { "status": CourseStatus::Approved.as_str() })
            .await?;
        Ok(cursor.try_collect().await?)
    }

    /// Approved offerings with the highest enrollment first
    pub async fn find_popular(&self, limit: i64) -> Result<Vec<Course>> {
        let cursor = self
            .collection
            .find(doc! { "status": CourseStatus::Approved.as_str() })
            .sort(doc! { "enrolled": -1 })
            .limit(limit)
            .await?;
        Ok(cursor.try_collect().await?)
    }

    pub async fn find_by_instructor(&self, email: &str) -> Result<Vec<Course>> {
        let cursor = self
            .collection
            .find(doc! { "instructorEmail": email })
            .await?;
        Ok(cursor.try_collect().await?)
    }

    pub async fn set_status(&self, id: &str, status: CourseStatus) -> Result<UpdateResult> {
        let result = self
            .collection
            .update_one(
                doc! { "_id": id },
                doc! { "$set": {
                    "status": status.as_str(),
                    "updatedAt": bson::DateTime::now(),
                }},
            )
            .await?;
        Ok(result)
    }

    pub async fn set_feedback(&self, id: &str, feedback: &str) -> Result<UpdateResult> {
        let result = self
            .collection
            .update_one(
                doc! { "_id": id },
                doc! { "$set": {
                    "feedback": feedback,
                    "updatedAt": bson::DateTime::now(),
                }},
            )
            .await?;
        Ok(result)
    }
}
