//! Development Data Seeder
//!
//! Seeds a handful of accounts and one approved course on startup so a
//! fresh database is immediately usable from the frontend.
//!
//! Default accounts:
//!   Admin:      admin@encore.school
//!   Instructor: mira@encore.school

use mongodb::Database;
use tracing::info;

use crate::course::entity::{Course, CourseStatus};
use crate::course::repository::CourseRepository;
use crate::user::entity::{Role, User};
use crate::user::repository::UserRepository;
use crate::shared::error::Result;

const ADMIN_EMAIL: &str = "admin@encore.school";
const INSTRUCTOR_EMAIL: &str = "mira@encore.school";

pub struct DevDataSeeder {
    db: Database,
}

impl DevDataSeeder {
    pub fn new(db: Database) -> Self {
        Self { db }
    }

    pub async fn seed(&self) -> Result<()> {
        info!("Seeding development data...");

        self.seed_users().await?;
        self.seed_courses().await?;

        info!("Development data seeded");
        info!("  Admin:      {}", ADMIN_EMAIL);
        info!("  Instructor: {}", INSTRUCTOR_EMAIL);

        Ok(())
    }

    async fn seed_users(&self) -> Result<()> {
        let repo = UserRepository::new(&self.db);

        if repo.find_by_email(ADMIN_EMAIL).await?.is_none() {
            let admin = User::new(ADMIN_EMAIL)
                .with_name("Encore Admin")
                .with_role(Role::Admin);
            repo.insert(&admin).await?;
        }

        if repo.find_by_email(INSTRUCTOR_EMAIL).await?.is_none() {
            let instructor = User::new(INSTRUCTOR_EMAIL)
                .with_name("Mira Halvorsen")
                .with_role(Role::Instructor);
            repo.insert(&instructor).await?;
        }

        Ok(())
    }

    async fn seed_courses(&self) -> Result<()> {
        let repo = CourseRepository::new(&self.db);

        if repo.find_by_instructor(INSTRUCTOR_EMAIL).await?.is_empty() {
            let mut course = Course::new("Violin Basics", INSTRUCTOR_EMAIL, 49.99, 20)
                .with_instructor_name("Mira Halvorsen");
            course.status = CourseStatus::Approved;
            repo.insert(&course).await?;
        }

        Ok(())
    }
}
