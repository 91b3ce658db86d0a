//! Course Aggregate
//!
//! Enrollable class offerings with an admin approval workflow.

pub mod api;
pub mod entity;
pub mod repository;

pub use api::{courses_router, CoursesState};
pub use entity::{Course, CourseStatus};
pub use repository::CourseRepository;
