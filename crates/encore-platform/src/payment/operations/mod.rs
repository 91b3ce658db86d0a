//! Payment Operations

pub mod enroll;

pub use enroll::{EnrollCommand, EnrollmentOutcome, EnrollmentService};
