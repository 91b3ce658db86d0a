//! Payment Aggregate
//!
//! Immutable charge records, the provider gateway seam, and the
//! transactional enrollment commit.

pub mod api;
pub mod entity;
pub mod gateway;
pub mod operations;
pub mod repository;

pub use api::{payments_router, PaymentsState};
pub use entity::Payment;
pub use gateway::{PaymentGateway, PaymentIntent, StubGateway};
pub use operations::{EnrollCommand, EnrollmentOutcome, EnrollmentService};
pub use repository::PaymentRepository;
