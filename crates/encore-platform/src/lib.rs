//! Encore Platform
//!
//! Backend domain for a music-school enrollment platform:
//! - Registered users with none/instructor/admin roles
//! - Course offerings with an admin approval workflow
//! - Shopping carts and provider-confirmed payments
//! - Transactional enrollment (payment + counter + cart cleanup)
//!
//! ## Module Organization (Aggregate-based)
//!
//! Each aggregate contains:
//! - `entity` - Domain entities
//! - `repository` - Data access
//! - `api` - REST endpoints
//! - `operations` - Multi-step operations (where applicable)

// Core aggregates
pub mod cart;
pub mod course;
pub mod payment;
pub mod user;

// Authentication
pub mod auth;

// Shared infrastructure
pub mod shared;

// Development tooling
pub mod seed;

// Re-export common types from shared
pub use shared::error::{ErrorResponse, PlatformError, Result};
pub use shared::tsid::TsidGenerator;
pub use shared::api_common::{DeleteOutcome, InsertOutcome, UpdateOutcome};
pub use shared::middleware::{AdminOnly, AppState, AuthLayer, Authenticated, InstructorOnly};

// Re-export main entity types for convenience
pub use cart::entity::CartEntry;
pub use course::entity::{Course, CourseStatus};
pub use payment::entity::Payment;
pub use user::entity::{Role, User};

// Re-export repositories
pub use cart::repository::CartRepository;
pub use course::repository::CourseRepository;
pub use payment::repository::PaymentRepository;
pub use user::repository::{RegistrationOutcome, UserRepository};

// Re-export services
pub use auth::auth_service::{AuthConfig, AuthService, TokenClaims};
pub use payment::gateway::{PaymentGateway, PaymentIntent, StubGateway};
pub use payment::operations::{EnrollCommand, EnrollmentOutcome, EnrollmentService};

// Re-export API states and routers
pub use auth::api::{auth_router, AuthApiState};
pub use cart::api::{carts_router, CartsState};
pub use course::api::{courses_router, CoursesState};
pub use payment::api::{payments_router, PaymentsState};
pub use user::api::{users_router, UsersState};
pub use shared::health_api::health_router;
