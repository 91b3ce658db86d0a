//! Cart Aggregate
//!
//! Pending course selections prior to payment.

pub mod api;
pub mod entity;
pub mod repository;

pub use api::{carts_router, CartsState};
pub use entity::CartEntry;
pub use repository::CartRepository;
