//! Shared infrastructure for the Encore enrollment platform.
//!
//! Currently hosts the logging setup used by every binary. Domain types
//! live in `encore-platform`; this crate must stay dependency-light so
//! auxiliary tools can use it without pulling in the web stack.

pub mod logging;
