//! tb-core: shared types, errors, configuration, and pagination.
//!
//! This crate is the foundational dependency for the other tb-* crates,
//! providing the announcement domain model, a unified error type, the
//! application configuration, and page arithmetic for listings.

pub mod config;
pub mod error;
pub mod models;
pub mod pagination;

// Re-export the most commonly used items at the crate root.
pub use error::{Error, Result};
pub use models::*;
pub use pagination::{Page, PageRequest};
