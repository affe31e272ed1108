//! Cafe Catalogue Backend Module
//!
//! Clean Architecture structure:
//! - `domain/` - Entities, rating scales, repository trait
//! - `application/` - Use cases
//! - `infra/` - Database implementations
//! - `presentation/` - HTTP handlers, form schemas, router, views
//!
//! Cafes are create-and-read only: there is no update or delete. Adding a
//! cafe requires a logged-in user and a CSRF token; both come from the
//! `auth` crate.

pub mod application;
pub mod domain;
pub mod error;
pub mod infra;
pub mod presentation;


// Re-exports for convenience
pub use error::{CafeError, CafeResult};
pub use infra::sqlite::SqliteCafeRepository;
pub use presentation::router::cafe_router;
