//! Infrastructure Layer
//!
//! Database implementations.

pub mod sqlite;

pub use sqlite::SqliteCafeRepository;
