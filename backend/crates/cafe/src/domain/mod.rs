//! Domain Layer - Business logic and entities
//!
//! This layer contains:
//! - Domain entities (Cafe, NewCafe)
//! - Domain value objects (MapUrl, Rating and the three rating scales)
//! - Repository traits (interfaces)

pub mod entities;
pub mod repository;
pub mod value_objects;
