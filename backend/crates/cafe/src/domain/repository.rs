//! Repository Traits
//!
//! Interfaces for data persistence. Implementation is in infrastructure layer.

use crate::domain::entities::{Cafe, NewCafe};
use crate::error::CafeResult;

/// Cafe repository trait
#[trait_variant::make(CafeRepository: Send)]
pub trait LocalCafeRepository {
    /// Persist a validated cafe and return it with its id
    async fn add(&self, cafe: NewCafe) -> CafeResult<Cafe>;

    /// Every cafe, oldest first
    async fn list_all(&self) -> CafeResult<Vec<Cafe>>;

    /// Cafes whose name or city contains `query` (ASCII case-insensitive),
    /// oldest first. `%`, `_` and `\` match literally.
    async fn search(&self, query: &str) -> CafeResult<Vec<Cafe>>;
}
