//! Search Cafes Use Case
//!
//! Substring match against cafe name or city.

use std::sync::Arc;

use kernel::form::{FieldError, FormErrors, REQUIRED_MESSAGE};

use crate::domain::entities::Cafe;
use crate::domain::repository::CafeRepository;
use crate::error::{CafeError, CafeResult};

pub struct SearchCafesUseCase<C>
where
    C: CafeRepository,
{
    cafe_repo: Arc<C>,
}

impl<C> SearchCafesUseCase<C>
where
    C: CafeRepository,
{
    pub fn new(cafe_repo: Arc<C>) -> Self {
        Self { cafe_repo }
    }

    /// A blank query is rejected; it would otherwise match every cafe
    pub async fn execute(&self, query: &str) -> CafeResult<Vec<Cafe>> {
        let query = query.trim();
        if query.is_empty() {
            return Err(CafeError::Validation(FormErrors::single(
                "search",
                FieldError::new("name", REQUIRED_MESSAGE),
            )));
        }

        let results = self.cafe_repo.search(query).await?;
        tracing::debug!(query = %query, matches = results.len(), "Cafe search");

        Ok(results)
    }
}
