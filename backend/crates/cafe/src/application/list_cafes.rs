//! List Cafes Use Case

use std::sync::Arc;

use crate::domain::entities::Cafe;
use crate::domain::repository::CafeRepository;
use crate::error::CafeResult;

pub struct ListCafesUseCase<C>
where
    C: CafeRepository,
{
    cafe_repo: Arc<C>,
}

impl<C> ListCafesUseCase<C>
where
    C: CafeRepository,
{
    pub fn new(cafe_repo: Arc<C>) -> Self {
        Self { cafe_repo }
    }

    pub async fn execute(&self) -> CafeResult<Vec<Cafe>> {
        self.cafe_repo.list_all().await
    }
}
