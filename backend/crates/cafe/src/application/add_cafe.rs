//! Add Cafe Use Case

use std::sync::Arc;

use crate::domain::entities::{Cafe, NewCafe};
use crate::domain::repository::CafeRepository;
use crate::error::CafeResult;

/// Acknowledgment returned to the client after a successful add
pub const ADD_SUCCESS_MESSAGE: &str = "Successfully added the new cafe.";

/// Output DTO for add cafe
#[derive(Debug, Clone)]
pub struct AddCafeOutput {
    pub cafe: Cafe,
    pub message: &'static str,
}

/// Add Cafe Use Case
pub struct AddCafeUseCase<C>
where
    C: CafeRepository,
{
    cafe_repo: Arc<C>,
}

impl<C> AddCafeUseCase<C>
where
    C: CafeRepository,
{
    pub fn new(cafe_repo: Arc<C>) -> Self {
        Self { cafe_repo }
    }

    pub async fn execute(&self, new_cafe: NewCafe) -> CafeResult<AddCafeOutput> {
        let cafe = self.cafe_repo.add(new_cafe).await?;

        tracing::info!(
            cafe_id = %cafe.id,
            name = %cafe.name,
            city = %cafe.city_name,
            "Cafe added"
        );

        Ok(AddCafeOutput {
            cafe,
            message: ADD_SUCCESS_MESSAGE,
        })
    }
}
