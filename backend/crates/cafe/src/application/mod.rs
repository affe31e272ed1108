//! Application Layer
//!
//! Use cases for the cafe catalogue.

pub mod add_cafe;
pub mod list_cafes;
pub mod search_cafes;

// Re-exports
pub use add_cafe::{ADD_SUCCESS_MESSAGE, AddCafeOutput, AddCafeUseCase};
pub use list_cafes::ListCafesUseCase;
pub use search_cafes::SearchCafesUseCase;
