//! Application Layer
//!
//! Use cases and application services.

pub mod check_session;
pub mod config;
pub mod establish_session;
pub mod login;
pub mod logout;
pub mod register;
pub mod session_token;

// Re-exports
pub use check_session::{CheckSessionUseCase, CurrentUser};
pub use config::AuthConfig;
pub use establish_session::establish_session;
pub use login::{LoginInput, LoginOutput, LoginUseCase};
pub use logout::LogoutUseCase;
pub use register::{RegisterInput, RegisterOutput, RegisterUseCase};
