//! Auth (Authentication) Backend Module
//!
//! Clean Architecture structure:
//! - `domain/` - Business logic, entities, repository traits
//! - `application/` - Use cases and application services
//! - `infra/` - Database implementations
//! - `presentation/` - HTTP handlers, form schemas, router, views
//!
//! ## Features
//! - Registration with display name, email and password
//! - Login by email + password
//! - Server-side sessions with HMAC-signed cookie tokens
//! - `require_auth_session` middleware for protected routes in other crates
//!
//! ## Security Model
//! - Passwords hashed with Argon2id and a per-user salt (optional pepper)
//! - Failed logins never reveal whether the email exists

pub mod application;
pub mod domain;
pub mod error;
pub mod infra;
pub mod presentation;


// Re-exports for convenience
pub use application::config::AuthConfig;
pub use application::CurrentUser;
pub use error::{AuthError, AuthResult};
pub use infra::sqlite::SqliteAuthRepository;
pub use presentation::router::auth_router;
