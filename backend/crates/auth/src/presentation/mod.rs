//! Presentation Layer
//!
//! HTTP handlers, form schemas, CSRF tokens, router, middleware and views.

pub mod csrf;
pub mod dto;
pub mod handlers;
pub mod middleware;
pub mod router;
pub mod views;

pub use csrf::{CSRF_FIELD, CsrfToken};
pub use handlers::AuthAppState;
pub use middleware::{AuthStatus, check_auth_session, require_auth_session};
pub use router::{auth_router, auth_router_generic};
