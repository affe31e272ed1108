//! Presentation Layer
//!
//! HTTP handlers, form schemas, router and views.

pub mod dto;
pub mod handlers;
pub mod router;
pub mod views;

pub use handlers::CafeAppState;
pub use router::{cafe_router, cafe_router_generic};
