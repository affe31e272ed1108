//! Cafe & Wifi web application
//!
//! Composes the auth and cafe routers over one SQLite pool. Kept apart
//! from `main.rs` so the full router can be driven from tests.

pub mod config;

use askama::Template;
use askama_web::WebTemplate;
use auth::presentation::{AuthAppState, AuthStatus, check_auth_session};
use auth::{AuthConfig, SqliteAuthRepository, auth_router};
use axum::{Extension, Router, middleware, routing::get};
use cafe::{SqliteCafeRepository, cafe_router};
use sqlx::SqlitePool;
use tower_http::trace::TraceLayer;

/// Landing page
#[derive(Template, WebTemplate)]
#[template(path = "index.html")]
pub struct IndexTemplate {
    pub status: AuthStatus,
}

/// GET /
async fn home(Extension(status): Extension<AuthStatus>) -> IndexTemplate {
    IndexTemplate { status }
}

/// Build the application router
pub fn build_app(pool: SqlitePool, auth_config: AuthConfig) -> Router {
    let auth_state = AuthAppState::new(SqliteAuthRepository::new(pool.clone()), auth_config);

    let landing = Router::new()
        .route("/", get(home))
        .route_layer(middleware::from_fn_with_state(
            auth_state.clone(),
            check_auth_session::<SqliteAuthRepository>,
        ));

    Router::new()
        .merge(landing)
        .merge(auth_router(auth_state.clone()))
        .merge(cafe_router(SqliteCafeRepository::new(pool), auth_state))
        .layer(TraceLayer::new_for_http())
}
