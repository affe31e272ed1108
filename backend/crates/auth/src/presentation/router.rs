//! Auth Router

use axum::{Router, middleware, routing::get};

use crate::domain::repository::{AuthSessionRepository, CredentialStore};
use crate::infra::sqlite::SqliteAuthRepository;
use crate::presentation::handlers::{self, AuthAppState};
use crate::presentation::middleware::require_auth_session;

/// Create the Auth router with the SQLite repository
pub fn auth_router(state: AuthAppState<SqliteAuthRepository>) -> Router {
    auth_router_generic(state)
}

/// Create a generic Auth router for any repository implementation
pub fn auth_router_generic<R>(state: AuthAppState<R>) -> Router
where
    R: CredentialStore + AuthSessionRepository + Clone + Send + Sync + 'static,
{
    let protected = Router::new()
        .route("/logout", get(handlers::logout::<R>))
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            require_auth_session::<R>,
        ));

    Router::new()
        .route("/login", get(handlers::login_page::<R>).post(handlers::login::<R>))
        .route(
            "/register",
            get(handlers::register_page::<R>).post(handlers::register::<R>),
        )
        .merge(protected)
        .with_state(state)
}
