//! Cafe Router

use auth::domain::repository::{AuthSessionRepository, CredentialStore};
use auth::presentation::{AuthAppState, require_auth_session};
use auth::SqliteAuthRepository;
use axum::{Router, middleware, routing::get};

use crate::domain::repository::CafeRepository;
use crate::infra::sqlite::SqliteCafeRepository;
use crate::presentation::handlers::{self, CafeAppState};

/// Create the Cafe router with the SQLite repositories
pub fn cafe_router(
    repo: SqliteCafeRepository,
    auth_state: AuthAppState<SqliteAuthRepository>,
) -> Router {
    let state = CafeAppState::new(repo, auth_state.config.clone());
    cafe_router_generic(state, auth_state)
}

/// Create a generic Cafe router.
///
/// `auth_state` only backs the session gate on `/add`.
pub fn cafe_router_generic<C, R>(state: CafeAppState<C>, auth_state: AuthAppState<R>) -> Router
where
    C: CafeRepository + Clone + Send + Sync + 'static,
    R: CredentialStore + AuthSessionRepository + Clone + Send + Sync + 'static,
{
    let protected = Router::new()
        .route("/add", get(handlers::add_page::<C>).post(handlers::add::<C>))
        .route_layer(middleware::from_fn_with_state(
            auth_state,
            require_auth_session::<R>,
        ));

    Router::new()
        .route("/cafes", get(handlers::cafes::<C>))
        .route(
            "/search",
            get(handlers::search_page).post(handlers::search::<C>),
        )
        .merge(protected)
        .with_state(state)
}
