//! Auth Middleware
//!
//! Middleware for requiring authentication on protected routes.

use axum::extract::{Request, State};
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};

use crate::application::{CheckSessionUseCase, CurrentUser};
use crate::domain::repository::{AuthSessionRepository, CredentialStore};
use crate::error::{AuthError, AuthResult};
use crate::presentation::handlers::AuthAppState;

/// Authentication status stored in request extensions
#[derive(Debug, Clone, Default)]
pub struct AuthStatus {
    pub is_authenticated: bool,
    pub user_name: Option<String>,
}

/// Middleware that requires a valid auth session.
///
/// Anonymous requests are redirected to the login page; otherwise the
/// [`CurrentUser`] is inserted into request extensions.
pub async fn require_auth_session<R>(
    State(state): State<AuthAppState<R>>,
    mut req: Request,
    next: Next,
) -> Response
where
    R: CredentialStore + AuthSessionRepository + Clone + Send + Sync + 'static,
{
    let token = session_token(&state, &req);
    match resolve_user(&state, token).await {
        Ok(Some(user)) => {
            req.extensions_mut().insert(user);
            next.run(req).await
        }
        Ok(None) | Err(AuthError::SessionInvalid) => AuthError::AuthRequired.into_response(),
        Err(e) => e.into_response(),
    }
}

/// Middleware that checks auth session but doesn't require it
pub async fn check_auth_session<R>(
    State(state): State<AuthAppState<R>>,
    mut req: Request,
    next: Next,
) -> Response
where
    R: CredentialStore + AuthSessionRepository + Clone + Send + Sync + 'static,
{
    let token = session_token(&state, &req);
    let status = match resolve_user(&state, token).await {
        Ok(Some(user)) => AuthStatus {
            is_authenticated: true,
            user_name: Some(user.name),
        },
        Ok(None) | Err(AuthError::SessionInvalid) => AuthStatus::default(),
        Err(e) => {
            tracing::warn!(error = %e, "Session lookup failed, treating request as anonymous");
            AuthStatus::default()
        }
    };

    req.extensions_mut().insert(status);

    next.run(req).await
}

fn session_token<R>(state: &AuthAppState<R>, req: &Request) -> Option<String>
where
    R: CredentialStore + AuthSessionRepository + Clone + Send + Sync + 'static,
{
    platform::cookie::extract_cookie(req.headers(), &state.config.session_cookie_name)
}

/// `Ok(None)` when no session cookie was sent
async fn resolve_user<R>(
    state: &AuthAppState<R>,
    token: Option<String>,
) -> AuthResult<Option<CurrentUser>>
where
    R: CredentialStore + AuthSessionRepository + Clone + Send + Sync + 'static,
{
    let Some(token) = token else {
        return Ok(None);
    };

    let use_case = CheckSessionUseCase::new(state.repo.clone(), state.config.clone());
    use_case.execute(&token).await.map(Some)
}
