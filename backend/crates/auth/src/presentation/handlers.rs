//! HTTP Handlers

use axum::Form;
use axum::extract::{Query, State};
use axum::http::{HeaderMap, StatusCode, header};
use axum::response::{IntoResponse, Redirect, Response};
use kernel::form::{FieldError, FormErrors, RawForm};
use std::sync::Arc;

use crate::application::config::AuthConfig;
use crate::application::{LoginInput, LoginUseCase, LogoutUseCase, RegisterInput, RegisterUseCase};
use crate::domain::repository::{AuthSessionRepository, CredentialStore};
use crate::error::{AuthError, AuthResult, LOGIN_PATH};
use crate::presentation::csrf::{CSRF_REJECTED_MESSAGE, CsrfToken};
use crate::presentation::dto::{
    DUPLICATE_NAME_MESSAGE, INVALID_CREDENTIALS_MESSAGE, LOGIN_FORM, Notice, NoticeQuery,
    REGISTER_FORM,
};
use crate::presentation::views::{LoginTemplate, RegisterTemplate};

/// Landing page after register/login
pub const AFTER_LOGIN_PATH: &str = "/add";

/// Shared state for auth handlers
#[derive(Clone)]
pub struct AuthAppState<R>
where
    R: CredentialStore + AuthSessionRepository + Clone + Send + Sync + 'static,
{
    pub repo: Arc<R>,
    pub config: Arc<AuthConfig>,
}

impl<R> AuthAppState<R>
where
    R: CredentialStore + AuthSessionRepository + Clone + Send + Sync + 'static,
{
    pub fn new(repo: R, config: AuthConfig) -> Self {
        Self {
            repo: Arc::new(repo),
            config: Arc::new(config),
        }
    }
}

// ============================================================================
// Login
// ============================================================================

/// GET /login
pub async fn login_page<R>(
    State(state): State<AuthAppState<R>>,
    headers: HeaderMap,
    Query(query): Query<NoticeQuery>,
) -> Response
where
    R: CredentialStore + AuthSessionRepository + Clone + Send + Sync + 'static,
{
    let csrf = CsrfToken::issue(&state.config, &headers);
    let template = LoginTemplate::new(csrf.value().to_string(), query.notice().map(|n| n.message()));
    csrf.respond(template)
}

/// POST /login
pub async fn login<R>(
    State(state): State<AuthAppState<R>>,
    headers: HeaderMap,
    Form(raw): Form<RawForm>,
) -> AuthResult<Response>
where
    R: CredentialStore + AuthSessionRepository + Clone + Send + Sync + 'static,
{
    let csrf = CsrfToken::issue(&state.config, &headers);
    let rerender = |status: StatusCode,
                    error: Option<&'static str>,
                    errors: Option<FormErrors>| {
        let template = LoginTemplate {
            csrf_token: csrf.value().to_string(),
            email: submitted(&raw, "email"),
            notice: None,
            error,
            errors,
        };
        csrf.clone().respond((status, template))
    };

    if !CsrfToken::verify(&state.config, &headers, &raw) {
        tracing::warn!(form = LOGIN_FORM.name(), "CSRF token rejected");
        return Ok(rerender(StatusCode::FORBIDDEN, Some(CSRF_REJECTED_MESSAGE), None));
    }

    let mut form = match LOGIN_FORM.validate(&raw) {
        Ok(form) => form,
        Err(errors) => return Ok(rerender(StatusCode::UNPROCESSABLE_ENTITY, None, Some(errors))),
    };

    let use_case = LoginUseCase::new(state.repo.clone(), state.config.clone());

    let input = LoginInput {
        email: form.take("email"),
        password: form.take("password"),
    };

    match use_case.execute(input).await {
        Ok(output) => session_redirect(&state.config, &output.session_token),
        Err(AuthError::InvalidCredentials) => Ok(rerender(
            StatusCode::UNAUTHORIZED,
            Some(INVALID_CREDENTIALS_MESSAGE),
            None,
        )),
        Err(e) => Err(e),
    }
}

// ============================================================================
// Register
// ============================================================================

/// GET /register
pub async fn register_page<R>(State(state): State<AuthAppState<R>>, headers: HeaderMap) -> Response
where
    R: CredentialStore + AuthSessionRepository + Clone + Send + Sync + 'static,
{
    let csrf = CsrfToken::issue(&state.config, &headers);
    let template = RegisterTemplate::empty(csrf.value().to_string());
    csrf.respond(template)
}

/// POST /register
pub async fn register<R>(
    State(state): State<AuthAppState<R>>,
    headers: HeaderMap,
    Form(raw): Form<RawForm>,
) -> AuthResult<Response>
where
    R: CredentialStore + AuthSessionRepository + Clone + Send + Sync + 'static,
{
    let csrf = CsrfToken::issue(&state.config, &headers);
    let rerender = |status: StatusCode,
                    error: Option<&'static str>,
                    errors: Option<FormErrors>| {
        let template = RegisterTemplate {
            csrf_token: csrf.value().to_string(),
            name: submitted(&raw, "name"),
            email: submitted(&raw, "email"),
            error,
            errors,
        };
        csrf.clone().respond((status, template))
    };
    let field_errors = |errors: FormErrors| rerender(StatusCode::UNPROCESSABLE_ENTITY, None, Some(errors));

    if !CsrfToken::verify(&state.config, &headers, &raw) {
        tracing::warn!(form = REGISTER_FORM.name(), "CSRF token rejected");
        return Ok(rerender(StatusCode::FORBIDDEN, Some(CSRF_REJECTED_MESSAGE), None));
    }

    let mut form = match REGISTER_FORM.validate(&raw) {
        Ok(form) => form,
        Err(errors) => return Ok(field_errors(errors)),
    };

    let use_case = RegisterUseCase::new(state.repo.clone(), state.config.clone());

    let input = RegisterInput {
        name: form.take("name"),
        email: form.take("email"),
        password: form.take("password"),
    };

    match use_case.execute(input).await {
        Ok(output) => session_redirect(&state.config, &output.session_token),
        Err(AuthError::DuplicateEmail) => {
            let location = format!("{LOGIN_PATH}?notice={}", Notice::EmailRegistered.as_query());
            Ok(Redirect::to(&location).into_response())
        }
        Err(AuthError::DuplicateName) => Ok(field_errors(FormErrors::single(
            REGISTER_FORM.name(),
            FieldError::new("name", DUPLICATE_NAME_MESSAGE),
        ))),
        Err(AuthError::PasswordPolicy(message)) => Ok(field_errors(FormErrors::single(
            REGISTER_FORM.name(),
            FieldError::new("password", message),
        ))),
        Err(AuthError::Validation(errors)) => Ok(field_errors(errors)),
        Err(e) => Err(e),
    }
}

// ============================================================================
// Logout
// ============================================================================

/// GET /logout
pub async fn logout<R>(State(state): State<AuthAppState<R>>, headers: HeaderMap) -> AuthResult<Response>
where
    R: CredentialStore + AuthSessionRepository + Clone + Send + Sync + 'static,
{
    let token = platform::cookie::extract_cookie(&headers, &state.config.session_cookie_name);

    if let Some(token) = token {
        let use_case = LogoutUseCase::new(state.repo.clone(), state.config.clone());
        // The cookie is cleared either way
        if let Err(e) = use_case.execute(&token).await {
            tracing::warn!(error = %e, "Failed to delete session on logout");
        }
    }

    let cookie = platform::cookie::delete_cookie_header(&state.config.cookie_config())
        .ok_or_else(|| AuthError::Internal("Invalid session cookie attributes".to_string()))?;

    Ok(([(header::SET_COOKIE, cookie)], Redirect::to("/")).into_response())
}

// ============================================================================
// Helper Functions
// ============================================================================

/// Set the session cookie and continue to the add-cafe page
fn session_redirect(config: &AuthConfig, token: &str) -> AuthResult<Response> {
    let cookie = platform::cookie::set_cookie_header(&config.cookie_config(), token)
        .ok_or_else(|| AuthError::Internal("Invalid session cookie value".to_string()))?;

    Ok(([(header::SET_COOKIE, cookie)], Redirect::to(AFTER_LOGIN_PATH)).into_response())
}

/// Raw submitted value, trimmed, for echoing back into a form
fn submitted(raw: &RawForm, field: &str) -> String {
    raw.get(field).map(|v| v.trim().to_string()).unwrap_or_default()
}
