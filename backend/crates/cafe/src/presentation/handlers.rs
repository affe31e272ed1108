//! HTTP Handlers

use auth::presentation::csrf::{CSRF_REJECTED_MESSAGE, CsrfToken};
use auth::{AuthConfig, CurrentUser};
use axum::extract::State;
use axum::http::{HeaderMap, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::{Extension, Form, Json};
use kernel::form::{FormErrors, RawForm};
use std::sync::Arc;

use crate::application::{AddCafeUseCase, ListCafesUseCase, SearchCafesUseCase};
use crate::domain::entities::NewCafe;
use crate::domain::repository::CafeRepository;
use crate::error::{CafeError, CafeResult};
use crate::presentation::dto::{ADD_CAFE_FORM, AddCafeResponse, SEARCH_FORM};
use crate::presentation::views::{AddCafeTemplate, CafesTemplate, SearchTemplate};

/// Shared state for cafe handlers
#[derive(Clone)]
pub struct CafeAppState<C>
where
    C: CafeRepository + Clone + Send + Sync + 'static,
{
    pub repo: Arc<C>,
    /// Secret and cookie names for CSRF tokens
    pub auth_config: Arc<AuthConfig>,
}

impl<C> CafeAppState<C>
where
    C: CafeRepository + Clone + Send + Sync + 'static,
{
    pub fn new(repo: C, auth_config: Arc<AuthConfig>) -> Self {
        Self {
            repo: Arc::new(repo),
            auth_config,
        }
    }
}

// ============================================================================
// Add
// ============================================================================

/// GET /add
pub async fn add_page<C>(
    State(state): State<CafeAppState<C>>,
    Extension(user): Extension<CurrentUser>,
    headers: HeaderMap,
) -> Response
where
    C: CafeRepository + Clone + Send + Sync + 'static,
{
    let csrf = CsrfToken::issue(&state.auth_config, &headers);
    let template = AddCafeTemplate::empty(csrf.value().to_string(), user.name);
    csrf.respond(template)
}

/// POST /add
pub async fn add<C>(
    State(state): State<CafeAppState<C>>,
    Extension(user): Extension<CurrentUser>,
    headers: HeaderMap,
    Form(raw): Form<RawForm>,
) -> CafeResult<Response>
where
    C: CafeRepository + Clone + Send + Sync + 'static,
{
    let csrf = CsrfToken::issue(&state.auth_config, &headers);
    let rerender = |status: StatusCode,
                    error: Option<&'static str>,
                    errors: Option<FormErrors>| {
        let template = AddCafeTemplate {
            csrf_token: csrf.value().to_string(),
            user_name: user.name.clone(),
            values: raw.clone(),
            error,
            errors,
        };
        csrf.clone().respond((status, template))
    };

    if !CsrfToken::verify(&state.auth_config, &headers, &raw) {
        tracing::warn!(user_id = %user.user_id, form = ADD_CAFE_FORM.name(), "CSRF token rejected");
        return Ok(rerender(StatusCode::FORBIDDEN, Some(CSRF_REJECTED_MESSAGE), None));
    }

    let new_cafe = match ADD_CAFE_FORM.validate(&raw) {
        Ok(form) => NewCafe::try_from(form)?,
        Err(errors) => return Ok(rerender(StatusCode::UNPROCESSABLE_ENTITY, None, Some(errors))),
    };

    let output = AddCafeUseCase::new(state.repo.clone())
        .execute(new_cafe)
        .await?;
    tracing::debug!(user_id = %user.user_id, cafe_id = %output.cafe.id, "Add acknowledged");

    Ok(Json(AddCafeResponse::success(output.message)).into_response())
}

// ============================================================================
// Cafes
// ============================================================================

/// GET /cafes
pub async fn cafes<C>(State(state): State<CafeAppState<C>>) -> CafeResult<CafesTemplate>
where
    C: CafeRepository + Clone + Send + Sync + 'static,
{
    let use_case = ListCafesUseCase::new(state.repo.clone());
    let cafes = use_case.execute().await?;

    Ok(CafesTemplate { cafes })
}

// ============================================================================
// Search
// ============================================================================

/// GET /search
pub async fn search_page() -> impl IntoResponse {
    SearchTemplate::empty()
}

/// POST /search
pub async fn search<C>(
    State(state): State<CafeAppState<C>>,
    Form(raw): Form<RawForm>,
) -> CafeResult<Response>
where
    C: CafeRepository + Clone + Send + Sync + 'static,
{
    let rerender = |query: String, errors| {
        let template = SearchTemplate {
            query,
            results: None,
            errors: Some(errors),
        };
        (StatusCode::UNPROCESSABLE_ENTITY, template).into_response()
    };

    let mut form = match SEARCH_FORM.validate(&raw) {
        Ok(form) => form,
        Err(errors) => return Ok(rerender(String::new(), errors)),
    };
    let query = form.take("name");

    let use_case = SearchCafesUseCase::new(state.repo.clone());

    match use_case.execute(&query).await {
        Ok(results) => Ok(SearchTemplate {
            query,
            results: Some(results),
            errors: None,
        }
        .into_response()),
        Err(CafeError::Validation(errors)) => Ok(rerender(query, errors)),
        Err(e) => Err(e),
    }
}
