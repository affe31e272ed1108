//! CSRF Tokens
//!
//! Double-submit tokens for every state-changing form. A token is a random
//! nonce signed with the session secret; it travels once in the `cafe_csrf`
//! cookie and once in the hidden `csrf_token` field. A submission is
//! accepted only when both copies match and carry our signature.

use axum::http::{HeaderMap, HeaderValue, header};
use axum::response::{IntoResponse, Response};
use kernel::form::RawForm;

use crate::application::config::AuthConfig;

/// Hidden form field carrying the token
pub const CSRF_FIELD: &str = "csrf_token";

/// Shown above a form whose token was missing or stale
pub const CSRF_REJECTED_MESSAGE: &str = "The form has expired. Please submit it again.";

/// Random bytes in a nonce
const NONCE_LEN: usize = 24;

/// Token to embed in a rendered form
#[derive(Debug, Clone)]
pub struct CsrfToken {
    value: String,
    /// Present when the token was minted for this response
    set_cookie: Option<HeaderValue>,
}

impl CsrfToken {
    /// Reuse the browser's token while it still verifies, otherwise mint one
    pub fn issue(config: &AuthConfig, headers: &HeaderMap) -> Self {
        match cookie_token(config, headers) {
            Some(value) => Self {
                value,
                set_cookie: None,
            },
            None => Self::mint(config),
        }
    }

    /// Fresh token plus the cookie that carries it
    pub fn mint(config: &AuthConfig) -> Self {
        let nonce = platform::crypto::to_base64(&platform::crypto::random_bytes(NONCE_LEN));
        let value = platform::crypto::sign(&config.session_secret, &nonce);
        let set_cookie = platform::cookie::set_cookie_header(&config.csrf_cookie_config(), &value);
        if set_cookie.is_none() {
            tracing::warn!("CSRF cookie could not be encoded");
        }

        Self { value, set_cookie }
    }

    /// Whether a submitted form carries the token from the request's cookie
    pub fn verify(config: &AuthConfig, headers: &HeaderMap, raw: &RawForm) -> bool {
        let Some(expected) = cookie_token(config, headers) else {
            return false;
        };
        raw.get(CSRF_FIELD)
            .is_some_and(|submitted| submitted.as_str() == expected)
    }

    pub fn value(&self) -> &str {
        &self.value
    }

    /// Render `body`, attaching the cookie if this token is new
    pub fn respond(self, body: impl IntoResponse) -> Response {
        let mut response = body.into_response();
        if let Some(cookie) = self.set_cookie {
            response.headers_mut().append(header::SET_COOKIE, cookie);
        }
        response
    }
}

/// The cookie token, if it was signed with this server's secret
fn cookie_token(config: &AuthConfig, headers: &HeaderMap) -> Option<String> {
    platform::cookie::extract_cookie(headers, &config.csrf_cookie_name)
        .filter(|token| platform::crypto::verify_signed(&config.session_secret, token).is_some())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cookie_headers(config: &AuthConfig, token: &str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(
            header::COOKIE,
            HeaderValue::from_str(&format!("{}={}", config.csrf_cookie_name, token)).unwrap(),
        );
        headers
    }

    fn form_with(token: &str) -> RawForm {
        RawForm::from([(CSRF_FIELD.to_string(), token.to_string())])
    }

    #[test]
    fn test_mint_sets_cookie() {
        let config = AuthConfig::development();
        let token = CsrfToken::mint(&config);

        assert!(platform::crypto::verify_signed(&config.session_secret, token.value()).is_some());

        let response = token.clone().respond("form");
        let cookie = response.headers()[header::SET_COOKIE].to_str().unwrap();
        assert!(cookie.starts_with(&format!("cafe_csrf={}", token.value())));
        assert!(cookie.contains("HttpOnly"));
        assert!(!cookie.contains("Max-Age"));
    }

    #[test]
    fn test_issue_reuses_valid_cookie() {
        let config = AuthConfig::development();
        let minted = CsrfToken::mint(&config);
        let headers = cookie_headers(&config, minted.value());

        let issued = CsrfToken::issue(&config, &headers);
        assert_eq!(issued.value(), minted.value());
        assert!(!issued.respond("form").headers().contains_key(header::SET_COOKIE));
    }

    #[test]
    fn test_issue_replaces_foreign_cookie() {
        let config = AuthConfig::development();
        let other = AuthConfig::development();
        let foreign = CsrfToken::mint(&other);

        let issued = CsrfToken::issue(&config, &cookie_headers(&config, foreign.value()));
        assert_ne!(issued.value(), foreign.value());
        assert!(issued.respond("form").headers().contains_key(header::SET_COOKIE));
    }

    #[test]
    fn test_verify_requires_matching_signed_pair() {
        let config = AuthConfig::development();
        let token = CsrfToken::mint(&config);
        let headers = cookie_headers(&config, token.value());

        assert!(CsrfToken::verify(&config, &headers, &form_with(token.value())));

        // Missing field or missing cookie
        assert!(!CsrfToken::verify(&config, &headers, &RawForm::new()));
        assert!(!CsrfToken::verify(&config, &HeaderMap::new(), &form_with(token.value())));

        // A second valid token does not stand in for the cookie's
        let other = CsrfToken::mint(&config);
        assert!(!CsrfToken::verify(&config, &headers, &form_with(other.value())));

        // An attacker-chosen pair without our signature
        let forged = cookie_headers(&config, "nonce.c2lnbmF0dXJl");
        assert!(!CsrfToken::verify(&config, &forged, &form_with("nonce.c2lnbmF0dXJl")));
    }
}
