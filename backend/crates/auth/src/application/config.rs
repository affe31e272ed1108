//! Application Configuration
//!
//! Configuration for the Auth application layer.

use std::time::Duration;

use platform::cookie::CookieConfig;
/// Re-export SameSite from platform
pub use platform::cookie::SameSite;

/// Auth application configuration
#[derive(Debug, Clone)]
pub struct AuthConfig {
    /// Session cookie name
    pub session_cookie_name: String,
    /// Cookie carrying the signed CSRF token
    pub csrf_cookie_name: String,
    /// Session secret key for HMAC signing (32 bytes)
    pub session_secret: [u8; 32],
    /// Session lifetime, also the cookie Max-Age (12 hours)
    pub session_ttl: Duration,
    /// Whether to require Secure cookie
    pub cookie_secure: bool,
    /// SameSite policy
    pub cookie_same_site: SameSite,
    /// Password pepper (optional, application-wide secret)
    pub password_pepper: Option<Vec<u8>>,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            session_cookie_name: "cafe_session".to_string(),
            csrf_cookie_name: "cafe_csrf".to_string(),
            session_secret: [0u8; 32],
            session_ttl: Duration::from_secs(12 * 3600),
            cookie_secure: true,
            cookie_same_site: SameSite::Lax,
            password_pepper: None,
        }
    }
}

impl AuthConfig {
    /// Create config with a random session secret (for development)
    pub fn with_random_secret() -> Self {
        Self {
            session_secret: platform::crypto::random_key(),
            ..Default::default()
        }
    }

    /// Create config for development (insecure cookie)
    pub fn development() -> Self {
        Self {
            cookie_secure: false,
            ..Self::with_random_secret()
        }
    }

    /// Get session TTL in milliseconds
    pub fn session_ttl_ms(&self) -> i64 {
        self.session_ttl.as_millis() as i64
    }

    /// Session TTL as a chrono duration for entity arithmetic
    pub fn session_ttl_chrono(&self) -> chrono::Duration {
        chrono::Duration::milliseconds(self.session_ttl_ms())
    }

    /// Cookie attributes for the session cookie
    pub fn cookie_config(&self) -> CookieConfig {
        CookieConfig {
            name: self.session_cookie_name.clone(),
            secure: self.cookie_secure,
            http_only: true,
            same_site: self.cookie_same_site,
            path: "/".to_string(),
            max_age_secs: Some(self.session_ttl.as_secs()),
        }
    }

    /// Cookie attributes for the CSRF cookie; lives for the browser session
    pub fn csrf_cookie_config(&self) -> CookieConfig {
        CookieConfig {
            name: self.csrf_cookie_name.clone(),
            max_age_secs: None,
            ..self.cookie_config()
        }
    }

    /// Get password pepper as slice
    pub fn pepper(&self) -> Option<&[u8]> {
        self.password_pepper.as_deref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = AuthConfig::default();

        assert_eq!(config.session_cookie_name, "cafe_session");
        assert_eq!(config.session_ttl, Duration::from_secs(43_200));
        assert_eq!(config.session_ttl_ms(), 43_200_000);
        assert!(config.cookie_secure);
        assert_eq!(config.cookie_same_site, SameSite::Lax);
        assert!(config.pepper().is_none());
    }

    #[test]
    fn test_with_random_secret() {
        let config1 = AuthConfig::with_random_secret();
        let config2 = AuthConfig::with_random_secret();

        assert_ne!(config1.session_secret, config2.session_secret);
        assert!(config1.session_secret.iter().any(|&b| b != 0));
    }

    #[test]
    fn test_development_config() {
        let config = AuthConfig::development();

        assert!(!config.cookie_secure);
        assert!(!config.cookie_config().secure);
    }

    #[test]
    fn test_cookie_config_matches_session() {
        let cookie = AuthConfig::default().cookie_config();

        assert_eq!(cookie.name, "cafe_session");
        assert!(cookie.http_only);
        assert_eq!(cookie.path, "/");
        assert_eq!(cookie.max_age_secs, Some(43_200));
    }

    #[test]
    fn test_csrf_cookie_is_a_browser_session_cookie() {
        let config = AuthConfig::development();
        let cookie = config.csrf_cookie_config();

        assert_eq!(cookie.name, "cafe_csrf");
        assert!(cookie.http_only);
        assert!(!cookie.secure);
        assert_eq!(cookie.max_age_secs, None);
    }
}
