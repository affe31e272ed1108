//! Server Configuration
//!
//! Read once at startup from the environment (and `.env` via `dotenvy`).

use std::net::SocketAddr;

use anyhow::{Context, bail, ensure};
use auth::AuthConfig;
use base64::Engine;
use base64::engine::general_purpose;

pub const DEFAULT_DATABASE_URL: &str = "sqlite://cafes.db?mode=rwc";
pub const DEFAULT_LISTEN_ADDR: &str = "127.0.0.1:5000";

#[derive(Debug, Clone)]
pub struct ApiConfig {
    pub database_url: String,
    pub listen_addr: SocketAddr,
    pub auth: AuthConfig,
}

impl ApiConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok(), cfg!(debug_assertions))
    }

    /// `development` relaxes the secret requirement and defaults cookies to
    /// non-Secure so the app runs over plain HTTP on localhost.
    pub fn from_lookup<F>(lookup: F, development: bool) -> anyhow::Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let database_url =
            lookup("DATABASE_URL").unwrap_or_else(|| DEFAULT_DATABASE_URL.to_string());

        let listen_addr = lookup("LISTEN_ADDR")
            .unwrap_or_else(|| DEFAULT_LISTEN_ADDR.to_string())
            .parse()
            .context("LISTEN_ADDR must be a socket address such as 127.0.0.1:5000")?;

        let mut auth = match lookup("SESSION_SECRET") {
            Some(secret_b64) => AuthConfig {
                session_secret: decode_secret(&secret_b64)?,
                ..AuthConfig::default()
            },
            None if development => {
                tracing::warn!("SESSION_SECRET not set, using a random secret; sessions end on restart");
                AuthConfig::with_random_secret()
            }
            None => bail!("SESSION_SECRET must be set in production"),
        };

        auth.cookie_secure = match lookup("COOKIE_SECURE") {
            Some(value) => parse_bool(&value).context("COOKIE_SECURE must be true or false")?,
            None => !development,
        };

        auth.password_pepper = lookup("PASSWORD_PEPPER")
            .filter(|p| !p.is_empty())
            .map(String::into_bytes);

        Ok(Self {
            database_url,
            listen_addr,
            auth,
        })
    }
}

fn decode_secret(secret_b64: &str) -> anyhow::Result<[u8; 32]> {
    let bytes = general_purpose::STANDARD
        .decode(secret_b64.trim())
        .context("SESSION_SECRET must be base64")?;
    ensure!(
        bytes.len() == 32,
        "SESSION_SECRET must decode to 32 bytes (got {})",
        bytes.len()
    );

    let mut secret = [0u8; 32];
    secret.copy_from_slice(&bytes);
    Ok(secret)
}

fn parse_bool(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}
