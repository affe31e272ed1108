//! Logout Use Case
//!
//! Invalidates a user session.

use std::sync::Arc;

use crate::application::config::AuthConfig;
use crate::application::session_token;
use crate::domain::repository::AuthSessionRepository;
use crate::error::AuthResult;

/// Logout use case
pub struct LogoutUseCase<S>
where
    S: AuthSessionRepository,
{
    session_repo: Arc<S>,
    config: Arc<AuthConfig>,
}

impl<S> LogoutUseCase<S>
where
    S: AuthSessionRepository,
{
    pub fn new(session_repo: Arc<S>, config: Arc<AuthConfig>) -> Self {
        Self {
            session_repo,
            config,
        }
    }

    /// Delete the session the token points at
    pub async fn execute(&self, session_token: &str) -> AuthResult<()> {
        let session_id = session_token::parse(&self.config.session_secret, session_token)?;
        self.session_repo.delete(session_id).await?;

        tracing::info!(session_id = %session_id, "User logged out");
        Ok(())
    }
}
