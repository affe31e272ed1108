//! Check Session Use Case
//!
//! Resolves a session cookie to the logged-in user.

use std::sync::Arc;

use kernel::id::UserId;

use crate::application::config::AuthConfig;
use crate::application::session_token;
use crate::domain::entity::auth_session::AuthSession;
use crate::domain::repository::{AuthSessionRepository, CredentialStore};
use crate::error::{AuthError, AuthResult};

/// Logged-in user, stored in request extensions by the auth middleware
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CurrentUser {
    pub user_id: UserId,
    pub name: String,
    pub email: String,
}

/// Check session use case
pub struct CheckSessionUseCase<R>
where
    R: CredentialStore + AuthSessionRepository + Send + Sync + 'static,
{
    repo: Arc<R>,
    config: Arc<AuthConfig>,
}

impl<R> CheckSessionUseCase<R>
where
    R: CredentialStore + AuthSessionRepository + Send + Sync + 'static,
{
    pub fn new(repo: Arc<R>, config: Arc<AuthConfig>) -> Self {
        Self { repo, config }
    }

    /// Resolve the token to the user it belongs to
    pub async fn execute(&self, session_token: &str) -> AuthResult<CurrentUser> {
        let session = self.get_session(session_token).await?;

        // Orphaned session rows resolve to anonymous
        let user = CredentialStore::find_by_id(self.repo.as_ref(), session.user_id)
            .await?
            .ok_or(AuthError::SessionInvalid)?;

        Ok(CurrentUser {
            user_id: user.id,
            name: user.name.as_str().to_string(),
            email: user.email.as_str().to_string(),
        })
    }

    /// Get session and update last activity
    async fn get_session(&self, session_token: &str) -> AuthResult<AuthSession> {
        let session_id = session_token::parse(&self.config.session_secret, session_token)?;

        let mut session = AuthSessionRepository::find_by_id(self.repo.as_ref(), session_id)
            .await?
            .ok_or(AuthError::SessionInvalid)?;

        if session.is_expired() {
            self.repo.delete(session_id).await?;
            return Err(AuthError::SessionInvalid);
        }

        session.touch();

        // Update in background
        let session_clone = session.clone();
        let repo = self.repo.clone();
        tokio::spawn(async move {
            if let Err(e) = repo.update(&session_clone).await {
                tracing::warn!(error = %e, "Failed to update session activity");
            }
        });

        Ok(session)
    }
}
