//! Login Use Case
//!
//! Authenticates a user by email and password and creates a session.

use std::sync::Arc;

use crate::application::config::AuthConfig;
use crate::application::establish_session::establish_session;
use crate::domain::entity::user::User;
use crate::domain::repository::{AuthSessionRepository, CredentialStore};
use crate::domain::value_object::{email::Email, user_password::RawPassword};
use crate::error::{AuthError, AuthResult};

/// Login input
pub struct LoginInput {
    pub email: String,
    pub password: String,
}

/// Login output
pub struct LoginOutput {
    pub user: User,
    /// Session token for cookie
    pub session_token: String,
}

/// Login use case
pub struct LoginUseCase<R>
where
    R: CredentialStore + AuthSessionRepository,
{
    repo: Arc<R>,
    config: Arc<AuthConfig>,
}

impl<R> LoginUseCase<R>
where
    R: CredentialStore + AuthSessionRepository,
{
    pub fn new(repo: Arc<R>, config: Arc<AuthConfig>) -> Self {
        Self { repo, config }
    }

    /// Check credentials.
    ///
    /// Every failure is `InvalidCredentials`, so callers cannot tell an
    /// unknown email from a wrong password.
    pub async fn authenticate(&self, input: LoginInput) -> AuthResult<User> {
        let email = Email::new(&input.email).map_err(|_| AuthError::InvalidCredentials)?;
        let raw_password =
            RawPassword::new(input.password).map_err(|_| AuthError::InvalidCredentials)?;

        let Some(user) = self.repo.find_by_email(&email).await? else {
            tracing::warn!(email = %email, "Login for unknown email");
            return Err(AuthError::InvalidCredentials);
        };

        if !user.password_hash.verify(&raw_password, self.config.pepper()) {
            tracing::warn!(user_id = %user.id, "Login with wrong password");
            return Err(AuthError::InvalidCredentials);
        }

        if user.password_hash.needs_rehash() {
            tracing::info!(user_id = %user.id, "Stored password hash uses outdated parameters");
        }

        Ok(user)
    }

    /// Authenticate and create a session
    pub async fn execute(&self, input: LoginInput) -> AuthResult<LoginOutput> {
        let user = self.authenticate(input).await?;
        let session_token = establish_session(self.repo.as_ref(), &self.config, user.id).await?;

        tracing::info!(user_id = %user.id, "User logged in");

        Ok(LoginOutput {
            user,
            session_token,
        })
    }
}
