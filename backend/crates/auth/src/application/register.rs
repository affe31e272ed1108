//! Register Use Case
//!
//! Creates a new user account and logs it in.

use std::sync::Arc;

use kernel::form::{FieldError, FormErrors};

use crate::application::config::AuthConfig;
use crate::application::establish_session::establish_session;
use crate::domain::entity::user::{NewUser, User};
use crate::domain::repository::{AuthSessionRepository, CredentialStore};
use crate::domain::value_object::{
    email::Email,
    user_name::UserName,
    user_password::{RawPassword, UserPassword},
};
use crate::error::{AuthError, AuthResult};

/// Form name used for field-level errors raised here
const FORM: &str = "register";

/// Register input
pub struct RegisterInput {
    pub name: String,
    pub email: String,
    pub password: String,
}

/// Register output
pub struct RegisterOutput {
    pub user: User,
    /// Session token for cookie
    pub session_token: String,
}

/// Register use case
pub struct RegisterUseCase<R>
where
    R: CredentialStore + AuthSessionRepository,
{
    repo: Arc<R>,
    config: Arc<AuthConfig>,
}

impl<R> RegisterUseCase<R>
where
    R: CredentialStore + AuthSessionRepository,
{
    pub fn new(repo: Arc<R>, config: Arc<AuthConfig>) -> Self {
        Self { repo, config }
    }

    /// Create the account without logging in
    pub async fn register(&self, input: RegisterInput) -> AuthResult<User> {
        let name = UserName::new(&input.name).map_err(|e| field_error("name", e.to_string()))?;
        let email = Email::new(&input.email).map_err(|e| field_error("email", e.message()))?;

        let raw_password = RawPassword::new(input.password)
            .map_err(|e| AuthError::PasswordPolicy(e.message().to_string()))?;

        // Reject before paying for the hash
        if self.repo.exists_by_email(&email).await? {
            tracing::info!(email = %email, "Registration with existing email");
            return Err(AuthError::DuplicateEmail);
        }

        let password_hash = UserPassword::from_raw(&raw_password, self.config.pepper())
            .map_err(|e| AuthError::Internal(e.to_string()))?;

        let user = self
            .repo
            .insert_user(NewUser::new(name, email, password_hash))
            .await?;

        tracing::info!(user_id = %user.id, name = %user.name, "User registered");

        Ok(user)
    }

    /// Create the account and a session for it
    pub async fn execute(&self, input: RegisterInput) -> AuthResult<RegisterOutput> {
        let user = self.register(input).await?;
        let session_token = establish_session(self.repo.as_ref(), &self.config, user.id).await?;

        Ok(RegisterOutput {
            user,
            session_token,
        })
    }
}

fn field_error(field: &'static str, message: impl Into<String>) -> AuthError {
    AuthError::Validation(FormErrors::single(FORM, FieldError::new(field, message)))
}
