//! Repository Traits
//!
//! Interfaces for data persistence. Implementation is in infrastructure layer.

use kernel::id::UserId;
use uuid::Uuid;

use crate::domain::entity::{
    auth_session::AuthSession,
    user::{NewUser, User},
};
use crate::domain::value_object::email::Email;
use crate::error::AuthResult;

/// User credential store
#[trait_variant::make(CredentialStore: Send)]
pub trait LocalCredentialStore {
    /// Insert a new user.
    ///
    /// Fails with `DuplicateEmail` (checked first) or `DuplicateName`
    /// without creating a row.
    async fn insert_user(&self, user: NewUser) -> AuthResult<User>;

    /// Find user by normalized email
    async fn find_by_email(&self, email: &Email) -> AuthResult<Option<User>>;

    /// Find user by ID
    async fn find_by_id(&self, user_id: UserId) -> AuthResult<Option<User>>;

    /// Check if email exists
    async fn exists_by_email(&self, email: &Email) -> AuthResult<bool>;
}

/// Auth session repository trait
#[trait_variant::make(AuthSessionRepository: Send)]
pub trait LocalAuthSessionRepository {
    /// Create a new session
    async fn create(&self, session: &AuthSession) -> AuthResult<()>;

    /// Find session by ID
    async fn find_by_id(&self, session_id: Uuid) -> AuthResult<Option<AuthSession>>;

    /// Update session (last activity)
    async fn update(&self, session: &AuthSession) -> AuthResult<()>;

    /// Delete a session
    async fn delete(&self, session_id: Uuid) -> AuthResult<()>;

    /// Clean up expired sessions
    async fn cleanup_expired(&self) -> AuthResult<u64>;
}
