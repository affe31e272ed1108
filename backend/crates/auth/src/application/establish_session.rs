//! Establish Session
//!
//! Shared tail of register and login: persist a session row and hand back
//! the signed cookie token.

use kernel::id::UserId;

use crate::application::config::AuthConfig;
use crate::application::session_token;
use crate::domain::entity::auth_session::AuthSession;
use crate::domain::repository::AuthSessionRepository;
use crate::error::AuthResult;

/// Create a session for `user_id` and return its cookie token
pub async fn establish_session<S>(
    session_repo: &S,
    config: &AuthConfig,
    user_id: UserId,
) -> AuthResult<String>
where
    S: AuthSessionRepository,
{
    let session = AuthSession::new(user_id, config.session_ttl_chrono());
    session_repo.create(&session).await?;

    tracing::debug!(
        user_id = %user_id,
        session_id = %session.session_id,
        "Session established"
    );

    Ok(session_token::generate(&config.session_secret, session.session_id))
}
