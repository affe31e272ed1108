//! Auth Session Entity
//!
//! Represents an authenticated user session.
//! Stored in database with cookie-based token reference.

use chrono::{DateTime, Duration, Utc};
use kernel::id::UserId;
use uuid::Uuid;

/// Auth session entity
#[derive(Debug, Clone)]
pub struct AuthSession {
    /// Session ID (UUID v4)
    pub session_id: Uuid,
    /// Reference to User
    pub user_id: UserId,
    /// Session expiration (Unix timestamp ms)
    pub expires_at_ms: i64,
    pub created_at: DateTime<Utc>,
    pub last_activity_at: DateTime<Utc>,
}

impl AuthSession {
    /// Create a new auth session
    ///
    /// TTL is provided by the application layer (config), not hard-coded here.
    pub fn new(user_id: UserId, ttl: Duration) -> Self {
        let now = Utc::now();

        Self {
            session_id: Uuid::new_v4(),
            user_id,
            expires_at_ms: (now + ttl).timestamp_millis(),
            created_at: now,
            last_activity_at: now,
        }
    }

    /// Check if session has expired
    pub fn is_expired(&self) -> bool {
        Utc::now().timestamp_millis() > self.expires_at_ms
    }

    /// Update last activity timestamp
    pub fn touch(&mut self) {
        self.last_activity_at = Utc::now();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_session_is_live() {
        let session = AuthSession::new(UserId::from_i64(1), Duration::hours(12));
        assert!(!session.is_expired());
        assert!(session.expires_at_ms > Utc::now().timestamp_millis() + 11 * 3600 * 1000);
        assert_eq!(session.created_at, session.last_activity_at);
    }

    #[test]
    fn test_expired_session() {
        let session = AuthSession::new(UserId::from_i64(1), Duration::milliseconds(-1));
        assert!(session.is_expired());
    }

    #[test]
    fn test_touch_moves_last_activity() {
        let mut session = AuthSession::new(UserId::from_i64(1), Duration::hours(1));
        let before = session.last_activity_at;
        session.touch();
        assert!(session.last_activity_at >= before);
    }

    #[test]
    fn test_session_ids_are_unique() {
        let a = AuthSession::new(UserId::from_i64(1), Duration::hours(1));
        let b = AuthSession::new(UserId::from_i64(1), Duration::hours(1));
        assert_ne!(a.session_id, b.session_id);
    }
}
