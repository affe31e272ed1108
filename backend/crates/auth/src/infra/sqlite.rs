//! SQLite Repository Implementations

use chrono::{DateTime, Utc};
use kernel::id::UserId;
use sqlx::SqlitePool;
use uuid::Uuid;

use crate::domain::entity::{
    auth_session::AuthSession,
    user::{NewUser, User},
};
use crate::domain::repository::{AuthSessionRepository, CredentialStore};
use crate::domain::value_object::{
    email::Email, user_name::UserName, user_password::UserPassword,
};
use crate::error::{AuthError, AuthResult};

/// SQLite-backed auth repository
#[derive(Clone)]
pub struct SqliteAuthRepository {
    pool: SqlitePool,
}

impl SqliteAuthRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Clean up expired sessions
    pub async fn cleanup_expired(&self) -> AuthResult<u64> {
        let now_ms = Utc::now().timestamp_millis();

        let deleted = sqlx::query("DELETE FROM auth_sessions WHERE expires_at_ms < ?1")
            .bind(now_ms)
            .execute(&self.pool)
            .await?
            .rows_affected();

        tracing::info!(sessions_deleted = deleted, "Cleaned up expired auth sessions");

        Ok(deleted)
    }
}

/// Map a lost unique-constraint race to the same error the pre-check gives
fn map_insert_error(err: sqlx::Error) -> AuthError {
    match &err {
        sqlx::Error::Database(db_err) if db_err.is_unique_violation() => {
            if db_err.message().contains("users.email") {
                AuthError::DuplicateEmail
            } else if db_err.message().contains("users.name") {
                AuthError::DuplicateName
            } else {
                AuthError::Database(err)
            }
        }
        _ => AuthError::Database(err),
    }
}

// ============================================================================
// Credential Store Implementation
// ============================================================================

impl CredentialStore for SqliteAuthRepository {
    async fn insert_user(&self, user: NewUser) -> AuthResult<User> {
        // Take the write lock up front; a deferred transaction that reads
        // and then writes fails with SQLITE_BUSY under a concurrent insert
        let mut tx = self.pool.begin_with("BEGIN IMMEDIATE").await?;

        let email_taken = sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS(SELECT 1 FROM users WHERE email = ?1)",
        )
        .bind(user.email.as_str())
        .fetch_one(&mut *tx)
        .await?;

        if email_taken {
            return Err(AuthError::DuplicateEmail);
        }

        let name_taken = sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS(SELECT 1 FROM users WHERE name = ?1)",
        )
        .bind(user.name.as_str())
        .fetch_one(&mut *tx)
        .await?;

        if name_taken {
            return Err(AuthError::DuplicateName);
        }

        let id = sqlx::query("INSERT INTO users (name, email, password_hash) VALUES (?1, ?2, ?3)")
            .bind(user.name.as_str())
            .bind(user.email.as_str())
            .bind(user.password_hash.as_phc_string())
            .execute(&mut *tx)
            .await
            .map_err(map_insert_error)?
            .last_insert_rowid();

        tx.commit().await?;

        Ok(user.into_user(UserId::from_i64(id)))
    }

    async fn find_by_email(&self, email: &Email) -> AuthResult<Option<User>> {
        let row = sqlx::query_as::<_, UserRow>(
            "SELECT id, name, email, password_hash FROM users WHERE email = ?1",
        )
        .bind(email.as_str())
        .fetch_optional(&self.pool)
        .await?;

        row.map(UserRow::into_user).transpose()
    }

    async fn find_by_id(&self, user_id: UserId) -> AuthResult<Option<User>> {
        let row = sqlx::query_as::<_, UserRow>(
            "SELECT id, name, email, password_hash FROM users WHERE id = ?1",
        )
        .bind(user_id.as_i64())
        .fetch_optional(&self.pool)
        .await?;

        row.map(UserRow::into_user).transpose()
    }

    async fn exists_by_email(&self, email: &Email) -> AuthResult<bool> {
        let exists = sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS(SELECT 1 FROM users WHERE email = ?1)",
        )
        .bind(email.as_str())
        .fetch_one(&self.pool)
        .await?;

        Ok(exists)
    }
}

// ============================================================================
// Auth Session Repository Implementation
// ============================================================================

impl AuthSessionRepository for SqliteAuthRepository {
    async fn create(&self, session: &AuthSession) -> AuthResult<()> {
        sqlx::query(
            r#"
            INSERT INTO auth_sessions (
                session_id,
                user_id,
                expires_at_ms,
                created_at,
                last_activity_at
            ) VALUES (?1, ?2, ?3, ?4, ?5)
            "#,
        )
        .bind(session.session_id)
        .bind(session.user_id.as_i64())
        .bind(session.expires_at_ms)
        .bind(session.created_at)
        .bind(session.last_activity_at)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn find_by_id(&self, session_id: Uuid) -> AuthResult<Option<AuthSession>> {
        let row = sqlx::query_as::<_, AuthSessionRow>(
            r#"
            SELECT
                session_id,
                user_id,
                expires_at_ms,
                created_at,
                last_activity_at
            FROM auth_sessions
            WHERE session_id = ?1
            "#,
        )
        .bind(session_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(AuthSessionRow::into_session))
    }

    async fn update(&self, session: &AuthSession) -> AuthResult<()> {
        sqlx::query(
            "UPDATE auth_sessions SET expires_at_ms = ?2, last_activity_at = ?3 WHERE session_id = ?1",
        )
        .bind(session.session_id)
        .bind(session.expires_at_ms)
        .bind(session.last_activity_at)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn delete(&self, session_id: Uuid) -> AuthResult<()> {
        sqlx::query("DELETE FROM auth_sessions WHERE session_id = ?1")
            .bind(session_id)
            .execute(&self.pool)
            .await?;

        Ok(())
    }

    async fn cleanup_expired(&self) -> AuthResult<u64> {
        SqliteAuthRepository::cleanup_expired(self).await
    }
}

// ============================================================================
// Row Types for sqlx mapping
// ============================================================================

#[derive(sqlx::FromRow)]
struct UserRow {
    id: i64,
    name: String,
    email: String,
    password_hash: String,
}

impl UserRow {
    fn into_user(self) -> AuthResult<User> {
        let password_hash = UserPassword::from_phc_string(self.password_hash)
            .map_err(|e| AuthError::Internal(format!("Invalid password_hash for user {}: {}", self.id, e)))?;

        Ok(User {
            id: UserId::from_i64(self.id),
            name: UserName::from_db(self.name),
            email: Email::from_db(self.email),
            password_hash,
        })
    }
}

#[derive(sqlx::FromRow)]
struct AuthSessionRow {
    session_id: Uuid,
    user_id: i64,
    expires_at_ms: i64,
    created_at: DateTime<Utc>,
    last_activity_at: DateTime<Utc>,
}

impl AuthSessionRow {
    fn into_session(self) -> AuthSession {
        AuthSession {
            session_id: self.session_id,
            user_id: UserId::from_i64(self.user_id),
            expires_at_ms: self.expires_at_ms,
            created_at: self.created_at,
            last_activity_at: self.last_activity_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::value_object::user_password::RawPassword;
    use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};

    async fn repo() -> SqliteAuthRepository {
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .idle_timeout(None)
            .max_lifetime(None)
            .connect("sqlite::memory:")
            .await
            .unwrap();
        sqlx::migrate!("../../../database/migrations")
            .run(&pool)
            .await
            .unwrap();
        SqliteAuthRepository::new(pool)
    }

    fn new_user(name: &str, email: &str) -> NewUser {
        let raw = RawPassword::new("pw1".to_string()).unwrap();
        NewUser::new(
            UserName::new(name).unwrap(),
            Email::new(email).unwrap(),
            UserPassword::from_raw(&raw, None).unwrap(),
        )
    }

    async fn user_count(repo: &SqliteAuthRepository) -> i64 {
        sqlx::query_scalar("SELECT COUNT(*) FROM users")
            .fetch_one(&repo.pool)
            .await
            .unwrap()
    }

    #[tokio::test]
    async fn test_insert_and_find_user() {
        let repo = repo().await;
        let user = repo.insert_user(new_user("Ann", "ann@x.com")).await.unwrap();

        let by_email = repo
            .find_by_email(&Email::new("ANN@x.com").unwrap())
            .await
            .unwrap()
            .unwrap();
        assert_eq!(by_email.id, user.id);
        assert_eq!(by_email.name.as_str(), "Ann");

        let by_id = CredentialStore::find_by_id(&repo, user.id).await.unwrap().unwrap();
        assert_eq!(by_id.email.as_str(), "ann@x.com");

        assert!(repo.exists_by_email(&user.email).await.unwrap());
        assert!(CredentialStore::find_by_id(&repo, UserId::from_i64(999)).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_stored_hash_is_not_plaintext() {
        let repo = repo().await;
        repo.insert_user(new_user("Ann", "ann@x.com")).await.unwrap();

        let stored: String = sqlx::query_scalar("SELECT password_hash FROM users")
            .fetch_one(&repo.pool)
            .await
            .unwrap();
        assert_ne!(stored, "pw1");
        assert!(stored.starts_with("$argon2id$"));
    }

    #[tokio::test]
    async fn test_duplicate_email_creates_no_row() {
        let repo = repo().await;
        repo.insert_user(new_user("Ann", "ann@x.com")).await.unwrap();

        let err = repo.insert_user(new_user("Bob", "ann@x.com")).await.unwrap_err();
        assert!(matches!(err, AuthError::DuplicateEmail));
        assert_eq!(user_count(&repo).await, 1);
    }

    #[tokio::test]
    async fn test_duplicate_email_wins_over_duplicate_name() {
        let repo = repo().await;
        repo.insert_user(new_user("Ann", "ann@x.com")).await.unwrap();

        let err = repo.insert_user(new_user("Ann", "ann@x.com")).await.unwrap_err();
        assert!(matches!(err, AuthError::DuplicateEmail));
    }

    #[tokio::test]
    async fn test_duplicate_name() {
        let repo = repo().await;
        repo.insert_user(new_user("Ann", "ann@x.com")).await.unwrap();

        let err = repo.insert_user(new_user("Ann", "ann2@x.com")).await.unwrap_err();
        assert!(matches!(err, AuthError::DuplicateName));
        assert_eq!(user_count(&repo).await, 1);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 2)]
    async fn test_concurrent_duplicate_email_is_a_conflict() {
        let path = std::env::temp_dir().join(format!("cafe-auth-{}.db", uuid::Uuid::new_v4()));
        let options = SqliteConnectOptions::new()
            .filename(&path)
            .create_if_missing(true);
        let pool = SqlitePoolOptions::new()
            .max_connections(4)
            .connect_with(options)
            .await
            .unwrap();
        sqlx::migrate!("../../../database/migrations")
            .run(&pool)
            .await
            .unwrap();
        let repo = SqliteAuthRepository::new(pool.clone());

        let (first, second) = tokio::join!(
            repo.insert_user(new_user("Ann", "ann@x.com")),
            repo.insert_user(new_user("Bob", "ann@x.com")),
        );
        let count = user_count(&repo).await;

        pool.close().await;
        for suffix in ["", "-wal", "-shm"] {
            let mut file = path.clone().into_os_string();
            file.push(suffix);
            let _ = std::fs::remove_file(file);
        }

        let results = [first, second];
        assert_eq!(results.iter().filter(|r| r.is_ok()).count(), 1);
        assert!(results
            .iter()
            .any(|r| matches!(r, Err(AuthError::DuplicateEmail))));
        assert_eq!(count, 1);
    }

    #[tokio::test]
    async fn test_session_lifecycle() {
        let repo = repo().await;
        let user = repo.insert_user(new_user("Ann", "ann@x.com")).await.unwrap();

        let mut session = AuthSession::new(user.id, chrono::Duration::hours(1));
        repo.create(&session).await.unwrap();

        let found = AuthSessionRepository::find_by_id(&repo, session.session_id)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(found.user_id, user.id);
        assert_eq!(found.expires_at_ms, session.expires_at_ms);

        session.touch();
        repo.update(&session).await.unwrap();

        repo.delete(session.session_id).await.unwrap();
        assert!(AuthSessionRepository::find_by_id(&repo, session.session_id)
            .await
            .unwrap()
            .is_none());
    }

    #[tokio::test]
    async fn test_cleanup_expired_keeps_live_sessions() {
        let repo = repo().await;
        let user = repo.insert_user(new_user("Ann", "ann@x.com")).await.unwrap();

        let live = AuthSession::new(user.id, chrono::Duration::hours(1));
        let expired = AuthSession::new(user.id, chrono::Duration::hours(-1));
        repo.create(&live).await.unwrap();
        repo.create(&expired).await.unwrap();

        assert_eq!(repo.cleanup_expired().await.unwrap(), 1);
        assert!(AuthSessionRepository::find_by_id(&repo, live.session_id)
            .await
            .unwrap()
            .is_some());
    }
}
