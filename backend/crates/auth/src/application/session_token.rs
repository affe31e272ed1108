//! Session Token
//!
//! Cookie value format: `<session-uuid>.<base64url HMAC-SHA256(uuid)>`.

use uuid::Uuid;

use crate::error::{AuthError, AuthResult};

/// Generate signed session token
pub fn generate(secret: &[u8], session_id: Uuid) -> String {
    platform::crypto::sign(secret, &session_id.to_string())
}

/// Parse and verify session token
pub fn parse(secret: &[u8], token: &str) -> AuthResult<Uuid> {
    let session_id = platform::crypto::verify_signed(secret, token).ok_or(AuthError::SessionInvalid)?;

    session_id.parse().map_err(|_| AuthError::SessionInvalid)
}
