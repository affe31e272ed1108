//! Cryptographic Utilities

use base64::{Engine, engine::general_purpose};
use hmac::{Hmac, Mac};
use rand::{RngCore, rngs::OsRng};
use sha2::Sha256;

type HmacSha256 = Hmac<Sha256>;

/// Separator between payload and signature in a signed token
const TOKEN_SEPARATOR: char = '.';

/// Generate cryptographically secure random bytes
pub fn random_bytes(len: usize) -> Vec<u8> {
    let mut bytes = vec![0u8; len];
    OsRng.fill_bytes(&mut bytes);
    bytes
}

/// Generate a 32-byte secret key
pub fn random_key() -> [u8; 32] {
    let mut key = [0u8; 32];
    OsRng.fill_bytes(&mut key);
    key
}

/// Encode bytes as unpadded base64url, safe in cookies and form fields
pub fn to_base64(bytes: &[u8]) -> String {
    general_purpose::URL_SAFE_NO_PAD.encode(bytes)
}

/// Compute HMAC-SHA256
pub fn hmac_sha256(key: &[u8], data: &[u8]) -> [u8; 32] {
    let mut mac = HmacSha256::new_from_slice(key).expect("HMAC can take key of any size");
    mac.update(data);
    mac.finalize().into_bytes().into()
}

/// Sign a payload: `<payload>.<base64url(hmac)>`
///
/// The payload must not contain `.`.
pub fn sign(key: &[u8], payload: &str) -> String {
    let signature = hmac_sha256(key, payload.as_bytes());
    format!(
        "{}{}{}",
        payload,
        TOKEN_SEPARATOR,
        general_purpose::URL_SAFE_NO_PAD.encode(signature)
    )
}

/// Verify a token produced by [`sign`] and return its payload.
///
/// The signature is checked in constant time.
pub fn verify_signed<'a>(key: &[u8], token: &'a str) -> Option<&'a str> {
    let (payload, signature_b64) = token.split_once(TOKEN_SEPARATOR)?;
    if signature_b64.contains(TOKEN_SEPARATOR) {
        return None;
    }

    let signature = general_purpose::URL_SAFE_NO_PAD
        .decode(signature_b64)
        .ok()?;

    let mut mac = HmacSha256::new_from_slice(key).ok()?;
    mac.update(payload.as_bytes());
    mac.verify_slice(&signature).ok()?;

    Some(payload)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_random_bytes() {
        let bytes = random_bytes(32);
        assert_eq!(bytes.len(), 32);
        // Should not be all zeros (statistically)
        assert!(bytes.iter().any(|&b| b != 0));
        assert_ne!(random_key(), random_key());
    }

    #[test]
    fn test_base64_is_url_safe() {
        assert_eq!(to_base64(&[0xfb, 0xff]), "-_8");
        assert_eq!(to_base64(b"hello world"), "aGVsbG8gd29ybGQ");
    }

    #[test]
    fn test_hmac_known_value() {
        // RFC 4231 test case 2
        let mac = hmac_sha256(b"Jefe", b"what do ya want for nothing?");
        let hex: String = mac.iter().map(|b| format!("{:02x}", b)).collect();
        assert_eq!(
            hex,
            "5bdcc146bf60754e6a042426089575c75a003f089d2739839dec58b964ec3843"
        );
    }

    #[test]
    fn test_sign_and_verify() {
        let key = [7u8; 32];
        let token = sign(&key, "session-1");
        assert!(token.starts_with("session-1."));
        assert_eq!(verify_signed(&key, &token), Some("session-1"));
    }

    #[test]
    fn test_verify_rejects_tampering() {
        let key = [7u8; 32];
        let token = sign(&key, "session-1");

        assert_eq!(verify_signed(&[8u8; 32], &token), None);

        let forged = token.replacen("session-1", "session-2", 1);
        assert_eq!(verify_signed(&key, &forged), None);

        assert_eq!(verify_signed(&key, "session-1"), None);
        assert_eq!(verify_signed(&key, "session-1.!!!"), None);
        assert_eq!(verify_signed(&key, &format!("{token}.extra")), None);
    }
}
