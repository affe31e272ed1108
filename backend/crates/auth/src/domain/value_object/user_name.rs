//! User Name Value Object
//!
//! The display name shown for a user. Unlike the email it is free text:
//! any script, spaces and punctuation are allowed.
//!
//! ## Invariants
//! - Trimmed and NFC normalized
//! - 1 to [`USER_NAME_MAX_LENGTH`] characters
//! - No control characters
//!
//! Uniqueness is a store concern (`users.name` is `UNIQUE`).

use serde::{Deserialize, Serialize};
use std::fmt;
use unicode_normalization::UnicodeNormalization;

/// Maximum length for user name (in characters)
pub const USER_NAME_MAX_LENGTH: usize = 250;

// ============================================================================
// Error Types
// ============================================================================

/// Error returned when user name validation fails
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UserNameError {
    /// User name is empty after trimming
    Empty,

    /// User name is too long (maximum: USER_NAME_MAX_LENGTH)
    TooLong { length: usize, max: usize },

    /// User name contains a control character
    InvalidCharacter { position: usize },
}

impl fmt::Display for UserNameError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty => write!(f, "Name cannot be empty"),
            Self::TooLong { length, max } => {
                write!(f, "Name is too long ({length} chars, maximum {max})")
            }
            Self::InvalidCharacter { position } => {
                write!(f, "Name contains a control character at position {position}")
            }
        }
    }
}

impl std::error::Error for UserNameError {}

// ============================================================================
// UserName Value Object
// ============================================================================

/// Validated, normalized display name
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct UserName(String);

impl UserName {
    pub fn new(input: &str) -> Result<Self, UserNameError> {
        let normalized: String = input.trim().nfc().collect();

        if normalized.is_empty() {
            return Err(UserNameError::Empty);
        }

        let length = normalized.chars().count();
        if length > USER_NAME_MAX_LENGTH {
            return Err(UserNameError::TooLong {
                length,
                max: USER_NAME_MAX_LENGTH,
            });
        }

        if let Some(position) = normalized.chars().position(char::is_control) {
            return Err(UserNameError::InvalidCharacter { position });
        }

        Ok(Self(normalized))
    }

    /// Create from database value (assumed already validated)
    pub fn from_db(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for UserName {
    type Error = UserNameError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(&value)
    }
}

impl From<UserName> for String {
    fn from(name: UserName) -> Self {
        name.0
    }
}

impl fmt::Display for UserName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_names() {
        assert_eq!(UserName::new("Ann").unwrap().as_str(), "Ann");
        assert_eq!(UserName::new("  Jean-Luc Picard ").unwrap().as_str(), "Jean-Luc Picard");
        assert!(UserName::new("山田 太郎").is_ok());
    }

    #[test]
    fn test_empty_name() {
        assert_eq!(UserName::new(""), Err(UserNameError::Empty));
        assert_eq!(UserName::new(" \t "), Err(UserNameError::Empty));
    }

    #[test]
    fn test_too_long() {
        assert!(UserName::new(&"a".repeat(USER_NAME_MAX_LENGTH)).is_ok());
        assert!(matches!(
            UserName::new(&"a".repeat(USER_NAME_MAX_LENGTH + 1)),
            Err(UserNameError::TooLong { .. })
        ));
    }

    #[test]
    fn test_control_character() {
        assert_eq!(
            UserName::new("An\u{0007}n"),
            Err(UserNameError::InvalidCharacter { position: 2 })
        );
    }

    #[test]
    fn test_nfc_normalization() {
        // "e" + combining acute composes to "é"
        let decomposed = UserName::new("Jose\u{0301}").unwrap();
        assert_eq!(decomposed.as_str(), "Jos\u{00e9}");
    }

    #[test]
    fn test_serde_round_trip_validates() {
        let name: Result<UserName, _> = serde_json::from_str("\"\"");
        assert!(name.is_err());
        let name: UserName = serde_json::from_str("\"Ann\"").unwrap();
        assert_eq!(serde_json::to_string(&name).unwrap(), "\"Ann\"");
    }
}
