//! Form schemas and query types

use kernel::form::{FieldSpec, FormSchema};
use serde::Deserialize;

/// Column width of `users.name` / `users.email`
const TEXT_MAX: usize = 250;

pub const LOGIN_FORM: FormSchema = FormSchema::new(
    "login",
    &[
        FieldSpec::text("email", "Email").max_len(TEXT_MAX),
        FieldSpec::text("password", "Password").untrimmed(),
    ],
);

pub const REGISTER_FORM: FormSchema = FormSchema::new(
    "register",
    &[
        FieldSpec::text("name", "Name").max_len(TEXT_MAX),
        FieldSpec::text("email", "Email").max_len(TEXT_MAX),
        FieldSpec::text("password", "Password").untrimmed(),
    ],
);

/// Shown on the login form after a failed attempt
pub const INVALID_CREDENTIALS_MESSAGE: &str = "Invalid email or password.";

pub const DUPLICATE_NAME_MESSAGE: &str = "That name is already taken.";

/// `?notice=` values the login page understands
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Notice {
    EmailRegistered,
}

impl Notice {
    /// Unknown values are ignored rather than rejected
    pub fn from_query(value: &str) -> Option<Self> {
        match value {
            "email-registered" => Some(Notice::EmailRegistered),
            _ => None,
        }
    }

    pub fn as_query(&self) -> &'static str {
        match self {
            Notice::EmailRegistered => "email-registered",
        }
    }

    pub fn message(&self) -> &'static str {
        match self {
            Notice::EmailRegistered => "Email already registered. Please log in.",
        }
    }
}

/// Query parameters for the login page
#[derive(Debug, Default, Deserialize)]
pub struct NoticeQuery {
    pub notice: Option<String>,
}

impl NoticeQuery {
    pub fn notice(&self) -> Option<Notice> {
        self.notice.as_deref().and_then(Notice::from_query)
    }
}
