//! Declarative Form Validation
//!
//! Every HTML form in the application is described by a [`FormSchema`]: an
//! ordered list of [`FieldSpec`]s. [`FormSchema::validate`] is the single
//! routine that evaluates any schema against submitted `x-www-form-urlencoded`
//! data, so the rules for "required", "URL" and "choice" fields live in one
//! place.
//!
//! ## Examples
//! ```rust
//! use kernel::form::{FieldSpec, FormSchema, RawForm};
//!
//! const SEARCH: FormSchema = FormSchema::new("search", &[FieldSpec::text("name", "City or Cafe Name")]);
//!
//! let mut raw = RawForm::new();
//! raw.insert("name".to_string(), "  paris ".to_string());
//! let form = SEARCH.validate(&raw).unwrap();
//! assert_eq!(form.get("name"), "paris");
//! ```

use std::collections::HashMap;

use serde::Serialize;
use thiserror::Error;
use url::{Host, Url};

/// Form body as decoded by `axum::Form<RawForm>`
pub type RawForm = HashMap<String, String>;

pub const REQUIRED_MESSAGE: &str = "This field is required.";
pub const INVALID_URL_MESSAGE: &str = "Invalid URL.";
pub const INVALID_CHOICE_MESSAGE: &str = "Not a valid choice.";

/// Per-field constraint evaluated after the required check
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Constraint {
    /// Any text
    Text,
    /// `scheme://host[...]` where host is an IP or a domain with a TLD
    Url,
    /// Exact membership in a fixed choice set
    OneOf(&'static [&'static str]),
}

/// One field of a form
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldSpec {
    pub name: &'static str,
    pub label: &'static str,
    pub required: bool,
    /// Maximum length in characters
    pub max_len: Option<usize>,
    /// Strip surrounding whitespace before validating and storing
    pub trim: bool,
    pub constraint: Constraint,
}

impl FieldSpec {
    /// Required free-text field
    pub const fn text(name: &'static str, label: &'static str) -> Self {
        Self {
            name,
            label,
            required: true,
            max_len: None,
            trim: true,
            constraint: Constraint::Text,
        }
    }

    /// Required URL field
    pub const fn url(name: &'static str, label: &'static str) -> Self {
        Self {
            constraint: Constraint::Url,
            ..Self::text(name, label)
        }
    }

    /// Required select field
    pub const fn one_of(
        name: &'static str,
        label: &'static str,
        choices: &'static [&'static str],
    ) -> Self {
        Self {
            constraint: Constraint::OneOf(choices),
            ..Self::text(name, label)
        }
    }

    pub const fn optional(self) -> Self {
        Self {
            required: false,
            ..self
        }
    }

    pub const fn max_len(self, max_len: usize) -> Self {
        Self {
            max_len: Some(max_len),
            ..self
        }
    }

    /// Keep the submitted value byte for byte (passwords)
    pub const fn untrimmed(self) -> Self {
        Self {
            trim: false,
            ..self
        }
    }

    fn check(&self, value: &str) -> Result<(), String> {
        if let Some(max) = self.max_len {
            if value.chars().count() > max {
                return Err(format!("Field cannot be longer than {max} characters."));
            }
        }

        match self.constraint {
            Constraint::Text => Ok(()),
            Constraint::Url if is_valid_url(value) => Ok(()),
            Constraint::Url => Err(INVALID_URL_MESSAGE.to_string()),
            Constraint::OneOf(choices) if choices.contains(&value) => Ok(()),
            Constraint::OneOf(_) => Err(INVALID_CHOICE_MESSAGE.to_string()),
        }
    }
}

/// Ordered field list for one form
#[derive(Debug, Clone, Copy)]
pub struct FormSchema {
    name: &'static str,
    fields: &'static [FieldSpec],
}

impl FormSchema {
    pub const fn new(name: &'static str, fields: &'static [FieldSpec]) -> Self {
        Self { name, fields }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn fields(&self) -> &'static [FieldSpec] {
        self.fields
    }

    pub fn field(&self, name: &str) -> Option<&'static FieldSpec> {
        self.fields.iter().find(|f| f.name == name)
    }

    /// Validate submitted data against every field, in schema order.
    ///
    /// All failing fields are reported, not just the first one.
    /// Unknown keys in `raw` are ignored.
    pub fn validate(&self, raw: &RawForm) -> Result<ValidatedForm, FormErrors> {
        let mut values = Vec::with_capacity(self.fields.len());
        let mut errors = Vec::new();

        for spec in self.fields {
            let submitted = raw.get(spec.name).map(String::as_str).unwrap_or("");
            let value = if spec.trim {
                submitted.trim()
            } else {
                submitted
            };

            if value.trim().is_empty() {
                if spec.required {
                    errors.push(FieldError::new(spec.name, REQUIRED_MESSAGE));
                } else {
                    values.push((spec.name, String::new()));
                }
                continue;
            }

            match spec.check(value) {
                Ok(()) => values.push((spec.name, value.to_string())),
                Err(message) => errors.push(FieldError::new(spec.name, message)),
            }
        }

        if errors.is_empty() {
            Ok(ValidatedForm { values })
        } else {
            Err(FormErrors {
                form: self.name,
                errors,
            })
        }
    }
}

/// Values that passed validation, keyed by field name
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidatedForm {
    values: Vec<(&'static str, String)>,
}

impl ValidatedForm {
    /// Value of a schema field. Empty for optional fields left blank and
    /// for names that are not part of the schema.
    pub fn get(&self, name: &str) -> &str {
        self.values
            .iter()
            .find(|(field, _)| *field == name)
            .map(|(_, value)| value.as_str())
            .unwrap_or("")
    }

    /// Move a value out, leaving an empty string behind
    pub fn take(&mut self, name: &str) -> String {
        self.values
            .iter_mut()
            .find(|(field, _)| *field == name)
            .map(|(_, value)| std::mem::take(value))
            .unwrap_or_default()
    }
}

/// Validation message attached to one field
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldError {
    pub field: &'static str,
    pub message: String,
}

impl FieldError {
    pub fn new(field: &'static str, message: impl Into<String>) -> Self {
        Self {
            field,
            message: message.into(),
        }
    }
}

/// Every field that failed validation, in schema order
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{form} form failed validation ({} field(s))", .errors.len())]
pub struct FormErrors {
    form: &'static str,
    errors: Vec<FieldError>,
}

impl FormErrors {
    /// Single-field failure raised after schema validation passed
    /// (e.g. a unique name detected by the store)
    pub fn single(form: &'static str, error: FieldError) -> Self {
        Self {
            form,
            errors: vec![error],
        }
    }

    pub fn form(&self) -> &'static str {
        self.form
    }

    pub fn errors(&self) -> &[FieldError] {
        &self.errors
    }

    /// First message for a field, if it failed
    pub fn get(&self, field: &str) -> Option<&str> {
        self.errors
            .iter()
            .find(|e| e.field == field)
            .map(|e| e.message.as_str())
    }

    pub fn has(&self, field: &str) -> bool {
        self.get(field).is_some()
    }

    pub fn len(&self) -> usize {
        self.errors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }
}

/// URL check for links rendered into pages: an `http` or `https` scheme,
/// `://`, and a host that is an IP literal or a dotted domain whose
/// top-level label is alphabetic (or punycode).
///
/// Any other scheme (`javascript:`, `data:`, ...) is rejected so a stored
/// value is always safe to use as an `href`.
pub fn is_valid_url(value: &str) -> bool {
    if !value.contains("://") {
        return false;
    }

    let Ok(url) = Url::parse(value) else {
        return false;
    };
    if !matches!(url.scheme(), "http" | "https") {
        return false;
    }

    match url.host() {
        Some(Host::Ipv4(_)) | Some(Host::Ipv6(_)) => true,
        Some(Host::Domain(domain)) => has_top_level_domain(domain),
        None => false,
    }
}

fn has_top_level_domain(domain: &str) -> bool {
    let domain = domain.trim_end_matches('.');
    let Some((rest, tld)) = domain.rsplit_once('.') else {
        return false;
    };

    !rest.is_empty()
        && tld.len() >= 2
        && (tld.starts_with("xn--") || tld.chars().all(|c| c.is_ascii_alphabetic()))
}
