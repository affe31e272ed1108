//! Page templates

use askama::Template;
use askama_web::WebTemplate;
use kernel::form::FormErrors;

/// Login page template.
#[derive(Template, WebTemplate)]
#[template(path = "login.html")]
pub struct LoginTemplate {
    pub csrf_token: String,
    /// Submitted email, echoed back on failure
    pub email: String,
    pub notice: Option<&'static str>,
    /// Form-level message (bad credentials, stale form)
    pub error: Option<&'static str>,
    pub errors: Option<FormErrors>,
}

impl LoginTemplate {
    pub fn new(csrf_token: String, notice: Option<&'static str>) -> Self {
        Self {
            csrf_token,
            email: String::new(),
            notice,
            error: None,
            errors: None,
        }
    }

    pub fn error_for(&self, field: &str) -> Option<&str> {
        self.errors.as_ref().and_then(|errors| errors.get(field))
    }
}

/// Register page template.
#[derive(Template, WebTemplate)]
#[template(path = "register.html")]
pub struct RegisterTemplate {
    pub csrf_token: String,
    pub name: String,
    pub email: String,
    pub error: Option<&'static str>,
    pub errors: Option<FormErrors>,
}

impl RegisterTemplate {
    pub fn empty(csrf_token: String) -> Self {
        Self {
            csrf_token,
            name: String::new(),
            email: String::new(),
            error: None,
            errors: None,
        }
    }

    pub fn error_for(&self, field: &str) -> Option<&str> {
        self.errors.as_ref().and_then(|errors| errors.get(field))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use kernel::form::FieldError;

    #[test]
    fn test_login_renders_notice_and_escapes_email() {
        let html = LoginTemplate {
            csrf_token: "nonce.sig".to_string(),
            email: "<b>@x.com".to_string(),
            notice: Some("Email already registered. Please log in."),
            error: None,
            errors: None,
        }
        .render()
        .unwrap();

        assert!(html.contains("Email already registered. Please log in."));
        assert!(html.contains("&lt;b&gt;@x.com"));
        assert!(!html.contains("<b>@x.com"));
        assert!(html.contains(r#"name="csrf_token" value="nonce.sig""#));
    }

    #[test]
    fn test_register_renders_field_errors() {
        let template = RegisterTemplate {
            csrf_token: "nonce.sig".to_string(),
            name: "Ann".to_string(),
            email: String::new(),
            error: None,
            errors: Some(FormErrors::single(
                "register",
                FieldError::new("email", "This field is required."),
            )),
        };

        assert_eq!(template.error_for("email"), Some("This field is required."));
        assert_eq!(template.error_for("name"), None);

        let html = template.render().unwrap();
        assert!(html.contains("This field is required."));
        assert!(html.contains("value=\"Ann\""));
    }
}
