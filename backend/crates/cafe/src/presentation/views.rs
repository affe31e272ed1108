//! Page templates

use askama::Template;
use askama_web::WebTemplate;
use kernel::form::{Constraint, FieldSpec, FormErrors, RawForm};

use crate::domain::entities::Cafe;
use crate::presentation::dto::ADD_CAFE_FORM;

/// Add-cafe form, rendered field by field from [`ADD_CAFE_FORM`].
#[derive(Template, WebTemplate)]
#[template(path = "add.html")]
pub struct AddCafeTemplate {
    pub csrf_token: String,
    pub user_name: String,
    /// Submitted values echoed back after a failed attempt
    pub values: RawForm,
    /// Form-level message (stale form)
    pub error: Option<&'static str>,
    pub errors: Option<FormErrors>,
}

impl AddCafeTemplate {
    pub fn empty(csrf_token: String, user_name: String) -> Self {
        Self {
            csrf_token,
            user_name,
            values: RawForm::new(),
            error: None,
            errors: None,
        }
    }

    pub fn fields(&self) -> &'static [FieldSpec] {
        ADD_CAFE_FORM.fields()
    }

    pub fn value(&self, field: &str) -> &str {
        self.values.get(field).map(|v| v.trim()).unwrap_or("")
    }

    pub fn is_select(&self, field: &FieldSpec) -> bool {
        matches!(field.constraint, Constraint::OneOf(_))
    }

    pub fn choices(&self, field: &FieldSpec) -> &'static [&'static str] {
        match field.constraint {
            Constraint::OneOf(choices) => choices,
            _ => &[],
        }
    }

    pub fn is_selected(&self, field: &str, choice: &str) -> bool {
        self.values.get(field).is_some_and(|v| v == choice)
    }

    pub fn error_for(&self, field: &str) -> Option<&str> {
        self.errors.as_ref().and_then(|errors| errors.get(field))
    }
}

/// Every cafe
#[derive(Template, WebTemplate)]
#[template(path = "cafes.html")]
pub struct CafesTemplate {
    pub cafes: Vec<Cafe>,
}

/// Search form, with results once a query ran
#[derive(Template, WebTemplate)]
#[template(path = "search.html")]
pub struct SearchTemplate {
    pub query: String,
    pub results: Option<Vec<Cafe>>,
    pub errors: Option<FormErrors>,
}

impl SearchTemplate {
    pub fn empty() -> Self {
        Self {
            query: String::new(),
            results: None,
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
    use crate::domain::value_objects::{MapUrl, Rating, RatingScale};
    use kernel::form::FieldError;
    use kernel::id::CafeId;

    fn cafe(name: &str) -> Cafe {
        Cafe {
            id: CafeId::from_i64(1),
            name: name.to_string(),
            city_name: "Paris".to_string(),
            map_url: MapUrl::new("https://maps.example/1").unwrap(),
            open_time: "8AM".to_string(),
            closing_time: "8PM".to_string(),
            coffee_rating: Rating::new(RatingScale::Coffee, "☕☕").unwrap(),
            wifi_rating: Rating::new(RatingScale::Wifi, "💪💪💪").unwrap(),
            power_outlet: Rating::new(RatingScale::Power, "🔌").unwrap(),
        }
    }

    #[test]
    fn test_add_form_lists_every_choice() {
        let html = AddCafeTemplate::empty("nonce.sig".to_string(), "Ann".to_string())
            .render()
            .unwrap();
        assert!(html.contains(r#"name="csrf_token" value="nonce.sig""#));
        assert!(html.contains("name=\"location\""));
        assert!(html.contains("Cafe Location on Google Maps (URL)"));
        for choice in ["☕️", "☕☕☕☕☕", "💪💪💪💪💪", "🔌🔌🔌🔌🔌"] {
            assert!(html.contains(&format!("value=\"{choice}\"")), "{choice}");
        }
    }

    #[test]
    fn test_add_form_echoes_values_and_errors() {
        let mut values = RawForm::new();
        values.insert("cafe".into(), "Blue <Bottle>".into());
        values.insert("wifi_rating".into(), "💪💪".into());
        let template = AddCafeTemplate {
            csrf_token: "nonce.sig".to_string(),
            user_name: "Ann".to_string(),
            values,
            error: None,
            errors: Some(FormErrors::single(
                "add_cafe",
                FieldError::new("location", "Invalid URL."),
            )),
        };

        assert!(template.is_selected("wifi_rating", "💪💪"));
        assert!(!template.is_selected("wifi_rating", "💪"));

        let html = template.render().unwrap();
        assert!(html.contains("Invalid URL."));
        assert!(html.contains("Blue &lt;Bottle&gt;"));
        assert!(html.contains("selected"));
    }

    #[test]
    fn test_cafes_lists_rows() {
        let html = CafesTemplate {
            cafes: vec![cafe("Blue Bottle"), cafe("Anchor")],
        }
        .render()
        .unwrap();
        assert!(html.contains("Blue Bottle"));
        assert!(html.contains("Anchor"));
        assert!(html.contains("https://maps.example/1"));
    }

    #[test]
    fn test_search_empty_results_message() {
        let html = SearchTemplate {
            query: "tokyo".to_string(),
            results: Some(Vec::new()),
            errors: None,
        }
        .render()
        .unwrap();
        assert!(html.contains("No cafes found"));

        let html = SearchTemplate::empty().render().unwrap();
        assert!(!html.contains("No cafes found"));
    }
}
