//! Form schemas and response bodies

use kernel::form::{FieldSpec, FormSchema, ValidatedForm};
use serde::Serialize;

use crate::domain::entities::NewCafe;
use crate::domain::value_objects::{
    COFFEE_CHOICES, MapUrl, POWER_CHOICES, Rating, RatingScale, WIFI_CHOICES,
};
use crate::error::CafeError;

/// Column width of the text columns in `cafes`
const TEXT_MAX: usize = 250;

pub const ADD_CAFE_FORM: FormSchema = FormSchema::new(
    "add_cafe",
    &[
        FieldSpec::text("cafe", "Cafe name").max_len(TEXT_MAX),
        FieldSpec::text("city", "City name").max_len(TEXT_MAX),
        FieldSpec::url("location", "Cafe Location on Google Maps (URL)").max_len(TEXT_MAX),
        FieldSpec::text("open_time", "Open time e.g. 8AM").max_len(TEXT_MAX),
        FieldSpec::text("closing_time", "Closing time e.g. 8PM").max_len(TEXT_MAX),
        FieldSpec::one_of("coffee_rating", "Coffee rating", COFFEE_CHOICES),
        FieldSpec::one_of("wifi_rating", "Wifi rating", WIFI_CHOICES),
        FieldSpec::one_of("power_outlet", "Power Socket availability", POWER_CHOICES),
    ],
);

pub const SEARCH_FORM: FormSchema =
    FormSchema::new("search", &[FieldSpec::text("name", "City or Cafe Name")]);

/// A form that passed [`ADD_CAFE_FORM`] maps onto the domain types
/// one-to-one; a field the schema let through that the domain refuses
/// means the two have drifted apart.
impl TryFrom<ValidatedForm> for NewCafe {
    type Error = CafeError;

    fn try_from(mut form: ValidatedForm) -> Result<Self, Self::Error> {
        let rating = |form: &ValidatedForm, field: &str, scale| {
            Rating::new(scale, form.get(field)).ok_or_else(|| schema_drift(field))
        };

        Ok(NewCafe {
            map_url: MapUrl::new(form.get("location")).ok_or_else(|| schema_drift("location"))?,
            coffee_rating: rating(&form, "coffee_rating", RatingScale::Coffee)?,
            wifi_rating: rating(&form, "wifi_rating", RatingScale::Wifi)?,
            power_outlet: rating(&form, "power_outlet", RatingScale::Power)?,
            name: form.take("cafe"),
            city_name: form.take("city"),
            open_time: form.take("open_time"),
            closing_time: form.take("closing_time"),
        })
    }
}

fn schema_drift(field: &str) -> CafeError {
    CafeError::Internal(format!("add_cafe schema accepted an invalid {field}"))
}

/// `{"response": {"success": "..."}}`
#[derive(Debug, Serialize)]
pub struct AddCafeResponse {
    pub response: AddCafeAck,
}

#[derive(Debug, Serialize)]
pub struct AddCafeAck {
    pub success: &'static str,
}

impl AddCafeResponse {
    pub fn success(message: &'static str) -> Self {
        Self {
            response: AddCafeAck { success: message },
        }
    }
}
