//! Domain Value Objects
//!
//! Immutable value types for the cafe domain.

use std::fmt;

use serde::Serialize;

/// Coffee quality scale, worst to best
pub const COFFEE_CHOICES: &[&str] = &["☕️", "☕☕", "☕☕☕", "☕☕☕☕", "☕☕☕☕☕"];

/// Wifi strength scale; `✘` means none
pub const WIFI_CHOICES: &[&str] = &["✘", "💪", "💪💪", "💪💪💪", "💪💪💪💪", "💪💪💪💪💪"];

/// Power socket availability scale; `✘` means none
pub const POWER_CHOICES: &[&str] = &["✘", "🔌", "🔌🔌", "🔌🔌🔌", "🔌🔌🔌🔌", "🔌🔌🔌🔌🔌"];

/// Which amenity a rating belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RatingScale {
    Coffee,
    Wifi,
    Power,
}

impl RatingScale {
    pub fn choices(&self) -> &'static [&'static str] {
        match self {
            RatingScale::Coffee => COFFEE_CHOICES,
            RatingScale::Wifi => WIFI_CHOICES,
            RatingScale::Power => POWER_CHOICES,
        }
    }
}

/// One symbol string from a rating scale, stored as-is
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Rating(&'static str);

impl Rating {
    /// Exact membership; `"☕"` is not on the coffee scale, `"☕️"` is
    pub fn new(scale: RatingScale, value: &str) -> Option<Self> {
        scale
            .choices()
            .iter()
            .copied()
            .find(|choice| *choice == value)
            .map(Self)
    }

    /// Value read from the store.
    ///
    /// Rows written by this crate always hold a scale symbol; anything
    /// else is an integrity problem and reported as `None`.
    pub fn from_db(scale: RatingScale, value: &str) -> Option<Self> {
        Self::new(scale, value)
    }

    pub fn as_str(&self) -> &'static str {
        self.0
    }
}

impl fmt::Display for Rating {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.0)
    }
}

/// Link to the cafe on a map service
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct MapUrl(String);

impl MapUrl {
    pub fn new(value: &str) -> Option<Self> {
        let value = value.trim();
        kernel::form::is_valid_url(value).then(|| Self(value.to_string()))
    }

    pub fn from_db(value: String) -> Self {
        Self(value)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for MapUrl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
