//! Domain Entities
//!
//! Core domain objects for the cafe catalogue.

use kernel::id::CafeId;

use super::value_objects::{MapUrl, Rating};

/// Stored cafe
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cafe {
    pub id: CafeId,
    pub name: String,
    pub city_name: String,
    pub map_url: MapUrl,
    /// Free-form, e.g. "8AM"
    pub open_time: String,
    pub closing_time: String,
    pub coffee_rating: Rating,
    pub wifi_rating: Rating,
    pub power_outlet: Rating,
}

/// Cafe about to be inserted; the store assigns the id
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewCafe {
    pub name: String,
    pub city_name: String,
    pub map_url: MapUrl,
    pub open_time: String,
    pub closing_time: String,
    pub coffee_rating: Rating,
    pub wifi_rating: Rating,
    pub power_outlet: Rating,
}

impl NewCafe {
    /// Attach the id returned by the insert
    pub fn into_cafe(self, id: CafeId) -> Cafe {
        Cafe {
            id,
            name: self.name,
            city_name: self.city_name,
            map_url: self.map_url,
            open_time: self.open_time,
            closing_time: self.closing_time,
            coffee_rating: self.coffee_rating,
            wifi_rating: self.wifi_rating,
            power_outlet: self.power_outlet,
        }
    }
}
