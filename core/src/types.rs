//! Domain types for the vehicle inventory API.
//!
//! # Design
//! `Vehicle` mirrors the service's JSON schema but is defined independently
//! from the mock-server crate; integration tests catch drift between the two.
//! The identifier is a real `Option` so "not yet assigned" never collides
//! with an assigned id of `0`.

use serde::{Deserialize, Serialize};

use crate::geo;

/// Every field the service sends for a vehicle, in wire order.
pub const VEHICLE_FIELDS: [&str; 8] = [
    "id",
    "name",
    "model",
    "year",
    "color",
    "price",
    "latitude",
    "longitude",
];

/// A single inventory item.
///
/// Built locally with `id: None` before creation, or decoded from a server
/// response with the id populated.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Vehicle {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<u64>,
    pub name: String,
    pub model: String,
    pub year: i32,
    pub color: String,
    pub price: i64,
    pub latitude: f64,
    pub longitude: f64,
}

impl Vehicle {
    /// Returns a copy of this vehicle carrying `id`.
    pub fn with_id(&self, id: u64) -> Self {
        Self {
            id: Some(id),
            ..self.clone()
        }
    }

    /// Returns a copy of this vehicle with the identifier cleared.
    pub fn without_id(&self) -> Self {
        Self {
            id: None,
            ..self.clone()
        }
    }

    /// Latitude within [-90, 90] and longitude within [-180, 180].
    pub fn has_valid_coordinates(&self) -> bool {
        (-90.0..=90.0).contains(&self.latitude) && (-180.0..=180.0).contains(&self.longitude)
    }

    /// Great-circle distance to `other` in meters.
    pub fn distance_to(&self, other: &Vehicle) -> f64 {
        geo::distance_between(self.latitude, self.longitude, other.latitude, other.longitude)
    }
}
