//! Exact-match vehicle filter.
//!
//! # Design
//! Criteria are an enumerated set of optional fields rather than a free-form
//! map, so an unknown key is rejected when the filter is built instead of
//! failing halfway through a scan. Every field that is set must match
//! exactly; an empty filter keeps every vehicle.

use serde_json::Value;

use crate::error::ApiError;
use crate::types::Vehicle;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct VehicleFilter {
    pub id: Option<u64>,
    pub name: Option<String>,
    pub model: Option<String>,
    pub year: Option<i32>,
    pub color: Option<String>,
    pub price: Option<i64>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
}

impl VehicleFilter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a filter from `(key, value)` pairs such as `("color", "red")`.
    ///
    /// Unknown keys fail with [`ApiError::MissingField`]; values of the wrong
    /// JSON type fail with [`ApiError::InvalidCriterion`]. A repeated key
    /// keeps its last value.
    pub fn from_criteria<'a, I>(criteria: I) -> Result<Self, ApiError>
    where
        I: IntoIterator<Item = (&'a str, Value)>,
    {
        let mut filter = Self::default();
        for (key, value) in criteria {
            match key {
                "id" => filter.id = Some(as_integer(key, &value)?),
                "name" => filter.name = Some(as_string(key, value)?),
                "model" => filter.model = Some(as_string(key, value)?),
                "year" => filter.year = Some(as_integer(key, &value)?),
                "color" => filter.color = Some(as_string(key, value)?),
                "price" => filter.price = Some(as_integer(key, &value)?),
                "latitude" => filter.latitude = Some(as_float(key, &value)?),
                "longitude" => filter.longitude = Some(as_float(key, &value)?),
                other => return Err(ApiError::MissingField(other.to_string())),
            }
        }
        Ok(filter)
    }

    pub fn id(mut self, id: u64) -> Self {
        self.id = Some(id);
        self
    }

    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn model(mut self, model: impl Into<String>) -> Self {
        self.model = Some(model.into());
        self
    }

    pub fn year(mut self, year: i32) -> Self {
        self.year = Some(year);
        self
    }

    pub fn color(mut self, color: impl Into<String>) -> Self {
        self.color = Some(color.into());
        self
    }

    pub fn price(mut self, price: i64) -> Self {
        self.price = Some(price);
        self
    }

    pub fn latitude(mut self, latitude: f64) -> Self {
        self.latitude = Some(latitude);
        self
    }

    pub fn longitude(mut self, longitude: f64) -> Self {
        self.longitude = Some(longitude);
        self
    }

    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    /// True when every criterion that is set equals the vehicle's field.
    pub fn matches(&self, vehicle: &Vehicle) -> bool {
        fn check<T: PartialEq>(wanted: &Option<T>, actual: &T) -> bool {
            wanted.as_ref().is_none_or(|w| w == actual)
        }

        self.id.is_none_or(|id| vehicle.id == Some(id))
            && check(&self.name, &vehicle.name)
            && check(&self.model, &vehicle.model)
            && check(&self.year, &vehicle.year)
            && check(&self.color, &vehicle.color)
            && check(&self.price, &vehicle.price)
            && check(&self.latitude, &vehicle.latitude)
            && check(&self.longitude, &vehicle.longitude)
    }

    /// Keep the matching vehicles, preserving their order.
    pub fn apply(&self, vehicles: Vec<Vehicle>) -> Vec<Vehicle> {
        vehicles.into_iter().filter(|v| self.matches(v)).collect()
    }
}

fn invalid(field: &str, expected: &str, value: &Value) -> ApiError {
    ApiError::InvalidCriterion {
        field: field.to_string(),
        reason: format!("expected {expected}, got {value}"),
    }
}

fn as_string(field: &str, value: Value) -> Result<String, ApiError> {
    match value {
        Value::String(s) => Ok(s),
        other => Err(invalid(field, "a string", &other)),
    }
}

fn as_integer<T: TryFrom<i64>>(field: &str, value: &Value) -> Result<T, ApiError> {
    value
        .as_i64()
        .and_then(|n| T::try_from(n).ok())
        .ok_or_else(|| invalid(field, "an integer in range", value))
}

fn as_float(field: &str, value: &Value) -> Result<f64, ApiError> {
    value.as_f64().ok_or_else(|| invalid(field, "a number", value))
}
