//! Stateless HTTP request builder and response parser for the vehicle API.
//!
//! # Design
//! `VehicleClient` holds only a `base_url` and carries no mutable state
//! between calls. Each operation is split into a `build_*` method that
//! produces an `HttpRequest` and a `parse_*` method that consumes an
//! `HttpResponse`. Executing the round trip is somebody else's job (see
//! `transport`), which keeps this module deterministic.

use serde_json::Value;

use crate::error::ApiError;
use crate::http::{HttpMethod, HttpRequest, HttpResponse};
use crate::types::{Vehicle, VEHICLE_FIELDS};

/// Synchronous, stateless request builder and response parser.
#[derive(Debug, Clone)]
pub struct VehicleClient {
    base_url: String,
}

impl VehicleClient {
    pub fn new(base_url: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn build_list_vehicles(&self) -> HttpRequest {
        HttpRequest {
            method: HttpMethod::Get,
            path: format!("{}/vehicles", self.base_url),
            headers: Vec::new(),
            body: None,
        }
    }

    pub fn build_get_vehicle(&self, id: u64) -> HttpRequest {
        HttpRequest {
            method: HttpMethod::Get,
            path: format!("{}/vehicles/{id}", self.base_url),
            headers: Vec::new(),
            body: None,
        }
    }

    /// The body never carries an id, even if `vehicle` has one.
    pub fn build_create_vehicle(&self, vehicle: &Vehicle) -> Result<HttpRequest, ApiError> {
        let body = serde_json::to_string(&vehicle.without_id())
            .map_err(|e| ApiError::SerializationError(e.to_string()))?;
        Ok(HttpRequest {
            method: HttpMethod::Post,
            path: format!("{}/vehicles", self.base_url),
            headers: json_headers(),
            body: Some(body),
        })
    }

    /// Full replacement of the record at `vehicle.id`.
    pub fn build_update_vehicle(&self, vehicle: &Vehicle) -> Result<HttpRequest, ApiError> {
        let id = vehicle.id.ok_or_else(|| ApiError::MissingField("id".to_string()))?;
        let body = serde_json::to_string(vehicle).map_err(|e| ApiError::SerializationError(e.to_string()))?;
        Ok(HttpRequest {
            method: HttpMethod::Put,
            path: format!("{}/vehicles/{id}", self.base_url),
            headers: json_headers(),
            body: Some(body),
        })
    }

    pub fn build_delete_vehicle(&self, id: u64) -> HttpRequest {
        HttpRequest {
            method: HttpMethod::Delete,
            path: format!("{}/vehicles/{id}", self.base_url),
            headers: Vec::new(),
            body: None,
        }
    }

    pub fn parse_list_vehicles(&self, response: HttpResponse) -> Result<Vec<Vehicle>, ApiError> {
        check_status(&response)?;
        match parse_body(&response)? {
            Value::Array(items) => items.into_iter().map(decode_vehicle).collect(),
            other => Err(ApiError::DeserializationError(format!(
                "expected an array of vehicles, got {other}"
            ))),
        }
    }

    pub fn parse_get_vehicle(&self, response: HttpResponse) -> Result<Vehicle, ApiError> {
        check_status(&response)?;
        decode_vehicle(parse_body(&response)?)
    }

    pub fn parse_create_vehicle(&self, response: HttpResponse) -> Result<Vehicle, ApiError> {
        check_status(&response)?;
        decode_vehicle(parse_body(&response)?)
    }

    pub fn parse_update_vehicle(&self, response: HttpResponse) -> Result<Vehicle, ApiError> {
        check_status(&response)?;
        decode_vehicle(parse_body(&response)?)
    }

    /// Returns the status code for the caller to interpret. Only 404 is
    /// turned into an error.
    pub fn parse_delete_vehicle(&self, response: HttpResponse) -> Result<u16, ApiError> {
        if response.status == 404 {
            return Err(ApiError::NotFound);
        }
        Ok(response.status)
    }
}

fn json_headers() -> Vec<(String, String)> {
    vec![("content-type".to_string(), "application/json".to_string())]
}

/// Map non-success status codes to the appropriate `ApiError` variant.
fn check_status(response: &HttpResponse) -> Result<(), ApiError> {
    if response.is_success() {
        return Ok(());
    }
    if response.status == 404 {
        return Err(ApiError::NotFound);
    }
    Err(ApiError::HttpError {
        status: response.status,
        body: response.body.clone(),
    })
}

fn parse_body(response: &HttpResponse) -> Result<Value, ApiError> {
    serde_json::from_str(&response.body).map_err(|e| ApiError::DeserializationError(e.to_string()))
}

/// Decode one vehicle object, naming the first absent (or null) field
/// instead of surfacing a generic serde error.
fn decode_vehicle(value: Value) -> Result<Vehicle, ApiError> {
    let Some(object) = value.as_object() else {
        return Err(ApiError::DeserializationError(format!(
            "expected a vehicle object, got {value}"
        )));
    };
    if let Some(field) = VEHICLE_FIELDS
        .iter()
        .find(|field| object.get(**field).is_none_or(Value::is_null))
    {
        return Err(ApiError::MissingField((*field).to_string()));
    }
    serde_json::from_value(value).map_err(|e| ApiError::DeserializationError(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    const CAMRY: &str = r#"{"id":1,"name":"Toyota","model":"Camry","year":2021,"color":"red","price":21000,"latitude":55.753215,"longitude":37.620393}"#;

    fn client() -> VehicleClient {
        VehicleClient::new("http://localhost:3000")
    }

    fn response(status: u16, body: &str) -> HttpResponse {
        HttpResponse {
            status,
            headers: Vec::new(),
            body: body.to_string(),
        }
    }

    fn camry() -> Vehicle {
        Vehicle {
            id: None,
            name: "Toyota".to_string(),
            model: "Camry".to_string(),
            year: 2021,
            color: "red".to_string(),
            price: 21000,
            latitude: 55.753215,
            longitude: 37.620393,
        }
    }

    #[test]
    fn build_list_vehicles_produces_correct_request() {
        let req = client().build_list_vehicles();
        assert_eq!(req.method, HttpMethod::Get);
        assert_eq!(req.path, "http://localhost:3000/vehicles");
        assert!(req.body.is_none());
        assert!(req.headers.is_empty());
    }

    #[test]
    fn build_get_vehicle_produces_correct_request() {
        let req = client().build_get_vehicle(42);
        assert_eq!(req.method, HttpMethod::Get);
        assert_eq!(req.path, "http://localhost:3000/vehicles/42");
        assert!(req.body.is_none());
    }

    #[test]
    fn build_create_vehicle_omits_id() {
        let req = client().build_create_vehicle(&camry().with_id(9)).unwrap();
        assert_eq!(req.method, HttpMethod::Post);
        assert_eq!(req.path, "http://localhost:3000/vehicles");
        assert_eq!(
            req.headers,
            vec![("content-type".to_string(), "application/json".to_string())]
        );
        let body: Value = serde_json::from_str(req.body.as_deref().unwrap()).unwrap();
        assert!(body.get("id").is_none());
        assert_eq!(body["model"], "Camry");
        assert_eq!(body["latitude"], 55.753215);
    }

    #[test]
    fn build_update_vehicle_carries_full_body() {
        let req = client().build_update_vehicle(&camry().with_id(1)).unwrap();
        assert_eq!(req.method, HttpMethod::Put);
        assert_eq!(req.path, "http://localhost:3000/vehicles/1");
        let body: Value = serde_json::from_str(req.body.as_deref().unwrap()).unwrap();
        assert_eq!(body, serde_json::from_str::<Value>(CAMRY).unwrap());
    }

    #[test]
    fn build_update_vehicle_requires_id() {
        let err = client().build_update_vehicle(&camry()).unwrap_err();
        assert!(matches!(err, ApiError::MissingField(ref f) if f == "id"));
    }

    #[test]
    fn build_delete_vehicle_produces_correct_request() {
        let req = client().build_delete_vehicle(3);
        assert_eq!(req.method, HttpMethod::Delete);
        assert_eq!(req.path, "http://localhost:3000/vehicles/3");
        assert!(req.body.is_none());
    }

    #[test]
    fn parse_list_vehicles_success() {
        let vehicles = client()
            .parse_list_vehicles(response(200, &format!("[{CAMRY}]")))
            .unwrap();
        assert_eq!(vehicles, vec![camry().with_id(1)]);
    }

    #[test]
    fn parse_list_vehicles_rejects_object() {
        let err = client().parse_list_vehicles(response(200, CAMRY)).unwrap_err();
        assert!(matches!(err, ApiError::DeserializationError(_)));
    }

    #[test]
    fn parse_get_vehicle_not_found() {
        let err = client().parse_get_vehicle(response(404, "")).unwrap_err();
        assert!(matches!(err, ApiError::NotFound));
    }

    #[test]
    fn parse_get_vehicle_missing_field() {
        let body = r#"{"id":1,"name":"Toyota","model":"Camry","year":2021,"price":21000,"latitude":55.7,"longitude":37.6}"#;
        let err = client().parse_get_vehicle(response(200, body)).unwrap_err();
        assert!(matches!(err, ApiError::MissingField(ref f) if f == "color"));
    }

    #[test]
    fn parse_get_vehicle_null_id_is_missing() {
        let body = CAMRY.replace(r#""id":1"#, r#""id":null"#);
        let err = client().parse_get_vehicle(response(200, &body)).unwrap_err();
        assert!(matches!(err, ApiError::MissingField(ref f) if f == "id"));
    }

    #[test]
    fn parse_get_vehicle_wrong_type() {
        let body = CAMRY.replace(r#""year":2021"#, r#""year":"2021""#);
        let err = client().parse_get_vehicle(response(200, &body)).unwrap_err();
        assert!(matches!(err, ApiError::DeserializationError(_)));
    }

    #[test]
    fn parse_create_vehicle_accepts_200_and_201() {
        for status in [200, 201] {
            let vehicle = client().parse_create_vehicle(response(status, CAMRY)).unwrap();
            assert_eq!(vehicle.id, Some(1));
        }
    }

    #[test]
    fn parse_create_vehicle_wrong_status() {
        let err = client()
            .parse_create_vehicle(response(500, "internal error"))
            .unwrap_err();
        assert!(matches!(err, ApiError::HttpError { status: 500, .. }));
    }

    #[test]
    fn parse_update_vehicle_not_found() {
        let err = client().parse_update_vehicle(response(404, "")).unwrap_err();
        assert!(matches!(err, ApiError::NotFound));
    }

    #[test]
    fn parse_delete_vehicle_returns_status() {
        assert_eq!(client().parse_delete_vehicle(response(204, "")).unwrap(), 204);
        assert_eq!(client().parse_delete_vehicle(response(200, "")).unwrap(), 200);
        assert_eq!(client().parse_delete_vehicle(response(500, "boom")).unwrap(), 500);
    }

    #[test]
    fn parse_delete_vehicle_not_found() {
        let err = client().parse_delete_vehicle(response(404, "")).unwrap_err();
        assert!(matches!(err, ApiError::NotFound));
    }

    #[test]
    fn trailing_slash_is_stripped() {
        let client = VehicleClient::new("https://test.tspb.su/test-task/");
        let req = client.build_list_vehicles();
        assert_eq!(req.path, "https://test.tspb.su/test-task/vehicles");
    }

    #[test]
    fn parse_list_vehicles_bad_json() {
        let err = client().parse_list_vehicles(response(200, "not json")).unwrap_err();
        assert!(matches!(err, ApiError::DeserializationError(_)));
    }
}
