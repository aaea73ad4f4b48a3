use std::{collections::BTreeMap, sync::Arc};

use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use serde::{Deserialize, Serialize};
use tokio::{net::TcpListener, sync::RwLock};
use tower_http::trace::TraceLayer;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Vehicle {
    pub id: u64,
    pub name: String,
    pub model: String,
    pub year: i32,
    pub color: String,
    pub price: i64,
    pub latitude: f64,
    pub longitude: f64,
}

/// Body of `POST` and `PUT`. An `id` in the body is ignored; the path wins.
#[derive(Clone, Debug, Deserialize)]
pub struct VehicleInput {
    pub name: String,
    pub model: String,
    pub year: i32,
    pub color: String,
    pub price: i64,
    pub latitude: f64,
    pub longitude: f64,
}

impl VehicleInput {
    fn into_vehicle(self, id: u64) -> Vehicle {
        Vehicle {
            id,
            name: self.name,
            model: self.model,
            year: self.year,
            color: self.color,
            price: self.price,
            latitude: self.latitude,
            longitude: self.longitude,
        }
    }
}

#[derive(Debug, Default)]
pub struct Inventory {
    vehicles: BTreeMap<u64, Vehicle>,
    next_id: u64,
}

impl Inventory {
    fn seeded(vehicles: Vec<Vehicle>) -> Self {
        let next_id = vehicles.iter().map(|v| v.id).max().unwrap_or(0) + 1;
        Self {
            vehicles: vehicles.into_iter().map(|v| (v.id, v)).collect(),
            next_id,
        }
    }
}

pub type Db = Arc<RwLock<Inventory>>;

pub fn app() -> Router {
    app_with(Vec::new())
}

/// Router whose store starts with `vehicles`. New ids continue after the
/// largest seeded id.
pub fn app_with(vehicles: Vec<Vehicle>) -> Router {
    let db: Db = Arc::new(RwLock::new(Inventory::seeded(vehicles)));
    Router::new()
        .route("/vehicles", get(list_vehicles).post(create_vehicle))
        .route(
            "/vehicles/{id}",
            get(get_vehicle).put(update_vehicle).delete(delete_vehicle),
        )
        .layer(TraceLayer::new_for_http())
        .with_state(db)
}

pub async fn run(listener: TcpListener) -> Result<(), std::io::Error> {
    run_seeded(listener, Vec::new()).await
}

pub async fn run_seeded(listener: TcpListener, vehicles: Vec<Vehicle>) -> Result<(), std::io::Error> {
    axum::serve(listener, app_with(vehicles)).await
}

async fn list_vehicles(State(db): State<Db>) -> Json<Vec<Vehicle>> {
    let inventory = db.read().await;
    Json(inventory.vehicles.values().cloned().collect())
}

async fn create_vehicle(
    State(db): State<Db>,
    Json(input): Json<VehicleInput>,
) -> (StatusCode, Json<Vehicle>) {
    let mut inventory = db.write().await;
    let id = inventory.next_id;
    inventory.next_id += 1;
    let vehicle = input.into_vehicle(id);
    inventory.vehicles.insert(id, vehicle.clone());
    tracing::debug!(id, "vehicle created");
    (StatusCode::CREATED, Json(vehicle))
}

async fn get_vehicle(
    State(db): State<Db>,
    Path(id): Path<u64>,
) -> Result<Json<Vehicle>, StatusCode> {
    let inventory = db.read().await;
    inventory
        .vehicles
        .get(&id)
        .cloned()
        .map(Json)
        .ok_or(StatusCode::NOT_FOUND)
}

async fn update_vehicle(
    State(db): State<Db>,
    Path(id): Path<u64>,
    Json(input): Json<VehicleInput>,
) -> Result<Json<Vehicle>, StatusCode> {
    let mut inventory = db.write().await;
    let slot = inventory.vehicles.get_mut(&id).ok_or(StatusCode::NOT_FOUND)?;
    *slot = input.into_vehicle(id);
    Ok(Json(slot.clone()))
}

async fn delete_vehicle(
    State(db): State<Db>,
    Path(id): Path<u64>,
) -> Result<StatusCode, StatusCode> {
    let mut inventory = db.write().await;
    inventory
        .vehicles
        .remove(&id)
        .map(|_| StatusCode::NO_CONTENT)
        .ok_or(StatusCode::NOT_FOUND)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn input_json() -> &'static str {
        r#"{"name":"Toyota","model":"Camry","year":2021,"color":"red","price":21000,"latitude":55.753215,"longitude":37.620393}"#
    }

    #[test]
    fn vehicle_serializes_every_field() {
        let vehicle: VehicleInput = serde_json::from_str(input_json()).unwrap();
        let json = serde_json::to_value(vehicle.into_vehicle(7)).unwrap();
        assert_eq!(json["id"], 7);
        assert_eq!(json["name"], "Toyota");
        assert_eq!(json["price"], 21000);
        assert_eq!(json.as_object().unwrap().len(), 8);
    }

    #[test]
    fn input_ignores_body_id() {
        let body = input_json().replacen('{', r#"{"id":99,"#, 1);
        let input: VehicleInput = serde_json::from_str(&body).unwrap();
        assert_eq!(input.into_vehicle(3).id, 3);
    }

    #[test]
    fn input_rejects_missing_field() {
        let result: Result<VehicleInput, _> =
            serde_json::from_str(r#"{"name":"Toyota","model":"Camry"}"#);
        assert!(result.is_err());
    }

    #[test]
    fn seeded_inventory_continues_ids() {
        let input: VehicleInput = serde_json::from_str(input_json()).unwrap();
        let inventory = Inventory::seeded(vec![input.clone().into_vehicle(4), input.into_vehicle(2)]);
        assert_eq!(inventory.next_id, 5);
        assert_eq!(inventory.vehicles.keys().copied().collect::<Vec<_>>(), vec![2, 4]);
    }

    #[test]
    fn empty_inventory_starts_at_one() {
        assert_eq!(Inventory::seeded(Vec::new()).next_id, 1);
    }
}
