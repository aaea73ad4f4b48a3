//! Blocking vehicle inventory operations.
//!
//! # Design
//! `VehicleManager` pairs a `VehicleClient` with a `Transport` and runs the
//! build → execute → parse cycle for each operation. Every operation is one
//! request, except the composite ones (`distance`, `nearest_vehicle`) which
//! chain two sequential requests. Nothing is cached between calls.

use serde_json::Value;
use tracing::debug;

use crate::client::VehicleClient;
use crate::error::ApiError;
use crate::filter::VehicleFilter;
use crate::geo;
use crate::transport::Transport;
use crate::types::Vehicle;

pub struct VehicleManager<T> {
    client: VehicleClient,
    transport: T,
}

#[cfg(feature = "ureq")]
impl VehicleManager<crate::transport::UreqTransport> {
    /// Manager talking to `base_url` over a default `ureq` agent.
    pub fn new(base_url: &str) -> Self {
        Self::with_transport(base_url, crate::transport::UreqTransport::new())
    }
}

impl<T: Transport> VehicleManager<T> {
    pub fn with_transport(base_url: &str, transport: T) -> Self {
        Self {
            client: VehicleClient::new(base_url),
            transport,
        }
    }

    pub fn client(&self) -> &VehicleClient {
        &self.client
    }

    /// All vehicles, in the order the server returns them.
    pub fn list(&self) -> Result<Vec<Vehicle>, ApiError> {
        debug!(base_url = self.client.base_url(), "listing vehicles");
        let response = self.transport.execute(self.client.build_list_vehicles())?;
        self.client.parse_list_vehicles(response)
    }

    /// Fetch everything, then keep the vehicles matching every criterion.
    pub fn filter(&self, filter: &VehicleFilter) -> Result<Vec<Vehicle>, ApiError> {
        let vehicles = self.list()?;
        let total = vehicles.len();
        let kept = filter.apply(vehicles);
        debug!(total, kept = kept.len(), "filtered vehicles");
        Ok(kept)
    }

    /// Like [`filter`](Self::filter), from loose `(key, value)` criteria.
    /// Criteria are validated before any request is sent.
    pub fn filter_by<'a, I>(&self, criteria: I) -> Result<Vec<Vehicle>, ApiError>
    where
        I: IntoIterator<Item = (&'a str, Value)>,
    {
        let filter = VehicleFilter::from_criteria(criteria)?;
        self.filter(&filter)
    }

    pub fn get(&self, id: u64) -> Result<Vehicle, ApiError> {
        debug!(id, "fetching vehicle");
        let response = self.transport.execute(self.client.build_get_vehicle(id))?;
        self.client.parse_get_vehicle(response)
    }

    /// Returns the record as stored by the server, id included.
    pub fn create(&self, vehicle: &Vehicle) -> Result<Vehicle, ApiError> {
        debug!(name = %vehicle.name, model = %vehicle.model, "creating vehicle");
        let request = self.client.build_create_vehicle(vehicle)?;
        let response = self.transport.execute(request)?;
        self.client.parse_create_vehicle(response)
    }

    pub fn update(&self, vehicle: &Vehicle) -> Result<Vehicle, ApiError> {
        debug!(id = ?vehicle.id, "updating vehicle");
        let request = self.client.build_update_vehicle(vehicle)?;
        let response = self.transport.execute(request)?;
        self.client.parse_update_vehicle(response)
    }

    /// Returns the raw status code; a missing vehicle is `NotFound`.
    pub fn delete(&self, id: u64) -> Result<u16, ApiError> {
        debug!(id, "deleting vehicle");
        let response = self.transport.execute(self.client.build_delete_vehicle(id))?;
        self.client.parse_delete_vehicle(response)
    }

    /// Great-circle distance in meters between two stored vehicles.
    pub fn distance(&self, first: u64, second: u64) -> Result<f64, ApiError> {
        let a = self.get(first)?;
        let b = self.get(second)?;
        let meters = a.distance_to(&b);
        debug!(first, second, meters, "computed distance");
        Ok(meters)
    }

    /// The stored vehicle closest to vehicle `id`, excluding itself.
    pub fn nearest_vehicle(&self, id: u64) -> Result<Vehicle, ApiError> {
        let reference = self.get(id)?;
        let vehicles = self.list()?;
        let nearest = geo::nearest(&reference, &vehicles)?;
        debug!(id, nearest = ?nearest.id, "found nearest vehicle");
        Ok(nearest.clone())
    }
}
