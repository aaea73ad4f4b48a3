//! Synchronous client core for a remote vehicle inventory service.
//!
//! # Overview
//! CRUD over the `/vehicles` resource plus two geospatial computations:
//! great-circle distance between vehicles and nearest-vehicle lookup.
//!
//! # Design
//! - `VehicleClient` is stateless and pure: `build_*` produces an
//!   `HttpRequest`, `parse_*` consumes an `HttpResponse`.
//! - `Transport` executes a request; `UreqTransport` (feature `ureq`, on by
//!   default) does it with a blocking `ureq` agent.
//! - `VehicleManager` composes the two into the blocking operations
//!   (`list`, `filter`, `get`, `create`, `update`, `delete`, `distance`,
//!   `nearest_vehicle`).
//! - `geo` holds the haversine distance and the nearest-neighbor scan as
//!   plain functions with no I/O.

pub mod client;
pub mod error;
pub mod filter;
pub mod geo;
pub mod http;
pub mod manager;
pub mod transport;
pub mod types;

pub use client::VehicleClient;
pub use error::ApiError;
pub use filter::VehicleFilter;
pub use geo::{distance_between, nearest, EARTH_RADIUS_METERS};
pub use http::{HttpMethod, HttpRequest, HttpResponse};
pub use manager::VehicleManager;
pub use transport::Transport;
#[cfg(feature = "ureq")]
pub use transport::UreqTransport;
pub use types::{Vehicle, VEHICLE_FIELDS};
