//! Great-circle distance and nearest-vehicle search.

use crate::error::ApiError;
use crate::types::Vehicle;

/// Mean Earth radius used by the haversine formula, in meters.
pub const EARTH_RADIUS_METERS: f64 = 6_371_000.0;

/// Great-circle distance in meters between two points given in degrees.
///
/// Haversine formula on a sphere of radius [`EARTH_RADIUS_METERS`].
/// Symmetric in its two points and zero when they coincide.
///
/// ```
/// use vehicle_core::geo::distance_between;
///
/// let moscow_spb = distance_between(55.7558, 37.6173, 59.9343, 30.3351);
/// assert!((moscow_spb - 634_000.0).abs() < 5_000.0);
/// ```
pub fn distance_between(lat1: f64, lon1: f64, lat2: f64, lon2: f64) -> f64 {
    let phi1 = lat1.to_radians();
    let phi2 = lat2.to_radians();
    let delta_phi = phi2 - phi1;
    let delta_lambda = lon2.to_radians() - lon1.to_radians();

    // Rounding can push `a` a hair past 1 for near-antipodal points.
    let a = ((delta_phi / 2.0).sin().powi(2)
        + phi1.cos() * phi2.cos() * (delta_lambda / 2.0).sin().powi(2))
    .min(1.0);
    let c = 2.0 * a.sqrt().atan2((1.0 - a).sqrt());

    EARTH_RADIUS_METERS * c
}

/// Returns the candidate closest to `reference`, skipping every candidate
/// that shares the reference's id.
///
/// Ties keep the first candidate encountered. Fails with
/// [`ApiError::EmptySet`] when nothing is left to compare against.
pub fn nearest<'a>(reference: &Vehicle, candidates: &'a [Vehicle]) -> Result<&'a Vehicle, ApiError> {
    let mut best: Option<(&'a Vehicle, f64)> = None;

    for candidate in candidates.iter().filter(|c| c.id != reference.id) {
        let distance = reference.distance_to(candidate);
        match best {
            Some((_, best_distance)) if distance < best_distance => best = Some((candidate, distance)),
            Some(_) => {}
            None => best = Some((candidate, distance)),
        }
    }

    best.map(|(vehicle, _)| vehicle).ok_or(ApiError::EmptySet)
}
