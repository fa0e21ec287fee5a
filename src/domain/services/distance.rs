//! Great-circle distance
//!
//! Pure domain math with NO external dependencies.

use crate::domain::value_objects::Coordinate;

/// Earth's mean radius in kilometers.
pub const EARTH_RADIUS_KM: f64 = 6371.0;

/// Haversine distance between two coordinates, in kilometers.
///
/// Symmetric, non-negative, and zero for identical points. Inputs are
/// assumed to be inside the valid degree ranges; out-of-range values produce
/// meaningless distances, so callers validate first (see
/// [`Coordinate::is_valid`]).
pub fn distance_km(a: Coordinate, b: Coordinate) -> f64 {
    let lat_a = a.lat.to_radians();
    let lat_b = b.lat.to_radians();
    let d_lat = (b.lat - a.lat).to_radians();
    let d_lon = (b.lon - a.lon).to_radians();

    let h = (d_lat / 2.0).sin().powi(2)
        + lat_a.cos() * lat_b.cos() * (d_lon / 2.0).sin().powi(2);

    2.0 * EARTH_RADIUS_KM * h.sqrt().asin()
}
