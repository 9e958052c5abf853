//! Haversine distance calculation.
//!
//! The Haversine formula calculates the great-circle distance between two points
//! on a sphere given their longitudes and latitudes. Enclosing-circle radii are
//! reported with it in nautical miles.

use crate::Coordinate;

/// Earth's mean radius in kilometers.
pub const EARTH_RADIUS_KM: f64 = 6371.0;

/// Earth's mean radius in nautical miles (6371 km / 1.852).
pub const EARTH_RADIUS_NM: f64 = 3440.065;

/// Calculates the great-circle distance between two coordinates in kilometers.
///
/// # Example
/// ```
/// use aerocoord_geo::{haversine_distance, Coordinate};
///
/// let berlin = Coordinate::new(52.5200, 13.4050);
/// let paris = Coordinate::new(48.8566, 2.3522);
///
/// let distance = haversine_distance(&berlin, &paris);
/// assert!((distance - 878.0).abs() < 10.0);
/// ```
#[inline]
pub fn haversine_distance(from: &Coordinate, to: &Coordinate) -> f64 {
    haversine_distance_with_radius(from, to, EARTH_RADIUS_KM)
}

/// Calculates the great-circle distance between two coordinates in nautical miles.
///
/// One minute of arc along a meridian is roughly one nautical mile.
///
/// ```
/// use aerocoord_geo::{haversine_distance_nm, Coordinate};
///
/// let d = haversine_distance_nm(&Coordinate::new(0.0, 0.0), &Coordinate::new(1.0, 0.0));
/// assert!((d - 60.04).abs() < 0.1);
/// ```
#[inline]
pub fn haversine_distance_nm(from: &Coordinate, to: &Coordinate) -> f64 {
    haversine_distance_with_radius(from, to, EARTH_RADIUS_NM)
}

#[inline]
fn haversine_distance_with_radius(from: &Coordinate, to: &Coordinate, radius: f64) -> f64 {
    let (lat1, lon1) = from.to_radians();
    let (lat2, lon2) = to.to_radians();

    let d_lat = lat2 - lat1;
    let d_lon = lon2 - lon1;

    let a = (d_lat / 2.0).sin().powi(2)
        + lat1.cos() * lat2.cos() * (d_lon / 2.0).sin().powi(2);

    let c = 2.0 * a.sqrt().atan2((1.0 - a).sqrt());

    radius * c
}
