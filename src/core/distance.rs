use geo::{HaversineDistance, Point};

use crate::models::GeoPoint;

/// Meters in one statute mile
const METERS_PER_MILE: f64 = 1609.344;

/// Great-circle distance between two points in miles
///
/// # Arguments
/// * `from` - Search origin
/// * `to` - Camp venue
#[inline]
pub fn distance_miles(from: GeoPoint, to: GeoPoint) -> f64 {
    let from = Point::new(from.longitude, from.latitude);
    let to = Point::new(to.longitude, to.latitude);

    from.haversine_distance(&to) / METERS_PER_MILE
}
