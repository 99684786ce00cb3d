//! Delivery-radius check
//!
//! Great-circle distance between the customer and the restaurant,
//! compared against the configured radius. Consumed by the session as a
//! black-box predicate; the result carries the measured distance so the
//! UI can say by how much the radius was exceeded.

use shared::models::GeoPoint;

/// Mean Earth radius in kilometres
const EARTH_RADIUS_KM: f64 = 6371.0;

/// Result of a radius check
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LocationCheck {
    pub is_valid: bool,
    pub distance_km: f64,
}

/// Haversine great-circle distance in kilometres.
pub fn distance_km(a: GeoPoint, b: GeoPoint) -> f64 {
    let lat1 = a.lat.to_radians();
    let lat2 = b.lat.to_radians();
    let dlat = (b.lat - a.lat).to_radians();
    let dlng = (b.lng - a.lng).to_radians();

    let h = (dlat / 2.0).sin().powi(2) + lat1.cos() * lat2.cos() * (dlng / 2.0).sin().powi(2);
    2.0 * EARTH_RADIUS_KM * h.sqrt().asin()
}

/// Check whether `customer` lies within `radius_km` of `restaurant`.
pub fn validate_location(customer: GeoPoint, restaurant: GeoPoint, radius_km: f64) -> LocationCheck {
    let distance = distance_km(customer, restaurant);
    LocationCheck {
        is_valid: distance <= radius_km,
        distance_km: distance,
    }
}
