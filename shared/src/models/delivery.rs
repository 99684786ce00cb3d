//! Delivery Settings Model

use serde::{Deserialize, Serialize};

/// Geographic coordinate (WGS84)
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct GeoPoint {
    pub lat: f64,
    pub lng: f64,
}

/// Delivery fee configuration (singleton per restaurant, fetched per session)
///
/// When no settings record is loaded the engine falls back to the fixed
/// tiered schedule in [`fallback_fee`].
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DeliverySettings {
    /// Carts below this subtotal are blocked from delivery submission.
    /// The delivery fee is still charged on below-minimum carts; the gate
    /// lives at submission, not in the fee rule.
    pub minimum_order_amount: f64,
    /// Subtotals at or above this threshold ship free
    pub free_delivery_threshold: f64,
    /// Flat fee between minimum and free threshold
    pub delivery_fee: f64,
    pub restaurant_location: GeoPoint,
    pub delivery_radius_km: f64,
    pub estimated_delivery_minutes: u32,
}

/// Fallback tiered schedule used when no settings record is loaded:
/// subtotal < 300 → 20, 300..=500 → 10, above 500 → free.
pub fn fallback_fee(subtotal: f64) -> f64 {
    if subtotal < 300.0 {
        20.0
    } else if subtotal <= 500.0 {
        10.0
    } else {
        0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fallback_schedule_tiers() {
        assert_eq!(fallback_fee(0.0), 20.0);
        assert_eq!(fallback_fee(299.99), 20.0);
        assert_eq!(fallback_fee(300.0), 10.0);
        assert_eq!(fallback_fee(500.0), 10.0);
        assert_eq!(fallback_fee(500.01), 0.0);
    }
}
