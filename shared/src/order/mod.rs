//! Order record types
//!
//! The immutable checkout snapshot written to the order store, plus the
//! priced summary shared between the pricing engine and the persisted
//! record. Records are written once at submission; later status
//! transitions belong to an external admin surface.

use crate::models::coupon::CouponSnapshot;
use crate::models::GeoPoint;
use serde::{Deserialize, Serialize};

/// Fulfillment mode — governs which fee and field rules apply
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum FulfillmentMode {
    #[default]
    Delivery,
    Pickup,
    DineIn,
}

/// Priced summary of a cart or order
///
/// Produced by the pricing engine on every read and embedded verbatim in
/// the persisted order at submission time. Monetary fields are rounded to
/// 2 decimal places only at the final step.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Default)]
pub struct OrderSummary {
    pub subtotal: f64,
    /// Always 0 — retained for forward compatibility with a tax regime
    pub tax: f64,
    pub delivery_fee: f64,
    pub discount: f64,
    pub total: f64,
    /// Sum of line quantities
    pub item_count: i32,
}

/// Customer contact details captured at checkout
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CustomerInfo {
    pub name: String,
    pub phone: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
}

/// Fulfillment-specific fields (address | pickup time | table preference)
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "mode", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum FulfillmentDetails {
    Delivery {
        address: String,
        #[serde(skip_serializing_if = "Option::is_none")]
        location: Option<GeoPoint>,
        #[serde(skip_serializing_if = "Option::is_none")]
        delivery_note: Option<String>,
    },
    Pickup {
        #[serde(skip_serializing_if = "Option::is_none")]
        pickup_time: Option<String>,
    },
    DineIn {
        #[serde(skip_serializing_if = "Option::is_none")]
        table_preference: Option<String>,
    },
}

impl FulfillmentDetails {
    /// The fulfillment mode these details belong to.
    pub fn mode(&self) -> FulfillmentMode {
        match self {
            FulfillmentDetails::Delivery { .. } => FulfillmentMode::Delivery,
            FulfillmentDetails::Pickup { .. } => FulfillmentMode::Pickup,
            FulfillmentDetails::DineIn { .. } => FulfillmentMode::DineIn,
        }
    }
}

/// Order status (initial state plus admin-owned transitions)
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OrderStatus {
    #[default]
    PendingConfirmation,
    Confirmed,
    Preparing,
    OutForDelivery,
    Completed,
    Cancelled,
}

/// One entry in the order status history
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct StatusEntry {
    pub status: OrderStatus,
    /// Unix millis
    pub at: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
}

/// Line item snapshot inside a persisted order
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct OrderLine {
    pub dish_id: String,
    pub name: String,
    /// Frozen unit price captured at add-to-cart time
    pub unit_price: f64,
    pub quantity: i32,
    /// `unit_price * quantity`, rounded to 2 decimal places
    pub line_total: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
}

/// Immutable order record (written once at checkout)
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct OrderRecord {
    /// Store-assigned id; absent until persisted
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    /// Human-readable order code for customer reference
    pub code: String,
    pub fulfillment_mode: FulfillmentMode,
    pub customer: CustomerInfo,
    pub fulfillment: FulfillmentDetails,
    pub items: Vec<OrderLine>,
    /// Pricing snapshot taken at submission time
    pub pricing: OrderSummary,
    /// Applied-coupon snapshot, not a live reference
    #[serde(skip_serializing_if = "Option::is_none")]
    pub coupon: Option<CouponSnapshot>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub estimated_delivery_minutes: Option<u32>,
    pub status: OrderStatus,
    pub status_history: Vec<StatusEntry>,
    /// Unix millis
    pub created_at: i64,
}
