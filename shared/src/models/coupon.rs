//! Coupon Model

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Discount type enum
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DiscountType {
    /// Fixed amount off the cart subtotal
    Flat,
    /// Percentage of the cart subtotal (value in 0..=100)
    Percentage,
}

/// Promotional coupon entity
///
/// `code` is canonical uppercase; lookups canonicalize before matching.
/// The validity window is inclusive calendar days: a coupon starting and
/// ending on day D is usable from D 00:00:00 to D 23:59:59 local time.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Coupon {
    pub code: String,
    /// Display name shown on the cart and the order receipt
    pub name: String,
    pub discount_type: DiscountType,
    /// Discount value (flat: currency amount, percentage: 0..=100)
    pub discount_value: f64,
    /// Cart subtotal required before the coupon may be applied
    pub minimum_purchase_amount: f64,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    /// Manual kill switch; also flipped off when the usage cap is reached
    pub is_active: bool,
    /// Redemption cap; `None` means unlimited
    #[serde(skip_serializing_if = "Option::is_none")]
    pub usage_limit: Option<u32>,
    /// Redemption counter, increment-only
    #[serde(default)]
    pub used_count: u32,
    /// Unix millis
    pub created_at: i64,
    /// Unix millis
    pub updated_at: i64,
}

impl Coupon {
    /// Canonical form of a coupon code: trimmed, uppercase.
    pub fn canonical_code(code: &str) -> String {
        code.trim().to_uppercase()
    }

    /// Whether the usage cap (if any) has been reached.
    pub fn usage_exhausted(&self) -> bool {
        self.usage_limit.is_some_and(|limit| self.used_count >= limit)
    }

    /// Whether `date` falls inside the inclusive validity window.
    pub fn in_window(&self, date: NaiveDate) -> bool {
        date >= self.start_date && date <= self.end_date
    }
}

/// Coupon snapshot embedded in a persisted order (not a live reference)
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CouponSnapshot {
    pub code: String,
    pub name: String,
    pub discount_type: DiscountType,
    pub discount_value: f64,
}

impl From<&Coupon> for CouponSnapshot {
    fn from(coupon: &Coupon) -> Self {
        Self {
            code: coupon.code.clone(),
            name: coupon.name.clone(),
            discount_type: coupon.discount_type,
            discount_value: coupon.discount_value,
        }
    }
}
