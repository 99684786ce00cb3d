//! Coupon validation and lifecycle
//!
//! Validation is a pure ordered-check pass over a looked-up coupon; the
//! lifecycle is a two-state machine owning the single coupon attached to
//! the cart session. The discount is recomputed from the current subtotal
//! on every pricing pass and never stored.

mod lifecycle;
mod validator;

pub use lifecycle::CouponLifecycle;
pub use validator::{validate_code, CouponRejection, CouponValidation};

use crate::money::to_decimal;
use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};
use shared::models::Coupon;

/// The coupon currently attached to a cart session (at most one).
///
/// Holds a snapshot of the coupon as validated, not a live store
/// reference. Discount and final amount are never stored here; they are
/// recomputed from the current subtotal by the pricing engine.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AppliedCoupon {
    pub coupon: Coupon,
    /// Unix millis
    pub applied_at: i64,
}

/// Discount amount for `coupon` against `subtotal`, rounded to 2 decimal
/// places (half-up).
///
/// Flat discounts never exceed the amount being discounted.
pub fn discount_for(coupon: &Coupon, subtotal: Decimal) -> Decimal {
    use shared::models::DiscountType;
    let value = to_decimal(coupon.discount_value);
    let raw = match coupon.discount_type {
        DiscountType::Flat => value.min(subtotal),
        DiscountType::Percentage => subtotal * value / Decimal::ONE_HUNDRED,
    };
    raw.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}
