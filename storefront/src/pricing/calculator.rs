//! Order summary calculation
//!
//! Uses rust_decimal internally; only the final discount and total are
//! rounded to 2 decimal places. The discount is recomputed from the
//! current subtotal on every call — it is never stored, so it can never
//! go stale when items change after the coupon was applied.

use crate::cart::LineItem;
use crate::coupon::{discount_for, AppliedCoupon};
use crate::money::{to_decimal, to_f64};
use rust_decimal::Decimal;
use shared::models::delivery::{fallback_fee, DeliverySettings};
use shared::order::{FulfillmentMode, OrderSummary};

/// Compute the priced summary for the given cart state.
///
/// Deterministic and idempotent: identical inputs always yield identical
/// output. An empty cart yields an all-zero summary.
///
/// Fee rules for delivery:
/// - subtotal at or above the free threshold ships free;
/// - otherwise the flat configured fee applies, even when the subtotal is
///   below `minimum_order_amount` (the minimum is a submission gate, not
///   a fee rule);
/// - with no settings loaded, the fixed tiered fallback schedule applies.
///
/// A coupon whose minimum the current subtotal no longer meets
/// contributes 0 discount here; detaching it is the coupon lifecycle's
/// job, not the pricing engine's.
pub fn compute_summary(
    items: &[LineItem],
    mode: FulfillmentMode,
    settings: Option<&DeliverySettings>,
    applied: Option<&AppliedCoupon>,
) -> OrderSummary {
    let mut subtotal = Decimal::ZERO;
    let mut item_count: i32 = 0;
    for line in items {
        subtotal += to_decimal(line.unit_price) * Decimal::from(line.quantity);
        item_count += line.quantity;
    }

    let delivery_fee = delivery_fee(subtotal, mode, settings);

    let discount = match applied {
        Some(applied) => {
            let coupon = &applied.coupon;
            if subtotal < to_decimal(coupon.minimum_purchase_amount) {
                // Soft-invalid: qualifies for auto-removal but still attached
                Decimal::ZERO
            } else {
                discount_for(coupon, subtotal)
            }
        }
        None => Decimal::ZERO,
    };

    let total = (subtotal + delivery_fee - discount).max(Decimal::ZERO);

    OrderSummary {
        subtotal: to_f64(subtotal),
        // Tax is explicitly not charged; field retained for a future tax regime
        tax: 0.0,
        delivery_fee: to_f64(delivery_fee),
        discount: to_f64(discount),
        total: to_f64(total),
        item_count,
    }
}

fn delivery_fee(
    subtotal: Decimal,
    mode: FulfillmentMode,
    settings: Option<&DeliverySettings>,
) -> Decimal {
    if mode != FulfillmentMode::Delivery {
        return Decimal::ZERO;
    }
    match settings {
        Some(cfg) => {
            if subtotal >= to_decimal(cfg.free_delivery_threshold) {
                Decimal::ZERO
            } else {
                to_decimal(cfg.delivery_fee)
            }
        }
        None => to_decimal(fallback_fee(to_f64(subtotal))),
    }
}
