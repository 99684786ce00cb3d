//! Coupon validation
//!
//! Ordered checks, first failure wins: lookup, kill switch, validity
//! window, minimum purchase, usage cap. Every rejection carries a
//! specific, actionable message — the UI's job is to funnel the customer
//! to a fixable alternative, so "invalid" alone is never enough.

use super::discount_for;
use crate::money::{round2, to_decimal};
use crate::stores::CouponStore;
use chrono::NaiveDate;
use shared::models::Coupon;
use thiserror::Error;

/// Why a coupon cannot be used right now
#[derive(Debug, Clone, Error, PartialEq)]
pub enum CouponRejection {
    #[error("Invalid coupon code")]
    NotFound,
    #[error("This coupon is no longer active")]
    Inactive,
    #[error("This coupon is not valid until {starts}")]
    NotYetValid { starts: NaiveDate },
    #[error("This coupon expired on {ended}")]
    Expired { ended: NaiveDate },
    #[error("Add {shortfall:.2} more to use this coupon (minimum order {required:.2})")]
    MinimumNotMet { required: f64, shortfall: f64 },
    #[error("This coupon has reached its usage limit")]
    UsageLimitReached,
    #[error("Could not validate coupon, please try again")]
    LookupFailed,
}

/// Outcome of a validation pass
#[derive(Debug, Clone, PartialEq)]
pub enum CouponValidation {
    /// Usable right now; `discount_amount` is computed against the
    /// subtotal supplied at validation time and goes stale as the cart
    /// changes — the pricing engine recomputes it on every read.
    Valid {
        coupon: Coupon,
        discount_amount: f64,
    },
    Invalid(CouponRejection),
}

impl CouponValidation {
    pub fn is_valid(&self) -> bool {
        matches!(self, CouponValidation::Valid { .. })
    }

    pub fn rejection(&self) -> Option<&CouponRejection> {
        match self {
            CouponValidation::Invalid(reason) => Some(reason),
            CouponValidation::Valid { .. } => None,
        }
    }
}

/// Pure validation of a looked-up coupon against a cart subtotal and the
/// current local calendar day. Short-circuits on the first failing check.
pub fn evaluate(found: Option<Coupon>, cart_subtotal: f64, today: NaiveDate) -> CouponValidation {
    let Some(coupon) = found else {
        return CouponValidation::Invalid(CouponRejection::NotFound);
    };
    if !coupon.is_active {
        return CouponValidation::Invalid(CouponRejection::Inactive);
    }
    if today < coupon.start_date {
        return CouponValidation::Invalid(CouponRejection::NotYetValid {
            starts: coupon.start_date,
        });
    }
    if today > coupon.end_date {
        return CouponValidation::Invalid(CouponRejection::Expired {
            ended: coupon.end_date,
        });
    }
    if cart_subtotal < coupon.minimum_purchase_amount {
        return CouponValidation::Invalid(CouponRejection::MinimumNotMet {
            required: coupon.minimum_purchase_amount,
            shortfall: round2(coupon.minimum_purchase_amount - cart_subtotal),
        });
    }
    if coupon.usage_exhausted() {
        return CouponValidation::Invalid(CouponRejection::UsageLimitReached);
    }

    let discount = discount_for(&coupon, to_decimal(cart_subtotal));
    CouponValidation::Valid {
        discount_amount: crate::money::to_f64(discount),
        coupon,
    }
}

/// Look up `code` in the store and validate it against the subtotal.
///
/// Store failures surface as `CouponRejection::LookupFailed`, never as a
/// crash of the pricing path. Re-invoking is harmless: validation has no
/// side effects (the usage counter moves only at order submission).
pub async fn validate_code(
    store: &dyn CouponStore,
    code: &str,
    cart_subtotal: f64,
    today: NaiveDate,
) -> CouponValidation {
    let canonical = Coupon::canonical_code(code);
    match store.find_by_code(&canonical).await {
        Ok(found) => evaluate(found, cart_subtotal, today),
        Err(err) => {
            tracing::warn!(code = %canonical, error = %err, "Coupon lookup failed");
            CouponValidation::Invalid(CouponRejection::LookupFailed)
        }
    }
}
