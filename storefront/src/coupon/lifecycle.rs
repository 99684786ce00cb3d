//! Coupon lifecycle
//!
//! Two states: Unapplied and Applied. The caller submits an
//! already-validated coupon; this type never calls the validator itself.
//! Auto-removal is an explicit re-check invoked by the caller after every
//! subtotal-affecting mutation — it only ever clears, never re-applies,
//! so repeated evaluation cannot loop.

use super::AppliedCoupon;
use shared::models::Coupon;
use shared::util::now_millis;

/// Owns the coupon attached to the active cart session, if any.
#[derive(Debug, Clone, Default)]
pub struct CouponLifecycle {
    applied: Option<AppliedCoupon>,
}

impl CouponLifecycle {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn applied(&self) -> Option<&AppliedCoupon> {
        self.applied.as_ref()
    }

    pub fn is_applied(&self) -> bool {
        self.applied.is_some()
    }

    /// Attach a validated coupon. Replaces any previously applied one —
    /// at most a single coupon is ever attached.
    pub fn apply(&mut self, coupon: Coupon) {
        if let Some(previous) = &self.applied {
            tracing::debug!(
                old = %previous.coupon.code,
                new = %coupon.code,
                "Replacing applied coupon"
            );
        }
        tracing::info!(code = %coupon.code, "Coupon applied");
        self.applied = Some(AppliedCoupon {
            coupon,
            applied_at: now_millis(),
        });
    }

    /// Explicit user-initiated removal; always allowed.
    pub fn remove(&mut self) -> Option<AppliedCoupon> {
        let removed = self.applied.take();
        if let Some(applied) = &removed {
            tracing::info!(code = %applied.coupon.code, "Coupon removed");
        }
        removed
    }

    /// Re-check the applied coupon against the current cart subtotal and
    /// detach it when the cart no longer meets its minimum. Returns
    /// whether removal fired. Idempotent: with nothing applied, or with a
    /// still-qualifying coupon, this is a side-effect-free no-op.
    pub fn reevaluate(&mut self, subtotal: f64) -> bool {
        let Some(applied) = &self.applied else {
            return false;
        };
        if subtotal >= applied.coupon.minimum_purchase_amount {
            return false;
        }
        tracing::info!(
            code = %applied.coupon.code,
            subtotal,
            minimum = applied.coupon.minimum_purchase_amount,
            "Coupon auto-removed: cart dropped below minimum purchase"
        );
        self.applied = None;
        true
    }
}
