//! Pricing engine
//!
//! Pure computation of the priced order summary from cart contents,
//! fulfillment mode, delivery settings, and the optionally applied
//! coupon. No side effects, no I/O.

mod calculator;

pub use calculator::compute_summary;
