//! Storefront ordering core
//!
//! Cart pricing and coupon engine for a single restaurant's web
//! storefront. The pure core — pricing, coupon validation, coupon
//! lifecycle, cart aggregate, order assembly — is synchronous and free of
//! I/O; every external collaborator (coupon records, delivery settings,
//! order persistence, the confirmation-message channel) is an injected
//! trait at the `stores` boundary.
//!
//! # Module structure
//!
//! ```text
//! storefront/src/
//! ├── money.rs     # Decimal helpers, monetary bounds
//! ├── cart/        # Line items, mutation contracts, storage mirror
//! ├── pricing/     # Priced summary computation
//! ├── coupon/      # Validation checks and applied-coupon lifecycle
//! ├── orders/      # Checkout input, assembly, serialization prune
//! ├── stores/      # Boundary traits, in-memory impls, radius check
//! └── session.rs   # Per-session orchestration and submission gates
//! ```

pub mod cart;
pub mod coupon;
pub mod money;
pub mod orders;
pub mod pricing;
pub mod session;
pub mod stores;

// Re-export public surface
pub use cart::{Cart, CartError, LineItem, StoredCart};
pub use coupon::{AppliedCoupon, CouponLifecycle, CouponRejection, CouponValidation};
pub use orders::{CheckoutDetails, CheckoutError};
pub use pricing::compute_summary;
pub use session::{StorefrontSession, SubmitError};
pub use stores::{CouponStore, DeliverySettingsStore, OrderMessage, OrderMessageFormatter, OrderStore};
