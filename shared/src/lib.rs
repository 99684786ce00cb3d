//! Shared types for the storefront ordering core
//!
//! Data models, error types, and small utilities used by the engine crate:
//! menu/coupon/delivery-settings models, the immutable order record, and
//! order-code generation.

pub mod error;
pub mod models;
pub mod order;
pub mod util;

// Re-exports
pub use error::{StoreError, StoreResult};
pub use models::{Coupon, DeliverySettings, DiscountType, Dish, GeoPoint};
pub use order::{FulfillmentMode, OrderRecord, OrderStatus};
pub use serde::{Deserialize, Serialize};
