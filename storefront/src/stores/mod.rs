//! Boundary store interfaces
//!
//! The pure core never touches I/O directly; every external collaborator
//! (coupon records, delivery settings, order persistence, the
//! confirmation-message channel) is an injected trait object. This keeps
//! the engine testable without a running document store and makes the
//! boundary the only place where suspension can occur.

pub mod location;
pub mod memory;

use async_trait::async_trait;
use shared::models::{Coupon, DeliverySettings};
use shared::order::OrderRecord;
use shared::StoreResult;

pub use memory::{MemoryCouponStore, MemoryDeliveryStore, MemoryOrderStore};

/// Coupon record store.
///
/// The usage counter is read-modify-write at this layer: concurrent
/// redemptions across sessions can transiently over-subscribe a cap
/// (last write wins). Accepted as a product-level tolerance; stronger
/// guarantees belong to an atomic counter at the persistence layer.
#[async_trait]
pub trait CouponStore: Send + Sync {
    /// Look up a coupon by canonical (uppercase) code.
    async fn find_by_code(&self, code: &str) -> StoreResult<Option<Coupon>>;

    /// Increment the usage counter. When the increment reaches the usage
    /// cap the coupon is deactivated within the same update. Called only
    /// at successful order submission, never at validation or
    /// application time.
    async fn increment_usage(&self, code: &str) -> StoreResult<()>;

    /// Coupons usable right now: active flag, date window, and remaining
    /// uses all evaluated at call time.
    async fn list_active(&self, today: chrono::NaiveDate) -> StoreResult<Vec<Coupon>>;
}

/// Delivery-settings store (singleton record per restaurant).
#[async_trait]
pub trait DeliverySettingsStore: Send + Sync {
    /// Current settings, or `None` when nothing is configured — the
    /// pricing engine then falls back to the fixed tiered schedule.
    async fn active_settings(&self) -> StoreResult<Option<DeliverySettings>>;
}

/// Order persistence. Write-once from this core's perspective; status
/// transitions belong to an external admin surface.
#[async_trait]
pub trait OrderStore: Send + Sync {
    /// Persist a fully assembled, pruned order record. Returns the
    /// store-assigned id.
    async fn create(&self, order: &OrderRecord) -> StoreResult<String>;
}

/// Pre-filled confirmation message handed to the external channel
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderMessage {
    /// Human-readable text block describing the order
    pub text: String,
    /// Shareable deep link that opens the channel with the text pre-filled
    pub link: String,
}

/// External order-confirmation channel. Receives a fully priced,
/// already-validated record and performs no validation of its own.
pub trait OrderMessageFormatter: Send + Sync {
    fn format(&self, order: &OrderRecord) -> OrderMessage;
}
