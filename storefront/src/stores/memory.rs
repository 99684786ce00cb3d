//! In-memory store implementations
//!
//! Back the boundary traits with `parking_lot`-guarded maps. Used by
//! tests and local runs; a real deployment substitutes a document-store
//! driver behind the same traits.

use super::{CouponStore, DeliverySettingsStore, OrderStore};
use async_trait::async_trait;
use chrono::NaiveDate;
use parking_lot::RwLock;
use shared::models::{Coupon, DeliverySettings};
use shared::order::OrderRecord;
use shared::util::now_millis;
use shared::{StoreError, StoreResult};
use std::collections::HashMap;

/// Coupon store over a guarded map keyed by canonical code.
#[derive(Default)]
pub struct MemoryCouponStore {
    coupons: RwLock<HashMap<String, Coupon>>,
}

impl MemoryCouponStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed or replace a coupon record (admin-surface stand-in).
    pub fn upsert(&self, coupon: Coupon) {
        let key = Coupon::canonical_code(&coupon.code);
        self.coupons.write().insert(key, coupon);
    }
}

#[async_trait]
impl CouponStore for MemoryCouponStore {
    async fn find_by_code(&self, code: &str) -> StoreResult<Option<Coupon>> {
        let key = Coupon::canonical_code(code);
        Ok(self.coupons.read().get(&key).cloned())
    }

    async fn increment_usage(&self, code: &str) -> StoreResult<()> {
        let key = Coupon::canonical_code(code);
        let mut coupons = self.coupons.write();
        let coupon = coupons
            .get_mut(&key)
            .ok_or_else(|| StoreError::WriteRejected(format!("unknown coupon '{key}'")))?;

        // Read-modify-write by design; see the trait contract for the
        // accepted cross-session over-subscription window.
        coupon.used_count += 1;
        coupon.updated_at = now_millis();
        if coupon.usage_exhausted() && coupon.is_active {
            coupon.is_active = false;
            tracing::info!(code = %key, used = coupon.used_count, "Coupon usage cap reached, deactivated");
        }
        Ok(())
    }

    async fn list_active(&self, today: NaiveDate) -> StoreResult<Vec<Coupon>> {
        let coupons = self.coupons.read();
        Ok(coupons
            .values()
            .filter(|c| c.is_active && c.in_window(today) && !c.usage_exhausted())
            .cloned()
            .collect())
    }
}

/// Delivery-settings store holding the optional singleton record.
#[derive(Default)]
pub struct MemoryDeliveryStore {
    settings: RwLock<Option<DeliverySettings>>,
}

impl MemoryDeliveryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_settings(settings: DeliverySettings) -> Self {
        Self {
            settings: RwLock::new(Some(settings)),
        }
    }

    pub fn set(&self, settings: Option<DeliverySettings>) {
        *self.settings.write() = settings;
    }
}

#[async_trait]
impl DeliverySettingsStore for MemoryDeliveryStore {
    async fn active_settings(&self) -> StoreResult<Option<DeliverySettings>> {
        Ok(self.settings.read().clone())
    }
}

/// Order store appending records to a guarded vec.
#[derive(Default)]
pub struct MemoryOrderStore {
    orders: RwLock<Vec<OrderRecord>>,
}

impl MemoryOrderStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn orders(&self) -> Vec<OrderRecord> {
        self.orders.read().clone()
    }
}

#[async_trait]
impl OrderStore for MemoryOrderStore {
    async fn create(&self, order: &OrderRecord) -> StoreResult<String> {
        let id = uuid::Uuid::new_v4().to_string();
        let mut stored = order.clone();
        stored.id = Some(id.clone());
        self.orders.write().push(stored);
        tracing::debug!(order_id = %id, code = %order.code, "Order persisted");
        Ok(id)
    }
}
