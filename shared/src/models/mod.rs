//! Data models for the storefront core

pub mod coupon;
pub mod delivery;
pub mod dish;

pub use coupon::{Coupon, DiscountType};
pub use delivery::{DeliverySettings, GeoPoint};
pub use dish::Dish;
