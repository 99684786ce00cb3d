//! Cart aggregate
//!
//! Owns the mutable list of line items and the fulfillment mode for the
//! active browsing session. All operations are synchronous and free of
//! I/O; derived totals come from the pricing engine. Line invariants
//! (one line per dish id, quantity >= 1, frozen add-time price) are
//! enforced structurally by the mutation contracts here.

use crate::money::{MAX_PRICE, MAX_QUANTITY};
use serde::{Deserialize, Serialize};
use shared::models::Dish;
use shared::order::FulfillmentMode;
use shared::util::now_millis;
use thiserror::Error;

/// Maximum length for a per-item note
pub const MAX_NOTE_LEN: usize = 500;

/// Invalid input to a cart mutation
#[derive(Debug, Clone, Error, PartialEq)]
pub enum CartError {
    #[error("price must be a finite, non-negative number, got {0}")]
    InvalidPrice(f64),
    #[error("price exceeds maximum allowed ({max}), got {got}")]
    PriceTooLarge { got: f64, max: f64 },
    #[error("quantity must be positive, got {0}")]
    InvalidQuantity(i32),
    #[error("quantity exceeds maximum allowed ({max}), got {got}")]
    QuantityTooLarge { got: i32, max: i32 },
    #[error("note exceeds maximum length ({max} chars)")]
    NoteTooLong { max: usize },
}

/// One cart line: a dish reference with a frozen add-time price
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LineItem {
    pub dish_id: String,
    pub name: String,
    /// Price captured when the line was created; never re-read from the
    /// catalog afterwards
    pub unit_price: f64,
    pub quantity: i32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
    /// Unix millis, informational only
    pub added_at: i64,
}

/// Items-only cart snapshot mirrored to local storage across reloads.
/// Fulfillment mode and UI state are session-transient and excluded.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct StoredCart {
    pub items: Vec<LineItem>,
}

/// The session cart: ordered line items plus fulfillment mode
#[derive(Debug, Clone, Default)]
pub struct Cart {
    items: Vec<LineItem>,
    fulfillment_mode: FulfillmentMode,
}

fn validate_price(price: f64) -> Result<(), CartError> {
    if !price.is_finite() || price < 0.0 {
        return Err(CartError::InvalidPrice(price));
    }
    if price > MAX_PRICE {
        return Err(CartError::PriceTooLarge {
            got: price,
            max: MAX_PRICE,
        });
    }
    Ok(())
}

fn validate_quantity(quantity: i32) -> Result<(), CartError> {
    if quantity <= 0 {
        return Err(CartError::InvalidQuantity(quantity));
    }
    if quantity > MAX_QUANTITY {
        return Err(CartError::QuantityTooLarge {
            got: quantity,
            max: MAX_QUANTITY,
        });
    }
    Ok(())
}

fn validate_note(note: &str) -> Result<(), CartError> {
    if note.chars().count() > MAX_NOTE_LEN {
        return Err(CartError::NoteTooLong { max: MAX_NOTE_LEN });
    }
    Ok(())
}

impl Cart {
    pub fn new() -> Self {
        Self::default()
    }

    /// Restore a cart from its local-storage mirror (items only; mode
    /// resets to the default).
    pub fn from_stored(stored: StoredCart) -> Self {
        let mut items = stored.items;
        // Drop lines a stale mirror could not have produced through the
        // mutation contracts: bad numbers or duplicate dish ids
        let mut seen = std::collections::HashSet::new();
        items.retain(|line| {
            line.quantity >= 1
                && line.quantity <= MAX_QUANTITY
                && line.unit_price.is_finite()
                && line.unit_price >= 0.0
                && seen.insert(line.dish_id.clone())
        });
        Self {
            items,
            fulfillment_mode: FulfillmentMode::default(),
        }
    }

    /// Items-only snapshot for the local-storage mirror.
    pub fn to_stored(&self) -> StoredCart {
        StoredCart {
            items: self.items.clone(),
        }
    }

    pub fn items(&self) -> &[LineItem] {
        &self.items
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn fulfillment_mode(&self) -> FulfillmentMode {
        self.fulfillment_mode
    }

    /// Pure state change. Mode affects the delivery fee, not the
    /// subtotal, so it does not trigger coupon re-evaluation.
    pub fn set_fulfillment_mode(&mut self, mode: FulfillmentMode) {
        self.fulfillment_mode = mode;
    }

    /// Add a dish to the cart, freezing its current catalog price.
    ///
    /// If a line for the dish already exists its quantity is incremented
    /// and the note is overwritten only when a non-empty note is given;
    /// otherwise a new line is appended.
    pub fn add_item(
        &mut self,
        dish: &Dish,
        quantity: i32,
        note: impl Into<String>,
    ) -> Result<(), CartError> {
        validate_price(dish.price)?;
        validate_quantity(quantity)?;
        let note = note.into();
        validate_note(&note)?;

        if let Some(line) = self.items.iter_mut().find(|l| l.dish_id == dish.id) {
            let merged = line.quantity.saturating_add(quantity);
            validate_quantity(merged)?;
            line.quantity = merged;
            if !note.is_empty() {
                line.note = Some(note);
            }
        } else {
            self.items.push(LineItem {
                dish_id: dish.id.clone(),
                name: dish.name.clone(),
                unit_price: dish.price,
                quantity,
                note: (!note.is_empty()).then_some(note),
                added_at: now_millis(),
            });
        }
        Ok(())
    }

    /// Drop the line for `dish_id` entirely. No-op when absent.
    pub fn remove_item(&mut self, dish_id: &str) {
        self.items.retain(|l| l.dish_id != dish_id);
    }

    /// Overwrite the quantity for `dish_id`; `quantity <= 0` removes the
    /// line instead of storing a zero-quantity line.
    pub fn set_quantity(&mut self, dish_id: &str, quantity: i32) -> Result<(), CartError> {
        if quantity <= 0 {
            self.remove_item(dish_id);
            return Ok(());
        }
        validate_quantity(quantity)?;
        if let Some(line) = self.items.iter_mut().find(|l| l.dish_id == dish_id) {
            line.quantity = quantity;
        }
        Ok(())
    }

    /// Overwrite the note on the matching line; no-op if the dish is not
    /// in the cart. An empty note clears the existing one.
    pub fn set_note(&mut self, dish_id: &str, note: impl Into<String>) -> Result<(), CartError> {
        let note = note.into();
        validate_note(&note)?;
        if let Some(line) = self.items.iter_mut().find(|l| l.dish_id == dish_id) {
            line.note = (!note.is_empty()).then_some(note);
        }
        Ok(())
    }

    /// Item-sum subtotal through the same Decimal path as the pricing
    /// engine. Independent of fulfillment mode, settings, and coupons.
    pub fn subtotal(&self) -> f64 {
        use rust_decimal::Decimal;
        let sum: Decimal = self
            .items
            .iter()
            .map(|l| crate::money::to_decimal(l.unit_price) * Decimal::from(l.quantity))
            .sum();
        crate::money::to_f64(sum)
    }

    /// Sum of line quantities across all lines.
    pub fn item_count(&self) -> i32 {
        self.items.iter().map(|l| l.quantity).sum()
    }

    /// Quantity for `dish_id`, 0 if absent.
    pub fn get_quantity(&self, dish_id: &str) -> i32 {
        self.items
            .iter()
            .find(|l| l.dish_id == dish_id)
            .map_or(0, |l| l.quantity)
    }

    /// Empty the line list. The caller must also force coupon detachment
    /// (see `StorefrontSession::clear_cart`).
    pub fn clear(&mut self) {
        self.items.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dish(id: &str, price: f64) -> Dish {
        Dish::new(id, format!("Dish {id}"), price)
    }

    #[test]
    fn test_add_item_freezes_price() {
        let mut cart = Cart::new();
        let mut d = dish("d1", 250.0);
        cart.add_item(&d, 1, "").unwrap();

        // Catalog price changes after add; the line keeps the old price
        d.price = 300.0;
        assert_eq!(cart.items()[0].unit_price, 250.0);
    }

    #[test]
    fn test_add_same_dish_merges_quantity() {
        let mut cart = Cart::new();
        let d = dish("d1", 100.0);
        cart.add_item(&d, 1, "no onions").unwrap();
        cart.add_item(&d, 2, "").unwrap();

        assert_eq!(cart.items().len(), 1);
        assert_eq!(cart.get_quantity("d1"), 3);
        // Empty note must not clobber the existing one
        assert_eq!(cart.items()[0].note.as_deref(), Some("no onions"));

        cart.add_item(&d, 1, "extra spicy").unwrap();
        assert_eq!(cart.items()[0].note.as_deref(), Some("extra spicy"));
    }

    #[test]
    fn test_set_quantity_zero_removes_line() {
        let mut cart = Cart::new();
        cart.add_item(&dish("d1", 100.0), 2, "").unwrap();
        cart.set_quantity("d1", 0).unwrap();
        assert!(cart.is_empty());
        assert_eq!(cart.get_quantity("d1"), 0);

        cart.add_item(&dish("d2", 50.0), 1, "").unwrap();
        cart.set_quantity("d2", -3).unwrap();
        assert!(cart.is_empty());
    }

    #[test]
    fn test_subtotal_and_item_count() {
        let mut cart = Cart::new();
        assert_eq!(cart.subtotal(), 0.0);
        assert_eq!(cart.item_count(), 0);

        cart.add_item(&dish("a", 12.5), 2, "").unwrap();
        cart.add_item(&dish("b", 0.1), 3, "").unwrap();
        assert_eq!(cart.subtotal(), 25.3);
        assert_eq!(cart.item_count(), 5);
    }

    #[test]
    fn test_set_note_noop_when_absent() {
        let mut cart = Cart::new();
        cart.set_note("ghost", "hello").unwrap();
        assert!(cart.is_empty());
    }

    #[test]
    fn test_insertion_order_preserved() {
        let mut cart = Cart::new();
        cart.add_item(&dish("a", 1.0), 1, "").unwrap();
        cart.add_item(&dish("b", 2.0), 1, "").unwrap();
        cart.add_item(&dish("c", 3.0), 1, "").unwrap();
        cart.add_item(&dish("a", 1.0), 1, "").unwrap();

        let ids: Vec<&str> = cart.items().iter().map(|l| l.dish_id.as_str()).collect();
        assert_eq!(ids, vec!["a", "b", "c"]);
    }

    #[test]
    fn test_rejects_invalid_input() {
        let mut cart = Cart::new();
        assert!(matches!(
            cart.add_item(&dish("d1", -1.0), 1, ""),
            Err(CartError::InvalidPrice(_))
        ));
        assert!(matches!(
            cart.add_item(&dish("d1", f64::NAN), 1, ""),
            Err(CartError::InvalidPrice(_))
        ));
        assert!(matches!(
            cart.add_item(&dish("d1", 10.0), 0, ""),
            Err(CartError::InvalidQuantity(0))
        ));
        assert!(matches!(
            cart.add_item(&dish("d1", 10.0), 10_000, ""),
            Err(CartError::QuantityTooLarge { .. })
        ));
        let long_note = "x".repeat(MAX_NOTE_LEN + 1);
        assert!(matches!(
            cart.add_item(&dish("d1", 10.0), 1, long_note),
            Err(CartError::NoteTooLong { .. })
        ));
        assert!(cart.is_empty());
    }

    #[test]
    fn test_stored_roundtrip_drops_mode() {
        let mut cart = Cart::new();
        cart.add_item(&dish("d1", 100.0), 2, "note").unwrap();
        cart.set_fulfillment_mode(FulfillmentMode::Pickup);

        let json = serde_json::to_string(&cart.to_stored()).unwrap();
        let restored = Cart::from_stored(serde_json::from_str(&json).unwrap());

        assert_eq!(restored.items(), cart.items());
        assert_eq!(restored.fulfillment_mode(), FulfillmentMode::default());
    }

    #[test]
    fn test_from_stored_filters_corrupt_lines() {
        let stored = StoredCart {
            items: vec![
                LineItem {
                    dish_id: "ok".to_string(),
                    name: "Ok".to_string(),
                    unit_price: 10.0,
                    quantity: 1,
                    note: None,
                    added_at: 0,
                },
                LineItem {
                    dish_id: "bad".to_string(),
                    name: "Bad".to_string(),
                    unit_price: -5.0,
                    quantity: 0,
                    note: None,
                    added_at: 0,
                },
            ],
        };
        let cart = Cart::from_stored(stored);
        assert_eq!(cart.items().len(), 1);
        assert_eq!(cart.items()[0].dish_id, "ok");
    }
}
