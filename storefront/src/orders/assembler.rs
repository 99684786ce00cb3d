//! Order record assembly
//!
//! Pure transformation of validated session state into the write-once
//! order record: order-code generation, line snapshots with computed
//! per-line totals, the pricing snapshot evaluated at assembly time, and
//! a one-entry status history.

use super::{prune::prune_value, CheckoutDetails, CheckoutError};
use crate::cart::Cart;
use crate::coupon::AppliedCoupon;
use crate::money::{to_decimal, to_f64};
use crate::pricing::compute_summary;
use rust_decimal::Decimal;
use shared::models::coupon::CouponSnapshot;
use shared::models::DeliverySettings;
use shared::order::{CustomerInfo, FulfillmentMode, OrderLine, OrderRecord, OrderStatus, StatusEntry};
use shared::util::{now_millis, order_code};
use validator::Validate;

/// Assemble the immutable order record for the current session state.
///
/// `checkout` is validated here; the pricing snapshot is computed fresh
/// so the persisted totals can never disagree with what the customer saw
/// on the final pricing pass. The finished record is run through the
/// recursive prune before being considered final, so absent optional
/// fields are omitted entirely rather than persisted as nulls.
pub fn assemble(
    cart: &Cart,
    checkout: &CheckoutDetails,
    applied: Option<&AppliedCoupon>,
    settings: Option<&DeliverySettings>,
) -> Result<OrderRecord, CheckoutError> {
    checkout.validate()?;

    let mode = checkout.fulfillment.mode();
    let pricing = compute_summary(cart.items(), mode, settings, applied);

    let items = cart
        .items()
        .iter()
        .map(|line| OrderLine {
            dish_id: line.dish_id.clone(),
            name: line.name.clone(),
            unit_price: line.unit_price,
            quantity: line.quantity,
            line_total: to_f64(to_decimal(line.unit_price) * Decimal::from(line.quantity)),
            note: line.note.clone(),
        })
        .collect();

    let now = now_millis();
    let record = OrderRecord {
        id: None,
        code: order_code(),
        fulfillment_mode: mode,
        customer: CustomerInfo {
            name: checkout.customer_name.trim().to_string(),
            phone: checkout.customer_phone.trim().to_string(),
            email: checkout.customer_email.clone(),
        },
        fulfillment: checkout.fulfillment.clone(),
        items,
        pricing,
        coupon: applied.map(|a| CouponSnapshot::from(&a.coupon)),
        estimated_delivery_minutes: match mode {
            FulfillmentMode::Delivery => settings.map(|s| s.estimated_delivery_minutes),
            _ => None,
        },
        status: OrderStatus::PendingConfirmation,
        status_history: vec![StatusEntry {
            status: OrderStatus::PendingConfirmation,
            at: now,
            note: None,
        }],
        created_at: now,
    };

    normalize(record)
}

/// Serialize, prune absent fields, and rebuild the record. Required
/// fields survive by construction (checkout was validated above), so a
/// rebuild failure indicates a shape bug rather than bad user input.
fn normalize(record: OrderRecord) -> Result<OrderRecord, CheckoutError> {
    let mut value =
        serde_json::to_value(&record).map_err(|e| CheckoutError::Serialization(e.to_string()))?;
    prune_value(&mut value);
    serde_json::from_value(value).map_err(|e| CheckoutError::Serialization(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use shared::models::{Coupon, DiscountType, Dish, GeoPoint};
    use shared::order::FulfillmentDetails;

    fn cart_with(prices: &[(&str, f64, i32)]) -> Cart {
        let mut cart = Cart::new();
        for (id, price, qty) in prices {
            cart.add_item(&Dish::new(*id, format!("Dish {id}"), *price), *qty, "")
                .unwrap();
        }
        cart
    }

    fn delivery_checkout() -> CheckoutDetails {
        CheckoutDetails {
            customer_name: "Ana".to_string(),
            customer_phone: "+34600111222".to_string(),
            customer_email: None,
            fulfillment: FulfillmentDetails::Delivery {
                address: "Calle Mayor 1".to_string(),
                location: None,
                delivery_note: None,
            },
        }
    }

    fn settings() -> DeliverySettings {
        DeliverySettings {
            minimum_order_amount: 299.0,
            free_delivery_threshold: 499.0,
            delivery_fee: 49.0,
            restaurant_location: GeoPoint { lat: 40.0, lng: -3.0 },
            delivery_radius_km: 5.0,
            estimated_delivery_minutes: 35,
        }
    }

    #[test]
    fn test_assemble_snapshots_lines_and_pricing() {
        let cart = cart_with(&[("a", 250.0, 2), ("b", 10.5, 1)]);
        let cfg = settings();
        let record = assemble(&cart, &delivery_checkout(), None, Some(&cfg)).unwrap();

        assert_eq!(record.items.len(), 2);
        assert_eq!(record.items[0].line_total, 500.0);
        assert_eq!(record.pricing.subtotal, 510.5);
        // 510.5 >= 499 → free delivery
        assert_eq!(record.pricing.delivery_fee, 0.0);
        assert_eq!(record.pricing.total, 510.5);
        assert_eq!(record.estimated_delivery_minutes, Some(35));
        assert_eq!(record.status, OrderStatus::PendingConfirmation);
        assert_eq!(record.status_history.len(), 1);
        assert!(record.code.starts_with("ORD-"));
        assert!(record.id.is_none());
    }

    #[test]
    fn test_assemble_embeds_coupon_snapshot_not_live_record() {
        let cart = cart_with(&[("a", 300.0, 2)]);
        let applied = AppliedCoupon {
            coupon: Coupon {
                code: "FLAT100".to_string(),
                name: "Flat 100".to_string(),
                discount_type: DiscountType::Flat,
                discount_value: 100.0,
                minimum_purchase_amount: 500.0,
                start_date: NaiveDate::from_ymd_opt(2020, 1, 1).unwrap(),
                end_date: NaiveDate::from_ymd_opt(2099, 12, 31).unwrap(),
                is_active: true,
                usage_limit: Some(100),
                used_count: 3,
                created_at: 0,
                updated_at: 0,
            },
            applied_at: 0,
        };
        let record = assemble(&cart, &delivery_checkout(), Some(&applied), None).unwrap();

        let snapshot = record.coupon.unwrap();
        assert_eq!(snapshot.code, "FLAT100");
        assert_eq!(snapshot.discount_value, 100.0);
        assert_eq!(record.pricing.discount, 100.0);
    }

    #[test]
    fn test_assemble_rejects_invalid_checkout() {
        let cart = cart_with(&[("a", 100.0, 1)]);
        let mut checkout = delivery_checkout();
        checkout.customer_name = String::new();
        assert!(matches!(
            assemble(&cart, &checkout, None, None),
            Err(CheckoutError::Invalid(_))
        ));
    }

    #[test]
    fn test_assembled_record_serializes_without_nulls() {
        let cart = cart_with(&[("a", 100.0, 1)]);
        let checkout = CheckoutDetails {
            customer_email: Some("ana@example.com".to_string()),
            fulfillment: FulfillmentDetails::Pickup { pickup_time: None },
            ..delivery_checkout()
        };
        let record = assemble(&cart, &checkout, None, None).unwrap();
        let json = serde_json::to_string(&record).unwrap();
        assert!(!json.contains("null"));
        assert!(!json.contains("pickup_time"));
        assert!(json.contains("ana@example.com"));
    }

    #[test]
    fn test_pickup_has_no_delivery_estimate() {
        let cart = cart_with(&[("a", 100.0, 1)]);
        let checkout = CheckoutDetails {
            fulfillment: FulfillmentDetails::Pickup {
                pickup_time: Some("20:00".to_string()),
            },
            ..delivery_checkout()
        };
        let cfg = settings();
        let record = assemble(&cart, &checkout, None, Some(&cfg)).unwrap();
        assert_eq!(record.estimated_delivery_minutes, None);
        assert_eq!(record.pricing.delivery_fee, 0.0);
    }
}
