//! Order assembly
//!
//! Turns the session state (cart, applied coupon, delivery settings) plus
//! the customer's checkout input into the immutable order record that is
//! persisted and handed to the confirmation channel.

mod assembler;
pub mod prune;

pub use assembler::assemble;

use serde::{Deserialize, Serialize};
use shared::order::FulfillmentDetails;
use thiserror::Error;
use validator::{Validate, ValidationError};

/// Customer input collected at checkout.
///
/// Validated before assembly; the assembler itself trusts these fields.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CheckoutDetails {
    #[validate(
        length(min = 1, max = 100, message = "name is required"),
        custom(function = validate_not_blank)
    )]
    pub customer_name: String,
    #[validate(
        length(min = 5, max = 20, message = "a contact phone is required"),
        custom(function = validate_not_blank)
    )]
    pub customer_phone: String,
    #[validate(email(message = "invalid email address"))]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub customer_email: Option<String>,
    #[validate(custom(function = validate_fulfillment))]
    pub fulfillment: FulfillmentDetails,
}

/// Length checks count whitespace, so a blank string would slip through
/// `length(min = 1)` and reach the assembler as an empty required field.
fn validate_not_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        let mut err = ValidationError::new("blank");
        err.message = Some("must not be blank".into());
        return Err(err);
    }
    Ok(())
}

fn validate_fulfillment(details: &FulfillmentDetails) -> Result<(), ValidationError> {
    if let FulfillmentDetails::Delivery { address, .. } = details {
        if address.trim().is_empty() {
            let mut err = ValidationError::new("delivery_address_required");
            err.message = Some("a delivery address is required".into());
            return Err(err);
        }
    }
    Ok(())
}

/// Failure while building the final order record
#[derive(Debug, Error)]
pub enum CheckoutError {
    #[error("invalid checkout details: {0}")]
    Invalid(#[from] validator::ValidationErrors),
    #[error("order record serialization failed: {0}")]
    Serialization(String),
}
