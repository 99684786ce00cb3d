//! Boundary error types
//!
//! Errors crossing the store boundary (document store, delivery-settings
//! fetch, order persistence). Expected business conditions — coupon
//! expired, minimum not met, radius exceeded — are NOT errors; they are
//! structured result values owned by the engine crate.

use thiserror::Error;

/// Failure at an external store boundary.
///
/// Absence of a record is not an error (`find_by_code` returns `Option`);
/// these variants cover connectivity and data-shape failures only.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum StoreError {
    /// The backing store could not be reached or timed out.
    #[error("store unavailable: {0}")]
    Unavailable(String),

    /// A stored record could not be decoded.
    #[error("malformed record for '{key}': {reason}")]
    Malformed { key: String, reason: String },

    /// A write was rejected by the store.
    #[error("write rejected: {0}")]
    WriteRejected(String),
}

/// Type alias for Result with StoreError.
pub type StoreResult<T> = Result<T, StoreError>;
