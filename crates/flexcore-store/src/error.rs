//! Error types for the flexcore-store crate.
//!
//! Catalog construction returns [`StoreError`] via [`StoreResult`].  Cart
//! operations never fail: unknown product ids are silent no-ops.

use thiserror::Error;

/// Alias for `Result<T, StoreError>`.
pub type StoreResult<T> = Result<T, StoreError>;

/// Errors that can occur while building store data.
#[derive(Debug, Error)]
pub enum StoreError {
    /// JSON serialization or deserialization failed.
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),

    /// Two products share the same id.
    #[error("duplicate product id: {0}")]
    DuplicateProduct(String),

    /// A product is malformed.
    #[error("invalid product `{id}`: {reason}")]
    InvalidProduct { id: String, reason: String },
}
